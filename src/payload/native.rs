//! Payload builder for native hosts: type comes from the file name.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use tracing::debug;

use super::{DEFAULT_FILE_NAME, DEFAULT_MIME_TYPE, ImagePart, PayloadBuilder};
use crate::Result;
use crate::types::ImageReference;

/// Trailing extension of a file name (ASCII word characters only).
static EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.((?-u:\w)+)$").expect("extension pattern is valid"));

/// Names the part after the last path segment and types it by extension.
///
/// The extension is used verbatim: `IMG.HEIC` is sent as `image/HEIC` and
/// `a.jpg` as `image/jpg`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativePayloadBuilder;

impl NativePayloadBuilder {
    /// Last `/`-separated segment of the reference, if non-empty.
    fn file_name(image: &ImageReference) -> Option<String> {
        image
            .path()
            .map(|path| path.to_string_lossy())
            .and_then(|path| {
                path.rsplit('/')
                    .next()
                    .filter(|segment| !segment.is_empty())
                    .map(str::to_string)
            })
    }

    /// File name and MIME type for the part; both default together when the
    /// reference carries no name.
    fn name_and_type(image: &ImageReference) -> (String, String) {
        match Self::file_name(image) {
            Some(file_name) => {
                let mime_type = Self::mime_type(&file_name);
                (file_name, mime_type)
            }
            None => (DEFAULT_FILE_NAME.to_string(), DEFAULT_MIME_TYPE.to_string()),
        }
    }

    fn mime_type(file_name: &str) -> String {
        EXTENSION
            .captures(file_name)
            .map(|caps| format!("image/{}", &caps[1]))
            .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string())
    }
}

#[async_trait]
impl PayloadBuilder for NativePayloadBuilder {
    fn name(&self) -> &str {
        "native"
    }

    async fn build(&self, image: &ImageReference) -> Result<ImagePart> {
        let (file_name, mime_type) = Self::name_and_type(image);
        let data = image.read().await?;
        debug!(%file_name, %mime_type, bytes = data.len(), "built native image part");

        Ok(ImagePart {
            file_name,
            mime_type,
            data,
        })
    }
}
