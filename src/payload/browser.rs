//! Payload builder for browser hosts: type comes from the content.

use async_trait::async_trait;
use tracing::debug;

use super::{DEFAULT_FILE_NAME, DEFAULT_MIME_TYPE, ImagePart, PayloadBuilder};
use crate::Result;
use crate::types::ImageReference;

/// Reads the image bytes and derives the MIME type from them.
///
/// A declared blob type wins; otherwise the magic bytes are sniffed. The file
/// name only distinguishes PNG from everything else.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserPayloadBuilder;

impl BrowserPayloadBuilder {
    fn mime_type(image: &ImageReference, data: &[u8]) -> String {
        if let ImageReference::Blob {
            content_type: Some(declared),
            ..
        } = image
        {
            let declared = declared.trim();
            if !declared.is_empty() {
                return declared.to_string();
            }
        }

        image::guess_format(data)
            .map(|format| format.to_mime_type().to_string())
            .unwrap_or_else(|_| DEFAULT_MIME_TYPE.to_string())
    }

    fn file_name(mime_type: &str) -> &'static str {
        if mime_type == "image/png" {
            "photo.png"
        } else {
            DEFAULT_FILE_NAME
        }
    }
}

#[async_trait]
impl PayloadBuilder for BrowserPayloadBuilder {
    fn name(&self) -> &str {
        "browser"
    }

    async fn build(&self, image: &ImageReference) -> Result<ImagePart> {
        let data = image.read().await?;
        let mime_type = Self::mime_type(image, &data);
        let file_name = Self::file_name(&mime_type).to_string();
        debug!(%file_name, %mime_type, bytes = data.len(), "built browser image part");

        Ok(ImagePart {
            file_name,
            mime_type,
            data,
        })
    }
}
