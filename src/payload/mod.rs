//! Multipart payload construction for `predict`.
//!
//! How an [`ImageReference`] becomes a file part depends on where the client
//! runs. A browser host only knows the bytes it was handed, so it sniffs the
//! content; a native host knows the file name, so it trusts the extension.
//! Both variants implement [`PayloadBuilder`] and one of them is chosen when
//! the client is built.

mod browser;
mod native;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::types::ImageReference;
use crate::{LandmarkError, Result};

pub use browser::BrowserPayloadBuilder;
pub use native::NativePayloadBuilder;

/// Multipart field name the prediction service reads the image from.
pub const IMAGE_FIELD: &str = "imageFile";

/// MIME type used whenever none can be determined.
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// File name used whenever none can be determined.
pub const DEFAULT_FILE_NAME: &str = "photo.jpg";

/// A fully resolved file part, ready to be attached to a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePart {
    pub file_name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl ImagePart {
    /// Convert into a reqwest multipart part.
    pub(crate) fn into_part(self) -> Result<reqwest::multipart::Part> {
        reqwest::multipart::Part::bytes(self.data)
            .file_name(self.file_name)
            .mime_str(&self.mime_type)
            .map_err(|e| {
                LandmarkError::InvalidInput(format!("invalid MIME type '{}': {e}", self.mime_type))
            })
    }
}

/// Turns an image reference into the file part of a predict request.
#[async_trait]
pub trait PayloadBuilder: Send + Sync {
    /// Builder name for logging/debugging.
    fn name(&self) -> &str;

    /// Resolve the reference into bytes, file name and MIME type.
    async fn build(&self, image: &ImageReference) -> Result<ImagePart>;
}

/// Runtime environment the client is hosted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Browser,
    Native,
}

impl Platform {
    /// Platform of the current build target.
    pub fn detect() -> Self {
        if cfg!(target_arch = "wasm32") {
            Platform::Browser
        } else {
            Platform::Native
        }
    }

    /// Payload builder for this platform.
    pub fn payload_builder(self) -> Arc<dyn PayloadBuilder> {
        match self {
            Platform::Browser => Arc::new(BrowserPayloadBuilder),
            Platform::Native => Arc::new(NativePayloadBuilder),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Browser => write!(f, "browser"),
            Platform::Native => write!(f, "native"),
        }
    }
}

impl FromStr for Platform {
    type Err = LandmarkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "browser" | "web" => Ok(Platform::Browser),
            "native" | "ios" | "android" => Ok(Platform::Native),
            other => Err(LandmarkError::Configuration(format!(
                "unknown platform '{other}' (expected 'browser' or 'native')"
            ))),
        }
    }
}
