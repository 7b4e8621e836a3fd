//! Local image references accepted by `predict`

use std::path::{Path, PathBuf};

#[cfg(any(unix, windows))]
use url::Url;

/// Locator for the image to upload.
///
/// Either a file on the local filesystem or bytes already held in memory.
/// The client only reads from it; nothing is written back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageReference {
    /// A local file.
    File(PathBuf),

    /// In-memory image bytes with an optionally declared MIME type.
    Blob {
        data: Vec<u8>,
        content_type: Option<String>,
    },
}

impl ImageReference {
    /// Reference a local file.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// Reference a `file://` URI or a bare path.
    ///
    /// File URIs are percent-decoded (`My%20Photo.png` names `My Photo.png`)
    /// and may carry a `localhost` host. Anything that does not parse as a
    /// file URI is taken as a path verbatim.
    pub fn from_uri(uri: &str) -> Self {
        let path = file_url_path(uri).unwrap_or_else(|| PathBuf::from(uri));
        Self::File(path)
    }

    /// Reference in-memory bytes without a declared type.
    pub fn blob(data: impl Into<Vec<u8>>) -> Self {
        Self::Blob {
            data: data.into(),
            content_type: None,
        }
    }

    /// Declare the MIME type of a blob. No effect on file references.
    pub fn with_content_type(self, content_type: impl Into<String>) -> Self {
        match self {
            Self::Blob { data, .. } => Self::Blob {
                data,
                content_type: Some(content_type.into()),
            },
            file => file,
        }
    }

    /// Filesystem path, for file references.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File(path) => Some(path),
            Self::Blob { .. } => None,
        }
    }

    /// Read the referenced bytes.
    pub(crate) async fn read(&self) -> crate::Result<Vec<u8>> {
        match self {
            Self::File(path) => tokio::fs::read(path).await.map_err(|e| {
                crate::LandmarkError::InvalidInput(format!(
                    "failed to read image {}: {e}",
                    path.display()
                ))
            }),
            Self::Blob { data, .. } => Ok(data.clone()),
        }
    }
}

#[cfg(any(unix, windows))]
fn file_url_path(uri: &str) -> Option<PathBuf> {
    Url::parse(uri)
        .ok()
        .filter(|url| url.scheme() == "file")
        .and_then(|url| url.to_file_path().ok())
}

#[cfg(not(any(unix, windows)))]
fn file_url_path(uri: &str) -> Option<PathBuf> {
    uri.strip_prefix("file://").map(PathBuf::from)
}

impl From<PathBuf> for ImageReference {
    fn from(path: PathBuf) -> Self {
        Self::File(path)
    }
}

impl From<&Path> for ImageReference {
    fn from(path: &Path) -> Self {
        Self::File(path.to_path_buf())
    }
}

impl From<&str> for ImageReference {
    fn from(uri: &str) -> Self {
        Self::from_uri(uri)
    }
}
