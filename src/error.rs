//! Landmark client error types

use std::time::Duration;

/// Landmark client error types
#[derive(Debug, thiserror::Error)]
pub enum LandmarkError {
    // Transport errors
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl LandmarkError {
    /// Map a transport error, keeping timeouts distinguishable.
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            LandmarkError::Timeout(timeout)
        } else {
            LandmarkError::Http(err.to_string())
        }
    }

    /// Whether a caller-side retry could plausibly succeed.
    ///
    /// The client itself never retries; this is a hint for callers that
    /// own a retry policy.
    pub fn is_transient(&self) -> bool {
        match self {
            LandmarkError::Http(_) | LandmarkError::Timeout(_) => true,
            LandmarkError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Result type alias for landmark client operations
pub type Result<T> = std::result::Result<T, LandmarkError>;
