//! landmark-client - HTTP client for the landmark prediction service
//!
//! Uploads a photo for recognition, lists past predictions and checks
//! service health. Each call is a single stateless request; the caller owns
//! any retry policy.
//!
//! # Example
//!
//! ```rust,no_run
//! use landmark_client::{ImageReference, RemoteClient};
//!
//! #[tokio::main]
//! async fn main() -> landmark_client::Result<()> {
//!     let client = RemoteClient::builder()
//!         .base_url("http://192.168.1.20:8000/api")
//!         .build()?;
//!
//!     if !client.is_healthy().await {
//!         eprintln!("prediction service unavailable");
//!         return Ok(());
//!     }
//!
//!     let result = client
//!         .predict(&ImageReference::file("IMG_0042.jpg"))
//!         .await?;
//!     for p in &result.predictions {
//!         println!("{}: {:.1}%", p.label, p.confidence * 100.0);
//!     }
//!
//!     for record in client.history(Some(5)).await? {
//!         println!("{:?}", record.created_at);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod payload;
pub mod telemetry;
pub mod types;

// Re-export main types at crate root
pub use client::{DEFAULT_HISTORY_LIMIT, RemoteClient, RemoteClientBuilder};
pub use config::ClientConfig;
pub use error::{LandmarkError, Result};
pub use payload::{
    BrowserPayloadBuilder, ImagePart, NativePayloadBuilder, PayloadBuilder, Platform,
};
pub use types::{
    HealthFailure, HealthStatus, HistoryRecord, ImageReference, Prediction, PredictionResult,
};

/// Package version from Cargo.toml.
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");
