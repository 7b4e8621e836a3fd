//! Public types for the landmark client API.

mod health;
mod image;
mod prediction;

pub use health::{HealthFailure, HealthStatus};
pub use image::ImageReference;
pub use prediction::{HistoryRecord, Prediction, PredictionResult};
