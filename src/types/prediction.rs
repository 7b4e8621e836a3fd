//! Prediction and history records returned by the service

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single ranked label with its confidence score.
///
/// Only the label is required. A missing score decodes as `0.0` and any other
/// fields of the entry are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(alias = "landmark", alias = "name")]
    pub label: String,
    #[serde(default, alias = "score", alias = "probability")]
    pub confidence: f32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Result of a single `predict` call.
///
/// The service returns the top-ranked predictions (typically three) plus
/// metadata this client does not interpret. Unknown fields are kept in
/// `metadata` so callers can still reach them.
///
/// Decoding fails only when a prediction entry has no label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    #[serde(default)]
    pub predictions: Vec<Prediction>,
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl PredictionResult {
    /// Highest-confidence prediction, if any.
    pub fn top(&self) -> Option<&Prediction> {
        self.predictions
            .iter()
            .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
    }
}

/// One past prediction event, as stored by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(
        default,
        alias = "timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<String>,
    #[serde(default)]
    pub predictions: Vec<Prediction>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
