//! Telemetry metric name constants.
//!
//! Consumers install their own `metrics` recorder (e.g. prometheus, statsd);
//! without a recorder installed, all metric calls are no-ops.
//!
//! # Common labels
//!
//! - `operation` — client call: "predict", "history" or "health"
//! - `status` — outcome: "ok" or "error"

/// Total requests sent to the prediction service.
///
/// Labels: `operation`, `status` ("ok" | "error").
pub const REQUESTS_TOTAL: &str = "landmark_requests_total";

/// Request duration in seconds, including response decoding.
///
/// Labels: `operation`.
pub const REQUEST_DURATION_SECONDS: &str = "landmark_request_duration_seconds";
