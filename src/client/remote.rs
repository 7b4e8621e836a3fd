//! Request/response exchanges with the prediction service.
//!
//! Every call is a single attempt. `predict` and `history` surface transport,
//! status and decode failures to the caller; `check_health` folds them into a
//! [`HealthStatus`] and never fails.

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::multipart::Form;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::RemoteClientBuilder;
use crate::config::ClientConfig;
use crate::payload::{IMAGE_FIELD, PayloadBuilder, Platform};
use crate::telemetry;
use crate::types::{
    HealthFailure, HealthStatus, HistoryRecord, ImageReference, PredictionResult,
};
use crate::{LandmarkError, Result};

/// Number of history records requested when the caller gives no limit.
pub const DEFAULT_HISTORY_LIMIT: u32 = 20;

/// Longest error body excerpt carried in [`LandmarkError::Api`].
const MAX_ERROR_BODY: usize = 512;

/// Client for the predict, history and health endpoints.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct RemoteClient {
    http: Client,
    config: ClientConfig,
    payload: Arc<dyn PayloadBuilder>,
}

impl std::fmt::Debug for RemoteClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteClient")
            .field("config", &self.config)
            .field("payload", &self.payload.name())
            .finish_non_exhaustive()
    }
}

impl RemoteClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> RemoteClientBuilder {
        RemoteClientBuilder::new()
    }

    /// Create a client from a complete configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    pub(super) fn from_parts(
        http: Client,
        config: ClientConfig,
        payload: Arc<dyn PayloadBuilder>,
    ) -> Self {
        Self {
            http,
            config,
            payload,
        }
    }

    /// Configuration the client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Platform payloads are built for, unless a custom builder was supplied.
    pub fn platform(&self) -> Platform {
        self.config.platform()
    }

    /// Upload an image and return the service's ranked predictions.
    ///
    /// The image is sent as the `imageFile` part of a multipart form.
    pub async fn predict(&self, image: &ImageReference) -> Result<PredictionResult> {
        let start = Instant::now();
        let result = self.send_predict(image).await;
        record_request("predict", start, result.is_ok());
        result
    }

    async fn send_predict(&self, image: &ImageReference) -> Result<PredictionResult> {
        let part = self.payload.build(image).await?;
        let form = Form::new().part(IMAGE_FIELD, part.into_part()?);

        debug!(
            url = %self.config.predict_url,
            builder = self.payload.name(),
            "sending predict request"
        );
        let response = self
            .http
            .post(&self.config.predict_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| LandmarkError::from_reqwest(e, self.config.timeout))?;

        let result: PredictionResult = decode(response, self.config.timeout).await?;
        debug!(predictions = result.predictions.len(), "predict succeeded");
        Ok(result)
    }

    /// Fetch past predictions in server order.
    ///
    /// `limit` defaults to [`DEFAULT_HISTORY_LIMIT`]. It is passed through as
    /// a hint; the service enforces the actual bound.
    pub async fn history(&self, limit: Option<u32>) -> Result<Vec<HistoryRecord>> {
        let start = Instant::now();
        let result = self.send_history(limit.unwrap_or(DEFAULT_HISTORY_LIMIT)).await;
        record_request("history", start, result.is_ok());
        result
    }

    async fn send_history(&self, limit: u32) -> Result<Vec<HistoryRecord>> {
        debug!(url = %self.config.history_url, limit, "sending history request");
        let response = self
            .http
            .get(&self.config.history_url)
            .query(&[("limit", limit)])
            .send()
            .await
            .map_err(|e| LandmarkError::from_reqwest(e, self.config.timeout))?;

        let records: Vec<HistoryRecord> = decode(response, self.config.timeout).await?;
        debug!(records = records.len(), "history fetched");
        Ok(records)
    }

    /// Check the health endpoint.
    ///
    /// Healthy exactly when the service answers 200 within the health
    /// timeout. Never fails; unhealthy outcomes are logged at `warn`.
    pub async fn check_health(&self) -> HealthStatus {
        let start = Instant::now();
        let timeout = self.config.health_timeout;

        let status = match self
            .http
            .get(&self.config.health_url)
            .timeout(timeout)
            .send()
            .await
        {
            Ok(response) if response.status() == StatusCode::OK => HealthStatus::Healthy,
            Ok(response) => HealthStatus::Unhealthy(HealthFailure::Status(
                response.status().as_u16(),
            )),
            Err(e) => HealthStatus::Unhealthy(HealthFailure::Transport(
                LandmarkError::from_reqwest(e, timeout).to_string(),
            )),
        };

        if let HealthStatus::Unhealthy(failure) = &status {
            warn!(url = %self.config.health_url, %failure, "health check failed");
        }
        record_request("health", start, status.is_healthy());
        status
    }

    /// Shorthand for `check_health().await.is_healthy()`.
    pub async fn is_healthy(&self) -> bool {
        self.check_health().await.is_healthy()
    }
}

/// Reject non-2xx responses, then decode the JSON body.
async fn decode<T: DeserializeOwned>(response: Response, timeout: Duration) -> Result<T> {
    let response = check_status(response).await?;
    let body = response
        .bytes()
        .await
        .map_err(|e| LandmarkError::from_reqwest(e, timeout))?;
    Ok(serde_json::from_slice(&body)?)
}

/// Map a non-success status to [`LandmarkError::Api`].
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = match body.trim() {
        "" => status
            .canonical_reason()
            .unwrap_or("unknown status")
            .to_string(),
        text => text.chars().take(MAX_ERROR_BODY).collect(),
    };
    Err(LandmarkError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Record request outcome metrics (counter + histogram).
fn record_request(operation: &'static str, start: Instant, ok: bool) {
    let status = if ok { "ok" } else { "error" };
    let elapsed = start.elapsed().as_secs_f64();
    metrics::counter!(telemetry::REQUESTS_TOTAL,
        "operation" => operation,
        "status" => status,
    )
    .increment(1);
    metrics::histogram!(telemetry::REQUEST_DURATION_SECONDS,
        "operation" => operation,
    )
    .record(elapsed);
}
