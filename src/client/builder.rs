//! Builder for configuring client instances

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use super::RemoteClient;
use crate::config::ClientConfig;
use crate::payload::{PayloadBuilder, Platform};
use crate::{LandmarkError, Result};

/// Builder for configuring [`RemoteClient`] instances.
///
/// Either a full [`ClientConfig`] or a base URL must be given; the remaining
/// setters override individual fields of it.
#[derive(Default)]
pub struct RemoteClientBuilder {
    config: Option<ClientConfig>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    health_timeout: Option<Duration>,
    platform: Option<Platform>,
    payload_builder: Option<Arc<dyn PayloadBuilder>>,
}

impl RemoteClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a complete configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Derive all three endpoints from a base URL.
    ///
    /// Ignored when [`config`](Self::config) is also given.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the default request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the health check timeout.
    pub fn health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = Some(timeout);
        self
    }

    /// Pick the payload variant instead of detecting it.
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Use a custom payload builder. Takes precedence over [`platform`](Self::platform).
    pub fn payload_builder(mut self, builder: Arc<dyn PayloadBuilder>) -> Self {
        self.payload_builder = Some(builder);
        self
    }

    /// Build the client.
    ///
    /// Fails with [`LandmarkError::Configuration`] when no endpoints are
    /// configured, the configuration is invalid, or the HTTP client cannot
    /// be created.
    pub fn build(self) -> Result<RemoteClient> {
        let mut config = match (self.config, self.base_url) {
            (Some(config), _) => config,
            (None, Some(base_url)) => ClientConfig::from_base_url(&base_url),
            (None, None) => {
                return Err(LandmarkError::Configuration(
                    "no endpoints configured: set a config or base URL".to_string(),
                ));
            }
        };

        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }
        if let Some(timeout) = self.health_timeout {
            config.health_timeout = timeout;
        }
        if self.platform.is_some() {
            config.platform = self.platform;
        }
        config.validate()?;

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                LandmarkError::Configuration(format!("failed to build HTTP client: {e}"))
            })?;

        let payload = self
            .payload_builder
            .unwrap_or_else(|| config.platform().payload_builder());

        Ok(RemoteClient::from_parts(http, config, payload))
    }
}
