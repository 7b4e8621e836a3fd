//! Client configuration.
//!
//! A [`ClientConfig`] names the three service endpoints and the request
//! timeouts. It can be built in code or loaded from a TOML file with the
//! following resolution order:
//! 1. explicit path (e.g. `--config <path>`)
//! 2. `~/.landmark/config.toml` (user)
//! 3. `/etc/landmark/config.toml` (system)
//!
//! A file may give a single `base_url` instead of the three endpoint URLs:
//!
//! ```toml
//! base_url = "http://192.168.1.20:8000/api"
//! timeout_ms = 30000
//! health_timeout_ms = 5000
//! platform = "native"
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::payload::Platform;
use crate::{LandmarkError, Result};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Timeout applied to health checks instead of the default.
pub const DEFAULT_HEALTH_TIMEOUT: Duration = Duration::from_millis(5_000);

/// Endpoint paths appended to a base URL.
const PREDICT_PATH: &str = "predict";
const HISTORY_PATH: &str = "history";
const HEALTH_PATH: &str = "health";

/// Endpoints and timeouts for a [`RemoteClient`](crate::RemoteClient).
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub predict_url: String,
    pub history_url: String,
    pub health_url: String,
    /// Default timeout for every request.
    pub timeout: Duration,
    /// Timeout for health checks.
    pub health_timeout: Duration,
    /// Payload variant; detected from the build target when `None`.
    pub platform: Option<Platform>,
}

impl ClientConfig {
    /// Configuration with explicit endpoint URLs and default timeouts.
    pub fn new(
        predict_url: impl Into<String>,
        history_url: impl Into<String>,
        health_url: impl Into<String>,
    ) -> Self {
        Self {
            predict_url: predict_url.into(),
            history_url: history_url.into(),
            health_url: health_url.into(),
            timeout: DEFAULT_TIMEOUT,
            health_timeout: DEFAULT_HEALTH_TIMEOUT,
            platform: None,
        }
    }

    /// Derive `{base}/predict`, `{base}/history` and `{base}/health`.
    pub fn from_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self::new(
            format!("{base}/{PREDICT_PATH}"),
            format!("{base}/{HISTORY_PATH}"),
            format!("{base}/{HEALTH_PATH}"),
        )
    }

    /// Check that every endpoint is set and every timeout is non-zero.
    pub fn validate(&self) -> Result<()> {
        for (name, url) in [
            ("predict_url", &self.predict_url),
            ("history_url", &self.history_url),
            ("health_url", &self.health_url),
        ] {
            if url.trim().is_empty() {
                return Err(LandmarkError::Configuration(format!("{name} is not set")));
            }
        }
        if self.timeout.is_zero() {
            return Err(LandmarkError::Configuration(
                "timeout must be greater than zero".to_string(),
            ));
        }
        if self.health_timeout.is_zero() {
            return Err(LandmarkError::Configuration(
                "health_timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Platform to build payloads for.
    pub fn platform(&self) -> Platform {
        self.platform.unwrap_or_else(Platform::detect)
    }

    /// Load configuration from the standard locations.
    ///
    /// Resolution order:
    /// 1. Explicit path (if provided)
    /// 2. `~/.landmark/config.toml`
    /// 3. `/etc/landmark/config.toml`
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let path = Self::resolve_config_path(explicit_path)?;
        let content = fs::read_to_string(&path).map_err(|e| {
            LandmarkError::Configuration(format!("failed to read config file {path:?}: {e}"))
        })?;
        Self::from_toml(&content).map_err(|e| match e {
            LandmarkError::Configuration(msg) => {
                LandmarkError::Configuration(format!("{msg} (in {path:?})"))
            }
            other => other,
        })
    }

    /// Parse and validate a TOML configuration document.
    pub fn from_toml(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content).map_err(|e| {
            LandmarkError::Configuration(format!("failed to parse config: {e}"))
        })?;
        let config = file.resolve();
        config.validate()?;
        Ok(config)
    }

    /// Resolve the config file path.
    fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(path.to_path_buf());
            }
            return Err(LandmarkError::Configuration(format!(
                "config file not found: {path:?}"
            )));
        }

        // User config
        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".landmark").join("config.toml");
            if user_config.exists() {
                return Ok(user_config);
            }
        }

        // System config
        let system_config = PathBuf::from("/etc/landmark/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }

        Err(LandmarkError::Configuration(
            "no config file found; create ~/.landmark/config.toml or /etc/landmark/config.toml"
                .to_string(),
        ))
    }
}

/// On-disk shape of the configuration file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    predict_url: Option<String>,
    #[serde(default)]
    history_url: Option<String>,
    #[serde(default)]
    health_url: Option<String>,
    #[serde(default = "default_timeout_ms")]
    timeout_ms: u64,
    #[serde(default = "default_health_timeout_ms")]
    health_timeout_ms: u64,
    #[serde(default)]
    platform: Option<Platform>,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT.as_millis() as u64
}

fn default_health_timeout_ms() -> u64 {
    DEFAULT_HEALTH_TIMEOUT.as_millis() as u64
}

impl ConfigFile {
    /// Explicit endpoint URLs win over ones derived from `base_url`.
    fn resolve(self) -> ClientConfig {
        let derived = self
            .base_url
            .as_deref()
            .map(ClientConfig::from_base_url)
            .unwrap_or_else(|| ClientConfig::new("", "", ""));

        ClientConfig {
            predict_url: self.predict_url.unwrap_or(derived.predict_url),
            history_url: self.history_url.unwrap_or(derived.history_url),
            health_url: self.health_url.unwrap_or(derived.health_url),
            timeout: Duration::from_millis(self.timeout_ms),
            health_timeout: Duration::from_millis(self.health_timeout_ms),
            platform: self.platform,
        }
    }
}
