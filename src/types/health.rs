//! Health check outcome

use std::fmt;

/// Outcome of a health check.
///
/// Health checks never fail with an error; every failure mode is folded
/// into [`HealthStatus::Unhealthy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Unhealthy(HealthFailure),
}

/// Why a health check did not report healthy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthFailure {
    /// The service answered with a status other than 200.
    Status(u16),
    /// The request never produced a response (timeout, refused, DNS...).
    Transport(String),
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthStatus::Healthy)
    }
}

impl From<HealthStatus> for bool {
    fn from(status: HealthStatus) -> Self {
        status.is_healthy()
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthStatus::Healthy => write!(f, "healthy"),
            HealthStatus::Unhealthy(failure) => write!(f, "unhealthy: {failure}"),
        }
    }
}

impl fmt::Display for HealthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthFailure::Status(code) => write!(f, "HTTP {code}"),
            HealthFailure::Transport(msg) => write!(f, "{msg}"),
        }
    }
}
