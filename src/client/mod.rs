//! [`RemoteClient`] — HTTP client for the landmark prediction service.

mod builder;
mod remote;

pub use builder::RemoteClientBuilder;
pub use remote::{DEFAULT_HISTORY_LIMIT, RemoteClient};
