use inherit_gate::GateError;
use inherit_types::{ContentId, HostError};
use thiserror::Error;

pub type HostAdapterResult<T> = Result<T, HostAdapterError>;

/// Errors surfaced at the host boundary.
#[derive(Error, Debug)]
pub enum HostAdapterError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("host error: {0}")]
    Host(#[from] HostError),

    #[error("password challenge: {0}")]
    Gate(#[from] GateError),

    #[error("content item not found: {0}")]
    NotFound(ContentId),

    #[error("logging setup failed: {0}")]
    Logging(String),
}
