use inherit_types::{ContentId, HostError};
use thiserror::Error;

/// Errors from the password challenge.
#[derive(Error, Debug)]
pub enum GateError {
    #[error("content item {0} is not password protected")]
    NotProtected(ContentId),

    #[error("incorrect password for content item {0}")]
    IncorrectPassword(ContentId),

    #[error("host error: {0}")]
    Host(#[from] HostError),
}
