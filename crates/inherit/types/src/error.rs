use thiserror::Error;

use crate::content::ContentId;

/// Result type for host collaborator calls.
pub type HostResult<T> = Result<T, HostError>;

/// Errors surfaced by host collaborators.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("content item not found: {0}")]
    NotFound(ContentId),

    #[error("backend error: {0}")]
    Backend(String),

    #[error("credential verification failed: {0}")]
    Verification(String),

    #[error("{0} lock poisoned")]
    LockPoisoned(&'static str),
}
