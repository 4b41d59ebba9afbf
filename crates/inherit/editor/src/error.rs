use inherit_types::{ContentId, HostError};
use thiserror::Error;

/// Errors raised while preparing an authoring view.
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("content item not found: {0}")]
    NotFound(ContentId),

    #[error("host error: {0}")]
    Host(#[from] HostError),
}
