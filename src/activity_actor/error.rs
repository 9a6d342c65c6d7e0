//! Error types for the lead-activity store.

use crate::error::ApiError;
use thiserror::Error;

/// Errors that can occur during lead-activity operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ActivityError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for ActivityError {
    fn from(msg: String) -> Self {
        ActivityError::ActorCommunicationError(msg)
    }
}
