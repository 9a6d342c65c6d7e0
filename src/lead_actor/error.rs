//! Error types for the lead store.

use crate::error::ApiError;
use thiserror::Error;

/// Errors that can occur during lead operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LeadError {
    /// The leads backend rejected the call or could not be reached.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// An error occurred while communicating with the store actor.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for LeadError {
    fn from(msg: String) -> Self {
        LeadError::ActorCommunicationError(msg)
    }
}
