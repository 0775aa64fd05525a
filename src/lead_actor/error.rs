use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors that can occur during lead operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LeadError {
    #[error("Lead not found: {0}")]
    NotFound(String),
    #[error("Invalid user: {0}")]
    InvalidUser(String),
    #[error("Lead validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for LeadError {
    fn from(error: FrameworkError) -> Self {
        match error {
            FrameworkError::NotFound(id) => LeadError::NotFound(id),
            FrameworkError::Rejected(reason) => LeadError::ValidationError(reason),
            FrameworkError::Conflict(existing) => LeadError::ValidationError(format!("conflicts with lead {}", existing)),
            other => LeadError::ActorCommunicationError(other.to_string()),
        }
    }
}
