use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors that can occur during user operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(String),
    #[error("User already exists: {0}")]
    AlreadyExists(String),
    #[error("User validation error: {0}")]
    ValidationError(String),
    #[error("Invalid credentials")]
    AuthenticationFailed,
    #[error("Password hashing error: {0}")]
    HashError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for UserError {
    fn from(error: FrameworkError) -> Self {
        match error {
            FrameworkError::NotFound(id) => UserError::NotFound(id),
            FrameworkError::Rejected(reason) => UserError::ValidationError(reason),
            FrameworkError::Conflict(existing) => UserError::AlreadyExists(existing),
            other => UserError::ActorCommunicationError(other.to_string()),
        }
    }
}
