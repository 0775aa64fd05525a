use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors that can occur during notification operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum NotificationError {
    #[error("Notification not found: {0}")]
    NotFound(String),
    #[error("Notification belongs to another user: {0}")]
    NotReceiver(String),
    #[error("Notification validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for NotificationError {
    fn from(error: FrameworkError) -> Self {
        match error {
            FrameworkError::NotFound(id) => NotificationError::NotFound(id),
            FrameworkError::Rejected(reason) => NotificationError::ValidationError(reason),
            FrameworkError::Conflict(existing) => NotificationError::ValidationError(format!("conflicts with notification {}", existing)),
            other => NotificationError::ActorCommunicationError(other.to_string()),
        }
    }
}
