use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::auth::TokenError;
use crate::lead_actor::LeadError;
use crate::notification_actor::NotificationError;
use crate::user_actor::UserError;

/// Errors surfaced to HTTP callers. Bodies are always `{"message": ...}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Validation(String),
    /// Logged server-side; the caller only sees a generic message.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn forbidden() -> Self {
        Self::Forbidden("You are not allowed to perform this action".to_string())
    }

    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            Self::Internal(detail) => {
                error!(%detail, "Request failed");
                "Internal server error".to_string()
            }
            Self::Unauthorized(m)
            | Self::Forbidden(m)
            | Self::NotFound(m)
            | Self::Conflict(m)
            | Self::Validation(m) => m,
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(error: UserError) -> Self {
        match error {
            UserError::NotFound(_) => Self::NotFound(error.to_string()),
            UserError::AlreadyExists(_) => Self::Conflict(error.to_string()),
            UserError::ValidationError(m) => Self::Validation(m),
            UserError::AuthenticationFailed => Self::Unauthorized("Invalid email or password".to_string()),
            UserError::HashError(_) | UserError::ActorCommunicationError(_) => Self::Internal(error.to_string()),
        }
    }
}

impl From<LeadError> for ApiError {
    fn from(error: LeadError) -> Self {
        match error {
            LeadError::NotFound(_) => Self::NotFound(error.to_string()),
            LeadError::ValidationError(m) => Self::Validation(m),
            // A token for a user that no longer exists.
            LeadError::InvalidUser(_) => Self::Unauthorized(error.to_string()),
            LeadError::ActorCommunicationError(_) => Self::Internal(error.to_string()),
        }
    }
}

impl From<NotificationError> for ApiError {
    fn from(error: NotificationError) -> Self {
        match error {
            NotificationError::NotFound(_) => Self::NotFound(error.to_string()),
            NotificationError::NotReceiver(_) => Self::forbidden(),
            NotificationError::ValidationError(m) => Self::Validation(m),
            NotificationError::ActorCommunicationError(_) => Self::Internal(error.to_string()),
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::Invalid(_) => Self::Unauthorized("Invalid or expired token".to_string()),
            TokenError::Encode(_) => Self::Internal(error.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}
