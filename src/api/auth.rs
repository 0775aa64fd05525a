use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::{can_perform, Action, Resource};
use crate::clients::Registration;
use crate::domain::{Role, User};
use super::{ApiError, AppState, AuthUser, MaybeAuthUser};

/// Login request DTO
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response DTO
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// Registration request DTO
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Option<Role>,
}

pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(request) = body?;
    let user = state.users.authenticate(&request.email, &request.password).await?;
    let token = state.tokens.issue(&user)?;
    info!(user_id = %user.id, "POST /api/auth/login");
    Ok(Json(LoginResponse { token, user }))
}

pub async fn register(
    State(state): State<AppState>,
    MaybeAuthUser(actor): MaybeAuthUser,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let Json(request) = body?;
    let role = request.role.unwrap_or(Role::Staff);
    if !can_perform(actor.as_ref(), Action::RegisterUser(role), Resource::None) {
        return Err(ApiError::forbidden());
    }

    let user = state
        .users
        .register(Registration {
            full_name: request.full_name,
            email: request.email,
            password: request.password,
            role,
        })
        .await?;
    info!(user_id = %user.id, role = %user.role, "POST /api/auth/register");
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn me(State(state): State<AppState>, AuthUser(actor): AuthUser) -> Result<Json<User>, ApiError> {
    let user = state
        .users
        .get_user(actor.id.clone())
        .await?
        .ok_or_else(|| ApiError::Unauthorized(format!("Unknown user: {}", actor.id)))?;
    Ok(Json(user))
}
