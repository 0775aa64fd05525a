use axum::extract::State;
use axum::Json;

use crate::auth::{can_perform, Action, Resource};
use crate::domain::{User, UserQuery};
use super::{ApiError, AppState, AuthUser};

pub async fn list_users(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
) -> Result<Json<Vec<User>>, ApiError> {
    if !can_perform(Some(&actor), Action::ListUsers, Resource::None) {
        return Err(ApiError::forbidden());
    }
    Ok(Json(state.users.list_users(UserQuery::All).await?))
}
