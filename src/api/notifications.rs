use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::{can_perform, Action, Resource};
use crate::domain::Notification;
use crate::notification_actor::NotificationError;
use super::{ApiError, AppState, AuthUser};

#[derive(Debug, Default, Deserialize)]
pub struct InboxParams {
    #[serde(default)]
    pub unread: bool,
}

#[derive(Debug, Serialize)]
pub struct UnreadCount {
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct MarkedAll {
    pub updated: usize,
}

/// The caller's notifications, newest first.
pub async fn list_notifications(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    params: Result<Query<InboxParams>, QueryRejection>,
) -> Result<Json<Vec<Notification>>, ApiError> {
    let Query(params) = params?;
    Ok(Json(state.notifications.inbox(&actor.id, params.unread).await?))
}

pub async fn unread_count(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
) -> Result<Json<UnreadCount>, ApiError> {
    let count = state.notifications.unread_count(&actor.id).await?;
    Ok(Json(UnreadCount { count }))
}

pub async fn mark_all_read(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
) -> Result<Json<MarkedAll>, ApiError> {
    let updated = state.notifications.mark_all_read(&actor.id).await?;
    Ok(Json(MarkedAll { updated }))
}

pub async fn mark_read(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Notification>, ApiError> {
    let notification = state.notifications.find_notification(id).await?;
    if !can_perform(Some(&actor), Action::ReadNotification, Resource::Notification(&notification)) {
        return Err(NotificationError::NotReceiver(notification.id).into());
    }
    Ok(Json(state.notifications.mark_read(notification.id).await?))
}
