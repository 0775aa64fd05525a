use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What happened to produce a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationType {
    LeadAssigned,
    LeadStageChanged,
    NoteCreated,
}

/// A message from one user to another about a lead event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub sender: String,
    pub receiver: String,
    pub lead_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a new notification.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationCreate {
    pub sender: String,
    pub receiver: String,
    pub lead_id: Option<String>,
    pub kind: NotificationType,
    pub message: String,
}

/// Selection used when listing notifications.
#[derive(Debug, Clone)]
pub enum NotificationQuery {
    ForReceiver { receiver: String, unread_only: bool },
}
