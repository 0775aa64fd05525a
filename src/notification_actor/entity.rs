use chrono::Utc;

use crate::actor_framework::Entity;
use crate::domain::{Notification, NotificationCreate, NotificationQuery};
use super::actions::{NotificationAction, NotificationActionResult};

impl Entity for Notification {
    type Id = String;
    type CreateParams = NotificationCreate;
    type Patch = (); // Notifications are append-only apart from MarkRead
    type Query = NotificationQuery;
    type Action = NotificationAction;
    type ActionResult = NotificationActionResult;

    fn id(&self) -> &String { &self.id }

    /// Creates a new, unread Notification.
    fn from_create_params(id: String, params: NotificationCreate) -> Result<Self, String> {
        if params.sender == params.receiver {
            return Err("a notification cannot be addressed to its sender".to_string());
        }
        Ok(Self {
            id,
            sender: params.sender,
            receiver: params.receiver,
            lead_id: params.lead_id,
            kind: params.kind,
            message: params.message,
            is_read: false,
            created_at: Utc::now(),
        })
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), String> {
        Ok(())
    }

    fn matches(&self, query: &NotificationQuery) -> bool {
        match query {
            NotificationQuery::ForReceiver { receiver, unread_only } => {
                &self.receiver == receiver && (!unread_only || !self.is_read)
            }
        }
    }

    fn handle_action(&mut self, action: NotificationAction) -> Result<NotificationActionResult, String> {
        match action {
            NotificationAction::MarkRead => {
                let was_unread = !self.is_read;
                self.is_read = true;
                Ok(NotificationActionResult::MarkedRead { notification: self.clone(), was_unread })
            }
        }
    }
}
