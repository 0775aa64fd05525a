use tracing::{debug, info, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::{Notification, NotificationCreate, NotificationQuery};
use crate::notification_actor::{NotificationAction, NotificationActionResult, NotificationError};

/// Client for interacting with the Notification actor.
#[derive(Clone)]
pub struct NotificationClient {
    inner: ResourceClient<Notification>,
}

impl_basic_client!(NotificationClient, Notification, NotificationQuery, NotificationError, notification);

impl NotificationClient {
    #[instrument(skip(self, params), fields(receiver = %params.receiver, kind = ?params.kind))]
    pub async fn notify(&self, params: NotificationCreate) -> Result<Notification, NotificationError> {
        debug!("Sending request");
        Ok(self.inner.create(params).await?)
    }

    /// Notifications addressed to `receiver`, newest first.
    #[instrument(skip(self))]
    pub async fn inbox(&self, receiver: &str, unread_only: bool) -> Result<Vec<Notification>, NotificationError> {
        let mut notifications = self
            .list_notifications(NotificationQuery::ForReceiver {
                receiver: receiver.to_string(),
                unread_only,
            })
            .await?;
        notifications.reverse();
        Ok(notifications)
    }

    #[instrument(skip(self))]
    pub async fn unread_count(&self, receiver: &str) -> Result<usize, NotificationError> {
        Ok(self.inbox(receiver, true).await?.len())
    }

    #[instrument(skip(self))]
    pub async fn mark_read(&self, id: String) -> Result<Notification, NotificationError> {
        debug!("Sending request");
        match self.inner.perform_action(id, NotificationAction::MarkRead).await? {
            NotificationActionResult::MarkedRead { notification, .. } => Ok(notification),
        }
    }

    /// Marks everything unread for `receiver`; returns how many changed.
    #[instrument(skip(self))]
    pub async fn mark_all_read(&self, receiver: &str) -> Result<usize, NotificationError> {
        let mut updated = 0;
        for notification in self.inbox(receiver, true).await? {
            match self.inner.perform_action(notification.id, NotificationAction::MarkRead).await? {
                NotificationActionResult::MarkedRead { was_unread: true, .. } => updated += 1,
                NotificationActionResult::MarkedRead { .. } => {}
            }
        }
        info!(updated, "Marked notifications read");
        Ok(updated)
    }
}
