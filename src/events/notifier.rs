//! Turns lead events into notifications for the counterpart user.

use async_trait::async_trait;
use clap::ValueEnum;
use tracing::{debug, info, instrument};

use crate::clients::NotificationClient;
use crate::domain::{Lead, NotificationCreate, NotificationType, User};
use super::{DomainEvent, EventError, EventHandler};

/// Who hears about a stage change first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StageChangeRecipient {
    /// The user the lead is assigned to, falling back to its creator.
    #[default]
    Assignee,
    /// The user who created the lead, falling back to its assignee.
    Owner,
}

/// Picks the first candidate that exists and is not the actor.
fn counterpart<'a>(actor: &User, candidates: [Option<&'a str>; 2]) -> Option<&'a str> {
    candidates.into_iter().flatten().find(|id| *id != actor.id)
}

/// Event handler that writes one notification per event.
#[derive(Clone)]
pub struct NotificationDispatcher {
    notifications: NotificationClient,
    stage_recipient: StageChangeRecipient,
}

impl NotificationDispatcher {
    pub fn new(notifications: NotificationClient, stage_recipient: StageChangeRecipient) -> Self {
        Self { notifications, stage_recipient }
    }

    fn recipients_by_preference(&self, lead: &Lead) -> [Option<String>; 2] {
        let assignee = lead.assigned_to.clone();
        let owner = Some(lead.created_by.clone());
        match self.stage_recipient {
            StageChangeRecipient::Assignee => [assignee, owner],
            StageChangeRecipient::Owner => [owner, assignee],
        }
    }

    /// The notification an event should produce, if any. Never addressed to the actor.
    pub fn plan(&self, event: &DomainEvent) -> Option<NotificationCreate> {
        match event {
            DomainEvent::LeadAssigned { lead, actor } => {
                let receiver = counterpart(actor, [lead.assigned_to.as_deref(), None])?;
                Some(NotificationCreate {
                    sender: actor.id.clone(),
                    receiver: receiver.to_string(),
                    lead_id: Some(lead.id.clone()),
                    kind: NotificationType::LeadAssigned,
                    message: format!("{} assigned you a new lead", actor.full_name),
                })
            }
            DomainEvent::LeadStageChanged { lead, actor, .. } => {
                let [first, second] = self.recipients_by_preference(lead);
                let receiver = counterpart(actor, [first.as_deref(), second.as_deref()])?;
                Some(NotificationCreate {
                    sender: actor.id.clone(),
                    receiver: receiver.to_string(),
                    lead_id: Some(lead.id.clone()),
                    kind: NotificationType::LeadStageChanged,
                    message: format!("{} changed lead stage to {}", actor.full_name, lead.stage),
                })
            }
            DomainEvent::NoteCreated { lead, actor, .. } => {
                let receiver = counterpart(actor, [lead.assigned_to.as_deref(), Some(lead.created_by.as_str())])?;
                Some(NotificationCreate {
                    sender: actor.id.clone(),
                    receiver: receiver.to_string(),
                    lead_id: Some(lead.id.clone()),
                    kind: NotificationType::NoteCreated,
                    message: format!("{} added a note to lead {}", actor.full_name, lead.name),
                })
            }
        }
    }
}

#[async_trait]
impl EventHandler for NotificationDispatcher {
    fn name(&self) -> &'static str {
        "notification_dispatcher"
    }

    #[instrument(name = "notification_dispatcher", skip_all, fields(event = event.name()))]
    async fn handle(&self, event: &DomainEvent) -> Result<(), EventError> {
        let Some(params) = self.plan(event) else {
            debug!("No counterpart to notify");
            return Ok(());
        };
        let notification = self
            .notifications
            .notify(params)
            .await
            .map_err(|e| EventError { handler: self.name(), reason: e.to_string() })?;
        info!(notification_id = %notification.id, receiver = %notification.receiver, "Notification written");
        Ok(())
    }
}
