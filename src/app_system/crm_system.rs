use std::sync::Arc;

use tracing::{error, info};
use uuid::Uuid;

use crate::actor_framework::ResourceActor;
use crate::auth::PasswordService;
use crate::clients::{LeadClient, NotificationClient, Registration, UserClient};
use crate::domain::{Lead, Notification, Role, User};
use crate::events::{EventBus, NotificationDispatcher, StageChangeRecipient};
use crate::user_actor::UserError;

/// Knobs for building a [`CrmSystem`].
#[derive(Clone, Default)]
pub struct SystemConfig {
    /// Mailbox capacity of each entity actor. Zero means the default.
    pub mailbox: usize,
    pub stage_recipient: StageChangeRecipient,
    pub passwords: PasswordService,
}

const DEFAULT_MAILBOX: usize = 32;

fn next_id() -> String {
    Uuid::new_v4().to_string()
}

/// The main application system that orchestrates all actors.
///
/// Responsible for starting up actors, wiring them together, and handling shutdown.
pub struct CrmSystem {
    pub user_client: UserClient,
    pub lead_client: LeadClient,
    pub notification_client: NotificationClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl CrmSystem {
    /// Starts every actor. Must be called from within a tokio runtime.
    pub fn new(config: SystemConfig) -> Self {
        let mailbox = if config.mailbox == 0 { DEFAULT_MAILBOX } else { config.mailbox };

        // 1. Setup User Service
        let (user_actor, user_resource_client) = ResourceActor::<User>::new(mailbox, next_id);
        let user_client = UserClient::new(user_resource_client, config.passwords);
        let user_handle = tokio::spawn(user_actor.run());

        // 2. Setup Notification Service
        let (notification_actor, notification_resource_client) =
            ResourceActor::<Notification>::new(mailbox, next_id);
        let notification_client = NotificationClient::new(notification_resource_client);
        let notification_handle = tokio::spawn(notification_actor.run());

        // 3. Wire lead events to notifications
        let mut events = EventBus::new();
        events.on_event(Arc::new(NotificationDispatcher::new(
            notification_client.clone(),
            config.stage_recipient,
        )));

        // 4. Setup Lead Service
        let (lead_actor, lead_resource_client) = ResourceActor::<Lead>::new(mailbox, next_id);
        let lead_client = LeadClient::new(lead_resource_client, user_client.clone(), events);
        let lead_handle = tokio::spawn(lead_actor.run());

        info!(mailbox, stage_recipient = ?config.stage_recipient, "CRM system started");

        Self {
            user_client,
            lead_client,
            notification_client,
            handles: vec![user_handle, notification_handle, lead_handle],
        }
    }

    /// Creates the given admin account unless one with that email already exists.
    pub async fn seed_admin(&self, full_name: &str, email: &str, password: &str) -> Result<User, UserError> {
        if let Some(existing) = self.user_client.find_by_email(email).await? {
            info!(user_id = %existing.id, "Seed admin already present");
            return Ok(existing);
        }
        self.user_client
            .register(Registration {
                full_name: full_name.to_string(),
                email: email.to_string(),
                password: password.to_string(),
                role: Role::Admin,
            })
            .await
    }

    /// Drops this system's clients and waits for the actors to drain.
    ///
    /// Actors stop once every client clone is gone, so any clones handed out (for
    /// example to the HTTP state) must be dropped first.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.lead_client);
        drop(self.notification_client);
        drop(self.user_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
