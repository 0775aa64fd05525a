//! Domain events raised by lead mutations.
//!
//! Mutations call [`EventBus::emit`]; handlers registered with
//! [`EventBus::on_event`] decide what to do with each event. Delivery is
//! synchronous: `emit` returns after every handler has run, so a caller that awaits
//! it knows side effects have been attempted. It is not transactional with the
//! mutation that raised the event.

pub mod notifier;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{Lead, LeadStage, Note, User};

pub use notifier::{NotificationDispatcher, StageChangeRecipient};

/// Something that happened to a lead, together with who did it.
#[derive(Debug, Clone)]
pub enum DomainEvent {
    /// `lead.assigned_to` was set at creation or changed by an update.
    LeadAssigned { lead: Lead, actor: User },
    LeadStageChanged { lead: Lead, actor: User, previous_stage: LeadStage },
    NoteCreated { lead: Lead, actor: User, note: Note },
}

impl DomainEvent {
    pub fn name(&self) -> &'static str {
        match self {
            DomainEvent::LeadAssigned { .. } => "lead_assigned",
            DomainEvent::LeadStageChanged { .. } => "lead_stage_changed",
            DomainEvent::NoteCreated { .. } => "note_created",
        }
    }

    pub fn lead(&self) -> &Lead {
        match self {
            DomainEvent::LeadAssigned { lead, .. }
            | DomainEvent::LeadStageChanged { lead, .. }
            | DomainEvent::NoteCreated { lead, .. } => lead,
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
#[error("event handler {handler} failed: {reason}")]
pub struct EventError {
    pub handler: &'static str,
    pub reason: String,
}

/// Receives every emitted event.
#[async_trait]
pub trait EventHandler: Send + Sync {
    fn name(&self) -> &'static str;

    async fn handle(&self, event: &DomainEvent) -> Result<(), EventError>;
}

/// Fan-out point between mutations and their side effects.
#[derive(Clone, Default)]
pub struct EventBus {
    handlers: Vec<Arc<dyn EventHandler>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_event(&mut self, handler: Arc<dyn EventHandler>) {
        debug!(handler = handler.name(), "Registering event handler");
        self.handlers.push(handler);
    }

    /// Runs every handler in registration order. A failing handler does not stop
    /// the others; the last failure is returned.
    pub async fn emit(&self, event: DomainEvent) -> Result<(), EventError> {
        debug!(event = event.name(), lead_id = %event.lead().id, "Emitting event");
        let mut outcome = Ok(());
        for handler in &self.handlers {
            if let Err(e) = handler.handle(&event).await {
                warn!(error = %e, event = event.name(), "Event handler failed");
                outcome = Err(e);
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LeadStage;
    use chrono::Utc;
    use std::sync::Mutex;

    struct Recorder {
        seen: Mutex<Vec<&'static str>>,
        fail: bool,
    }

    #[async_trait]
    impl EventHandler for Recorder {
        fn name(&self) -> &'static str { "recorder" }

        async fn handle(&self, event: &DomainEvent) -> Result<(), EventError> {
            self.seen.lock().unwrap().push(event.name());
            if self.fail {
                return Err(EventError { handler: "recorder", reason: "boom".into() });
            }
            Ok(())
        }
    }

    fn event() -> DomainEvent {
        let now = Utc::now();
        DomainEvent::LeadAssigned {
            lead: Lead {
                id: "lead_1".into(),
                name: "Test Lead".into(),
                email: "lead@test.com".into(),
                phone: None,
                assigned_to: Some("staff".into()),
                created_by: "admin".into(),
                stage: LeadStage::New,
                source: "Website".into(),
                notes: Vec::new(),
                created_at: now,
                updated_at: now,
            },
            actor: User {
                id: "admin".into(),
                full_name: "Ada Admin".into(),
                email: "admin@test.com".into(),
                password_hash: String::new(),
                role: crate::domain::Role::Admin,
                created_at: now,
            },
        }
    }

    #[tokio::test]
    async fn test_every_handler_runs_even_after_a_failure() {
        let failing = Arc::new(Recorder { seen: Mutex::new(Vec::new()), fail: true });
        let healthy = Arc::new(Recorder { seen: Mutex::new(Vec::new()), fail: false });
        let mut bus = EventBus::new();
        bus.on_event(failing.clone());
        bus.on_event(healthy.clone());

        let result = bus.emit(event()).await;
        assert_eq!(result.unwrap_err().reason, "boom");
        assert_eq!(*failing.seen.lock().unwrap(), vec!["lead_assigned"]);
        assert_eq!(*healthy.seen.lock().unwrap(), vec!["lead_assigned"]);
    }

    #[tokio::test]
    async fn test_emit_without_handlers_is_ok() {
        assert!(EventBus::new().emit(event()).await.is_ok());
    }
}
