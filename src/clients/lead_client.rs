use tracing::{debug, error, info, instrument, warn};

use crate::actor_framework::ResourceClient;
use crate::auth::Actor;
use crate::clients::UserClient;
use crate::domain::{Lead, LeadCreate, LeadPatch, LeadQuery, LeadStage, User, DEFAULT_LEAD_SOURCE};
use crate::events::{DomainEvent, EventBus};
use crate::lead_actor::{LeadAction, LeadActionResult, LeadError};
use crate::user_actor::UserError;

/// Input for a new lead, before the creator is known.
#[derive(Debug, Clone, Default)]
pub struct LeadDraft {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub assigned_to: Option<String>,
    pub stage: Option<LeadStage>,
    pub source: Option<String>,
}

/// Client for interacting with the Lead actor.
///
/// Mutations resolve the acting user, apply the change in the lead actor, then
/// emit the matching domain event. Event delivery failures are logged and do not
/// undo the mutation.
#[derive(Clone)]
pub struct LeadClient {
    inner: ResourceClient<Lead>,
    user_client: UserClient,
    events: EventBus,
}

impl_client_methods!(LeadClient, Lead, LeadQuery, LeadError, lead);
impl_client_delete!(LeadClient, LeadError, lead);

impl LeadClient {
    pub fn new(inner: ResourceClient<Lead>, user_client: UserClient, events: EventBus) -> Self {
        Self { inner, user_client, events }
    }

    async fn resolve_actor(&self, actor: &Actor) -> Result<User, LeadError> {
        match self.user_client.get_user(actor.id.clone()).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => {
                error!(actor_id = %actor.id, "Acting user not found");
                Err(LeadError::InvalidUser(actor.id.clone()))
            }
            Err(e) => Err(user_lookup_failed(e)),
        }
    }

    async fn ensure_assignee_exists(&self, assignee: &str) -> Result<(), LeadError> {
        match self.user_client.get_user(assignee.to_string()).await {
            Ok(Some(user)) => {
                debug!(assignee = %user.id, "Assignee validation successful");
                Ok(())
            }
            Ok(None) => Err(LeadError::ValidationError(format!("unknown assignee: {}", assignee))),
            Err(e) => Err(user_lookup_failed(e)),
        }
    }

    async fn publish(&self, event: DomainEvent) {
        if let Err(e) = self.events.emit(event).await {
            warn!(error = %e, "Side effect failed; lead change kept");
        }
    }

    #[instrument(skip(self, draft), fields(actor_id = %actor.id, assigned_to = ?draft.assigned_to))]
    pub async fn create_lead(&self, draft: LeadDraft, actor: &Actor) -> Result<Lead, LeadError> {
        info!("Processing create_lead request");

        // Step 1: Resolve the acting user
        let actor_user = self.resolve_actor(actor).await?;

        // Step 2: Validate assignee
        let assigned_to = draft.assigned_to.filter(|id| !id.trim().is_empty());
        if let Some(assignee) = &assigned_to {
            self.ensure_assignee_exists(assignee).await?;
        }

        // Step 3: Create lead in ResourceActor
        let params = LeadCreate {
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            assigned_to,
            created_by: actor_user.id.clone(),
            stage: draft.stage.unwrap_or_default(),
            source: draft.source.unwrap_or_else(|| DEFAULT_LEAD_SOURCE.to_string()),
        };
        debug!("Sending request");
        let lead = self.inner.create(params).await?;
        info!(lead_id = %lead.id, "Lead created");

        // Step 4: Notify the assignee
        if lead.assigned_to.is_some() {
            self.publish(DomainEvent::LeadAssigned { lead: lead.clone(), actor: actor_user }).await;
        }
        Ok(lead)
    }

    #[instrument(skip(self, patch), fields(actor_id = %actor.id, stage = ?patch.stage))]
    pub async fn update_lead(&self, id: String, patch: LeadPatch, actor: &Actor) -> Result<Lead, LeadError> {
        info!("Processing update_lead request");
        let actor_user = self.resolve_actor(actor).await?;
        if let Some(assignee) = patch.assigned_to.as_deref().filter(|id| !id.trim().is_empty()) {
            self.ensure_assignee_exists(assignee).await?;
        }

        debug!("Sending request");
        let change = match self.inner.perform_action(id, LeadAction::Apply(patch)).await? {
            LeadActionResult::Applied(change) => change,
            other => {
                return Err(LeadError::ActorCommunicationError(format!("Unexpected result: {:?}", other)));
            }
        };
        info!(lead_id = %change.lead.id, "Lead updated");

        if change.reassigned_to().is_some() {
            self.publish(DomainEvent::LeadAssigned { lead: change.lead.clone(), actor: actor_user.clone() })
                .await;
        }
        if change.stage_changed().is_some() {
            self.publish(DomainEvent::LeadStageChanged {
                lead: change.lead.clone(),
                actor: actor_user,
                previous_stage: change.previous_stage,
            })
            .await;
        }
        Ok(change.lead)
    }

    #[instrument(skip(self, body), fields(actor_id = %actor.id))]
    pub async fn add_note(&self, id: String, body: String, actor: &Actor) -> Result<Lead, LeadError> {
        let actor_user = self.resolve_actor(actor).await?;

        debug!("Sending request");
        let action = LeadAction::AddNote { author: actor_user.id.clone(), body };
        match self.inner.perform_action(id, action).await? {
            LeadActionResult::NoteAdded { lead, note } => {
                info!(lead_id = %lead.id, note_id = %note.id, "Note added");
                self.publish(DomainEvent::NoteCreated { lead: lead.clone(), actor: actor_user, note }).await;
                Ok(lead)
            }
            other => Err(LeadError::ActorCommunicationError(format!("Unexpected result: {:?}", other))),
        }
    }
}

fn user_lookup_failed(e: UserError) -> LeadError {
    error!(error = %e, "User lookup failed");
    LeadError::ActorCommunicationError(format!("User lookup failed: {}", e))
}
