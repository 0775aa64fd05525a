use chrono::Utc;
use uuid::Uuid;

use crate::actor_framework::Entity;
use crate::domain::{is_valid_email, Lead, LeadCreate, LeadPatch, LeadQuery, Note};
use super::actions::{LeadAction, LeadActionResult, LeadChange};

fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("name is required".to_string());
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), String> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(format!("invalid email: {}", email.trim()))
    }
}

impl Lead {
    fn apply(&mut self, patch: LeadPatch) -> Result<(), String> {
        if let Some(name) = &patch.name {
            validate_name(name)?;
        }
        if let Some(email) = &patch.email {
            validate_email(email)?;
        }
        if let Some(name) = patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(email) = patch.email {
            self.email = email.trim().to_string();
        }
        if let Some(phone) = patch.phone {
            self.phone = Some(phone);
        }
        if let Some(source) = patch.source {
            self.source = source;
        }
        if let Some(stage) = patch.stage {
            self.stage = stage;
        }
        if let Some(assigned_to) = patch.assigned_to {
            // Blank clears the assignment.
            self.assigned_to = Some(assigned_to).filter(|id| !id.trim().is_empty());
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}

impl Entity for Lead {
    type Id = String;
    type CreateParams = LeadCreate;
    type Patch = LeadPatch;
    type Query = LeadQuery;
    type Action = LeadAction;
    type ActionResult = LeadActionResult;

    fn id(&self) -> &String { &self.id }

    /// Creates a new Lead from creation parameters.
    ///
    /// # Errors
    /// Rejects an empty name or a malformed email.
    fn from_create_params(id: String, params: LeadCreate) -> Result<Self, String> {
        validate_name(&params.name)?;
        validate_email(&params.email)?;
        let now = Utc::now();
        Ok(Self {
            id,
            name: params.name.trim().to_string(),
            email: params.email.trim().to_string(),
            phone: params.phone,
            assigned_to: params.assigned_to,
            created_by: params.created_by,
            stage: params.stage,
            source: params.source,
            notes: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    fn on_update(&mut self, patch: LeadPatch) -> Result<(), String> {
        self.apply(patch)
    }

    fn matches(&self, query: &LeadQuery) -> bool {
        match query {
            LeadQuery::All => true,
            LeadQuery::Involving(user_id) => self.involves(user_id),
        }
    }

    /// Handles lead-specific actions.
    ///
    /// # Actions
    /// - `Apply(patch)`: Updates fields and returns the previous stage and assignee
    /// - `AddNote { author, body }`: Appends a note
    fn handle_action(&mut self, action: LeadAction) -> Result<LeadActionResult, String> {
        match action {
            LeadAction::Apply(patch) => {
                let previous_stage = self.stage;
                let previous_assignee = self.assigned_to.clone();
                self.apply(patch)?;
                Ok(LeadActionResult::Applied(LeadChange {
                    lead: self.clone(),
                    previous_stage,
                    previous_assignee,
                }))
            }
            LeadAction::AddNote { author, body } => {
                if body.trim().is_empty() {
                    return Err("note body is required".to_string());
                }
                let note = Note {
                    id: Uuid::new_v4().to_string(),
                    author,
                    body: body.trim().to_string(),
                    created_at: Utc::now(),
                };
                self.notes.push(note.clone());
                self.updated_at = note.created_at;
                Ok(LeadActionResult::NoteAdded { lead: self.clone(), note })
            }
        }
    }
}
