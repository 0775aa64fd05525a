use crate::domain::{Lead, LeadPatch, LeadStage, Note};

/// Custom actions for Lead entities.
///
/// These run inside the lead actor so the before/after state of a mutation is
/// observed atomically.
#[derive(Debug, Clone)]
pub enum LeadAction {
    /// Applies a patch and reports what it replaced.
    Apply(LeadPatch),
    /// Appends a note written by `author`.
    AddNote { author: String, body: String },
}

/// Results from LeadActions - variants match 1:1 with LeadAction
#[derive(Debug, Clone)]
pub enum LeadActionResult {
    Applied(LeadChange),
    NoteAdded { lead: Lead, note: Note },
}

/// A lead after a patch, together with the values the patch overwrote.
#[derive(Debug, Clone, PartialEq)]
pub struct LeadChange {
    pub lead: Lead,
    pub previous_stage: LeadStage,
    pub previous_assignee: Option<String>,
}

impl LeadChange {
    /// The new stage, if the patch moved the lead.
    pub fn stage_changed(&self) -> Option<LeadStage> {
        (self.lead.stage != self.previous_stage).then_some(self.lead.stage)
    }

    /// The new assignee, if the patch handed the lead to someone else.
    pub fn reassigned_to(&self) -> Option<&str> {
        match (&self.lead.assigned_to, &self.previous_assignee) {
            (Some(current), previous) if previous.as_ref() != Some(current) => Some(current.as_str()),
            _ => None,
        }
    }
}
