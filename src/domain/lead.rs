use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pipeline position of a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LeadStage {
    #[default]
    New,
    Contacted,
    Qualified,
    Proposal,
    Negotiation,
    Won,
    Lost,
}

impl fmt::Display for LeadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LeadStage::New => "New",
            LeadStage::Contacted => "Contacted",
            LeadStage::Qualified => "Qualified",
            LeadStage::Proposal => "Proposal",
            LeadStage::Negotiation => "Negotiation",
            LeadStage::Won => "Won",
            LeadStage::Lost => "Lost",
        };
        f.write_str(name)
    }
}

/// A free-form remark attached to a lead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub author: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// A prospective customer tracked through the sales pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub assigned_to: Option<String>,
    pub created_by: String,
    pub stage: LeadStage,
    pub source: String,
    pub notes: Vec<Note>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lead {
    /// Whether `user_id` is the lead's assignee or creator.
    pub fn involves(&self, user_id: &str) -> bool {
        self.created_by == user_id || self.assigned_to.as_deref() == Some(user_id)
    }
}

/// Payload for creating a new lead.
#[derive(Debug, Clone)]
pub struct LeadCreate {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub assigned_to: Option<String>,
    pub created_by: String,
    pub stage: LeadStage,
    pub source: String,
}

/// Partial update of a lead. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub source: Option<String>,
    pub stage: Option<LeadStage>,
    pub assigned_to: Option<String>,
}

/// Selection used when listing leads.
#[derive(Debug, Clone)]
pub enum LeadQuery {
    All,
    /// Leads the user created or is assigned to.
    Involving(String),
}

/// Default `source` for leads created without one.
pub const DEFAULT_LEAD_SOURCE: &str = "Other";
