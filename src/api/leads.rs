use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use crate::auth::{can_perform, Action, Actor, Resource};
use crate::clients::LeadDraft;
use crate::domain::{Lead, LeadPatch, LeadQuery, LeadStage, Role};
use super::{ApiError, AppState, AuthUser};

/// Lead creation request DTO
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeadRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub stage: Option<LeadStage>,
    #[serde(default)]
    pub source: Option<String>,
}

/// Lead update request DTO. Absent fields stay as they are.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLeadRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub source: Option<String>,
    pub stage: Option<LeadStage>,
    pub assigned_to: Option<String>,
}

impl From<UpdateLeadRequest> for LeadPatch {
    fn from(request: UpdateLeadRequest) -> Self {
        LeadPatch {
            name: request.name,
            email: request.email,
            phone: request.phone,
            source: request.source,
            stage: request.stage,
            assigned_to: request.assigned_to,
        }
    }
}

/// Note request DTO
#[derive(Debug, Deserialize)]
pub struct AddNoteRequest {
    pub body: String,
}

fn authorize(actor: &Actor, action: Action, lead: &Lead) -> Result<(), ApiError> {
    if can_perform(Some(actor), action, Resource::Lead(lead)) {
        Ok(())
    } else {
        Err(ApiError::forbidden())
    }
}

pub async fn create_lead(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    body: Result<Json<CreateLeadRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Lead>), ApiError> {
    let Json(request) = body?;
    if !can_perform(Some(&actor), Action::CreateLead, Resource::None) {
        return Err(ApiError::forbidden());
    }
    let draft = LeadDraft {
        name: request.name,
        email: request.email,
        phone: request.phone,
        assigned_to: request.assigned_to,
        stage: request.stage,
        source: request.source,
    };
    let lead = state.leads.create_lead(draft, &actor).await?;
    info!(lead_id = %lead.id, actor_id = %actor.id, "POST /api/leads");
    Ok((StatusCode::CREATED, Json(lead)))
}

/// Every lead for an admin; otherwise the leads the caller may view.
pub async fn list_leads(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
) -> Result<Json<Vec<Lead>>, ApiError> {
    if !can_perform(Some(&actor), Action::ListLeads, Resource::None) {
        return Err(ApiError::forbidden());
    }
    let query = match actor.role {
        Role::Admin => LeadQuery::All,
        Role::Staff => LeadQuery::Involving(actor.id.clone()),
    };
    let leads = state
        .leads
        .list_leads(query)
        .await?
        .into_iter()
        .filter(|lead| can_perform(Some(&actor), Action::ViewLead, Resource::Lead(lead)))
        .collect();
    Ok(Json(leads))
}

pub async fn get_lead(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Lead>, ApiError> {
    let lead = state.leads.find_lead(id).await?;
    authorize(&actor, Action::ViewLead, &lead)?;
    Ok(Json(lead))
}

pub async fn update_lead(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(id): Path<String>,
    body: Result<Json<UpdateLeadRequest>, JsonRejection>,
) -> Result<Json<Lead>, ApiError> {
    let Json(request) = body?;
    let lead = state.leads.find_lead(id).await?;
    authorize(&actor, Action::UpdateLead, &lead)?;

    let lead = state.leads.update_lead(lead.id, request.into(), &actor).await?;
    info!(lead_id = %lead.id, actor_id = %actor.id, stage = %lead.stage, "PUT /api/leads/:id");
    Ok(Json(lead))
}

pub async fn delete_lead(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let lead = state.leads.find_lead(id).await?;
    authorize(&actor, Action::DeleteLead, &lead)?;

    state.leads.delete_lead(lead.id.clone()).await?;
    info!(lead_id = %lead.id, actor_id = %actor.id, "DELETE /api/leads/:id");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_note(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(id): Path<String>,
    body: Result<Json<AddNoteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Lead>), ApiError> {
    let Json(request) = body?;
    let lead = state.leads.find_lead(id).await?;
    authorize(&actor, Action::AddNote, &lead)?;

    let lead = state.leads.add_note(lead.id, request.body, &actor).await?;
    info!(lead_id = %lead.id, actor_id = %actor.id, "POST /api/leads/:id/notes");
    Ok((StatusCode::CREATED, Json(lead)))
}
