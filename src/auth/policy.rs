//! Authorization rules, consulted once per request.

use crate::domain::{Lead, Notification, Role};
use super::Actor;

/// Something an actor wants to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateLead,
    ListLeads,
    ViewLead,
    UpdateLead,
    AddNote,
    DeleteLead,
    ListUsers,
    ReadNotification,
    /// Creating an account with the given role.
    RegisterUser(Role),
}

/// The record an action targets, when there is one.
#[derive(Debug, Clone, Copy)]
pub enum Resource<'a> {
    None,
    Lead(&'a Lead),
    Notification(&'a Notification),
}

/// Decides whether `actor` may perform `action` on `resource`.
///
/// `actor` is `None` for anonymous requests; the only thing an anonymous caller may
/// do is register a Staff account.
pub fn can_perform(actor: Option<&Actor>, action: Action, resource: Resource<'_>) -> bool {
    let Some(actor) = actor else {
        return matches!(action, Action::RegisterUser(Role::Staff));
    };
    let is_admin = actor.role == Role::Admin;

    match (action, resource) {
        (Action::CreateLead | Action::UpdateLead | Action::ListLeads | Action::ListUsers, _) => true,
        (Action::ViewLead | Action::AddNote, Resource::Lead(lead)) => is_admin || lead.involves(&actor.id),
        (Action::DeleteLead, Resource::Lead(_)) => is_admin,
        (Action::ReadNotification, Resource::Notification(n)) => n.receiver == actor.id,
        (Action::RegisterUser(Role::Staff), _) => true,
        (Action::RegisterUser(Role::Admin), _) => is_admin,
        _ => false,
    }
}
