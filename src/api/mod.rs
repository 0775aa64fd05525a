//! HTTP surface: routing, authentication, and error mapping.

pub mod auth;
pub mod error;
pub mod extract;
pub mod leads;
pub mod notifications;
pub mod users;

use axum::extract::FromRef;
use axum::routing::{get, post, put};
use axum::Router;

use crate::app_system::CrmSystem;
use crate::auth::TokenService;
use crate::clients::{LeadClient, NotificationClient, UserClient};

pub use error::ApiError;
pub use extract::{AuthUser, MaybeAuthUser};

/// Shared handler state: actor clients plus the token service.
#[derive(Clone)]
pub struct AppState {
    pub users: UserClient,
    pub leads: LeadClient,
    pub notifications: NotificationClient,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(system: &CrmSystem, tokens: TokenService) -> Self {
        Self {
            users: system.user_client.clone(),
            leads: system.lead_client.clone(),
            notifications: system.notification_client.clone(),
            tokens,
        }
    }
}

impl FromRef<AppState> for TokenService {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}

async fn health() -> &'static str {
    "ok"
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/me", get(auth::me))
        .route("/api/users", get(users::list_users))
        .route("/api/leads", post(leads::create_lead).get(leads::list_leads))
        .route(
            "/api/leads/:id",
            get(leads::get_lead).put(leads::update_lead).delete(leads::delete_lead),
        )
        .route("/api/leads/:id/notes", post(leads::add_note))
        .route("/api/notifications", get(notifications::list_notifications))
        .route("/api/notifications/unread-count", get(notifications::unread_count))
        .route("/api/notifications/read-all", put(notifications::mark_all_read))
        .route("/api/notifications/:id/read", put(notifications::mark_read))
        .with_state(state)
}
