//! Helpers for tests that need a running system.

use std::net::SocketAddr;
use std::time::Duration;

use argon2::Params;
use serde_json::{json, Value};

use crate::api::{router, AppState};
use crate::app_system::{CrmSystem, SystemConfig};
use crate::auth::{PasswordService, TokenService};
use crate::clients::Registration;
use crate::domain::{Notification, Role, User};
use crate::events::StageChangeRecipient;

pub const ADMIN_EMAIL: &str = "admin@test.com";
pub const ADMIN_PASSWORD: &str = "admin-pass-123";
pub const STAFF_EMAIL: &str = "staff@test.com";
pub const STAFF_PASSWORD: &str = "staff-pass-123";
pub const TEST_SECRET: &str = "test-secret";

/// Argon2id with minimal cost so hashing does not dominate test time.
pub fn cheap_passwords() -> PasswordService {
    PasswordService::with_params(Params::new(1024, 1, 1, None).unwrap())
}

/// The full system behind a real HTTP server on an ephemeral port.
pub struct TestApp {
    pub addr: SocketAddr,
    pub http: reqwest::Client,
    pub system: CrmSystem,
    pub admin: User,
    pub staff: User,
    pub admin_token: String,
    pub staff_token: String,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(StageChangeRecipient::Assignee).await
    }

    pub async fn spawn_with(stage_recipient: StageChangeRecipient) -> Self {
        let system = CrmSystem::new(SystemConfig {
            mailbox: 16,
            stage_recipient,
            passwords: cheap_passwords(),
        });
        let admin = system.seed_admin("Ada Admin", ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();
        let staff = system
            .user_client
            .register(Registration {
                full_name: "Sam Staff".into(),
                email: STAFF_EMAIL.into(),
                password: STAFF_PASSWORD.into(),
                role: Role::Staff,
            })
            .await
            .unwrap();

        let tokens = TokenService::new(TEST_SECRET, Duration::from_secs(3600));
        let admin_token = tokens.issue(&admin).unwrap();
        let staff_token = tokens.issue(&staff).unwrap();

        let app = router(AppState::new(&system, tokens));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            http: reqwest::Client::new(),
            system,
            admin,
            staff,
            admin_token,
            staff_token,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Posts credentials to the login endpoint.
    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.http
            .post(self.url("/api/auth/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .unwrap()
    }

    /// Sends `body` as JSON with the given bearer token.
    pub async fn send(&self, method: reqwest::Method, path: &str, token: &str, body: Option<Value>) -> reqwest::Response {
        let mut request = self.http.request(method, self.url(path)).bearer_auth(token);
        if let Some(body) = body {
            request = request.json(&body);
        }
        request.send().await.unwrap()
    }

    /// Reads a receiver's notifications straight from the store.
    pub async fn notifications_for(&self, user_id: &str) -> Vec<Notification> {
        self.system.notification_client.inbox(user_id, false).await.unwrap()
    }
}
