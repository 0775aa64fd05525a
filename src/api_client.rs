//! HTTP client for the lead desk API, plus the terminal views built on it.

use std::fmt;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::domain::{Notification, Role};

pub const PRODUCT_NAME: &str = "Lead Desk";

/// The user as reported by the login endpoint. Fields other than `email` are optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionUser {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub role: Option<Role>,
}

/// Who is logged in. Passed to every call that needs a token.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<String>,
    user: Option<SessionUser>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// A session restored from a previously issued token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self { token: Some(token.into()), user: None }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    pub fn logout(&mut self) {
        self.token = None;
        self.user = None;
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Status { status: StatusCode, message: String },
    #[error("not logged in")]
    NotLoggedIn,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
    user: SessionUser,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Deserialize)]
struct UnreadCount {
    count: usize,
}

/// Thin wrapper over the REST endpoints.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn bearer(session: &Session) -> Result<String, ClientError> {
        session
            .token()
            .map(|token| format!("Bearer {}", token))
            .ok_or(ClientError::NotLoggedIn)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => status.canonical_reason().unwrap_or("request failed").to_string(),
        };
        Err(ClientError::Status { status, message })
    }

    /// Logs in and stores the token and user in `session`. A failed attempt clears it.
    #[instrument(skip(self, session, password))]
    pub async fn login(&self, session: &mut Session, email: &str, password: &str) -> Result<SessionUser, ClientError> {
        session.logout();
        debug!("Sending request");
        let response = self
            .http
            .post(self.url("/api/auth/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        let body: LoginResponse = Self::check(response).await?.json().await?;

        session.token = Some(body.token);
        session.user = Some(body.user.clone());
        Ok(body.user)
    }

    /// Fills in the session user for a token-only session.
    #[instrument(skip(self, session))]
    pub async fn me(&self, session: &mut Session) -> Result<SessionUser, ClientError> {
        debug!("Sending request");
        let response = self
            .http
            .get(self.url("/api/auth/me"))
            .header(reqwest::header::AUTHORIZATION, Self::bearer(session)?)
            .send()
            .await?;
        let user: SessionUser = Self::check(response).await?.json().await?;
        session.user = Some(user.clone());
        Ok(user)
    }

    #[instrument(skip(self, session))]
    pub async fn notifications(&self, session: &Session, unread_only: bool) -> Result<Vec<Notification>, ClientError> {
        let mut request = self
            .http
            .get(self.url("/api/notifications"))
            .header(reqwest::header::AUTHORIZATION, Self::bearer(session)?);
        if unread_only {
            request = request.query(&[("unread", "true")]);
        }
        debug!("Sending request");
        Ok(Self::check(request.send().await?).await?.json().await?)
    }

    #[instrument(skip(self, session))]
    pub async fn unread_count(&self, session: &Session) -> Result<usize, ClientError> {
        debug!("Sending request");
        let response = self
            .http
            .get(self.url("/api/notifications/unread-count"))
            .header(reqwest::header::AUTHORIZATION, Self::bearer(session)?)
            .send()
            .await?;
        let body: UnreadCount = Self::check(response).await?.json().await?;
        Ok(body.count)
    }

    #[instrument(skip(self, session))]
    pub async fn mark_read(&self, session: &Session, id: &str) -> Result<Notification, ClientError> {
        debug!("Sending request");
        let response = self
            .http
            .put(self.url(&format!("/api/notifications/{}/read", id)))
            .header(reqwest::header::AUTHORIZATION, Self::bearer(session)?)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }
}

/// Outcome line shown after a login attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginView {
    LoggedIn { email: String },
    Failed,
}

impl LoginView {
    /// Any error collapses to `Failed`; the detail goes to the log only.
    pub fn from_result(result: &Result<SessionUser, ClientError>) -> Self {
        match result {
            Ok(user) => LoginView::LoggedIn { email: user.email.clone() },
            Err(e) => {
                warn!(error = %e, "Login failed");
                LoginView::Failed
            }
        }
    }
}

impl fmt::Display for LoginView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginView::LoggedIn { email } => write!(f, "Logged in as {}", email),
            LoginView::Failed => f.write_str("login failed"),
        }
    }
}

/// One-line navigation bar ending with the logged-in email, or `Login`.
pub fn render_navbar(session: &Session, unread: usize) -> String {
    let notifications = if unread > 0 {
        format!("Notifications ({})", unread)
    } else {
        "Notifications".to_string()
    };
    let account = match session.user() {
        Some(user) if session.is_logged_in() => user.email.as_str(),
        _ => "Login",
    };
    format!("{} | Dashboard | Leads | {} | {}", PRODUCT_NAME, notifications, account)
}
