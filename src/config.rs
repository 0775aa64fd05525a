//! Command-line and environment configuration.

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use clap::Args;
use tracing::warn;

use crate::app_system::SystemConfig;
use crate::auth::{PasswordService, TokenService};
use crate::events::StageChangeRecipient;

/// Signing secret used when `JWT_SECRET` is unset. Only fit for local development.
pub const DEV_JWT_SECRET: &str = "lead-desk-dev-secret";

/// Settings for `lead_desk serve`.
#[derive(Args, Clone)]
pub struct ServerConfig {
    /// Address the HTTP API listens on
    #[arg(long, env = "LEAD_DESK_BIND", default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    /// HS256 signing secret for access tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: Option<String>,

    /// Access token lifetime in seconds
    #[arg(long, env = "JWT_TTL_SECS", default_value_t = 86_400)]
    pub jwt_ttl_secs: u64,

    /// Email of an admin account to create at startup
    #[arg(long, env = "LEAD_DESK_ADMIN_EMAIL", requires = "admin_password")]
    pub admin_email: Option<String>,

    /// Password of the startup admin account
    #[arg(long, env = "LEAD_DESK_ADMIN_PASSWORD", hide_env_values = true)]
    pub admin_password: Option<String>,

    /// Display name of the startup admin account
    #[arg(long, env = "LEAD_DESK_ADMIN_NAME", default_value = "Administrator")]
    pub admin_name: String,

    /// Who is notified first when a lead changes stage
    #[arg(long, env = "LEAD_DESK_STAGE_NOTIFY", value_enum, default_value_t = StageChangeRecipient::Assignee)]
    pub stage_notify: StageChangeRecipient,

    /// Mailbox capacity of each entity actor
    #[arg(long, env = "LEAD_DESK_MAILBOX", default_value_t = 32, value_parser = clap::value_parser!(u16).range(1..))]
    pub mailbox: u16,
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("bind", &self.bind)
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .field("jwt_ttl_secs", &self.jwt_ttl_secs)
            .field("admin_email", &self.admin_email)
            .field("admin_name", &self.admin_name)
            .field("stage_notify", &self.stage_notify)
            .field("mailbox", &self.mailbox)
            .finish()
    }
}

impl ServerConfig {
    pub fn token_service(&self) -> TokenService {
        let secret = match self.jwt_secret.as_deref().filter(|s| !s.is_empty()) {
            Some(secret) => secret,
            None => {
                warn!("JWT_SECRET is not set; using the development secret");
                DEV_JWT_SECRET
            }
        };
        TokenService::new(secret, Duration::from_secs(self.jwt_ttl_secs))
    }

    pub fn system_config(&self) -> SystemConfig {
        SystemConfig {
            mailbox: usize::from(self.mailbox),
            stage_recipient: self.stage_notify,
            passwords: PasswordService::new(),
        }
    }

    /// The startup admin as `(name, email, password)`, when one is configured.
    pub fn seed_admin(&self) -> Option<(&str, &str, &str)> {
        match (&self.admin_email, &self.admin_password) {
            (Some(email), Some(password)) => Some((self.admin_name.as_str(), email.as_str(), password.as_str())),
            _ => None,
        }
    }
}

/// Settings shared by the client subcommands.
#[derive(Args, Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of a running lead desk API
    #[arg(long, env = "LEAD_DESK_API_URL", default_value = "http://127.0.0.1:5000")]
    pub api_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        server: ServerConfig,
    }

    #[test]
    fn test_defaults() {
        let config = Harness::try_parse_from(["lead_desk"]).unwrap().server;
        assert_eq!(config.bind, "127.0.0.1:5000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.jwt_ttl_secs, 86_400);
        assert_eq!(config.stage_notify, StageChangeRecipient::Assignee);
        assert_eq!(config.mailbox, 32);
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = Harness::try_parse_from([
            "lead_desk",
            "--stage-notify",
            "owner",
            "--mailbox",
            "8",
            "--admin-email",
            "root@test.com",
            "--admin-password",
            "root-pass-1",
        ])
        .unwrap()
        .server;
        assert_eq!(config.stage_notify, StageChangeRecipient::Owner);
        assert_eq!(config.system_config().mailbox, 8);
        assert_eq!(config.seed_admin(), Some(("Administrator", "root@test.com", "root-pass-1")));
    }

    #[test]
    fn test_zero_mailbox_rejected() {
        assert!(Harness::try_parse_from(["lead_desk", "--mailbox", "0"]).is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = Harness::try_parse_from(["lead_desk", "--jwt-secret", "hunter2hunter2"])
            .unwrap()
            .server;
        assert!(!format!("{:?}", config).contains("hunter2"));
    }
}
