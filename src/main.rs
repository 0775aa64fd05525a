use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Instrument};

use lead_desk::api::{self, AppState};
use lead_desk::api_client::{render_navbar, ApiClient, LoginView, Session};
use lead_desk::app_system::{setup_tracing, CrmSystem};
use lead_desk::config::{ClientConfig, ServerConfig};

/// lead_desk - leads, notifications, and accounts for a small sales team
#[derive(Parser, Debug)]
#[command(name = "lead_desk")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API
    Serve(ServerConfig),

    /// Log in and print the session banner
    Login {
        #[command(flatten)]
        client: ClientConfig,

        #[arg(long)]
        email: String,

        /// Password (read from LEAD_DESK_PASSWORD when omitted)
        #[arg(long, env = "LEAD_DESK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Print notifications for an access token
    Inbox {
        #[command(flatten)]
        client: ClientConfig,

        /// Access token from `login`
        #[arg(long, env = "LEAD_DESK_TOKEN", hide_env_values = true)]
        token: String,

        /// Only show unread notifications
        #[arg(long)]
        unread: bool,

        /// Mark the listed notifications as read
        #[arg(long)]
        mark_read: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Setup tracing once for the entire application
    setup_tracing();

    let cli = Cli::parse();
    match cli.command {
        Commands::Serve(config) => serve(config).await,
        Commands::Login { client, email, password } => login(client, &email, &password).await,
        Commands::Inbox { client, token, unread, mark_read } => inbox(client, token, unread, mark_read).await,
    }
}

async fn serve(config: ServerConfig) -> Result<()> {
    info!(?config, "Starting lead desk");

    let system = CrmSystem::new(config.system_config());
    if let Some((name, email, password)) = config.seed_admin() {
        let span = tracing::info_span!("seed_admin");
        let admin = system
            .seed_admin(name, email, password)
            .instrument(span)
            .await
            .context("failed to seed admin account")?;
        info!(user_id = %admin.id, "Admin account ready");
    }

    let state = AppState::new(&system, config.token_service());
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    info!(addr = %config.bind, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    // Shutdown system gracefully
    system.shutdown().await.map_err(anyhow::Error::msg)?;
    info!("Lead desk stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

async fn login(client: ClientConfig, email: &str, password: &str) -> Result<()> {
    let api = ApiClient::new(client.api_url);
    let mut session = Session::new();

    let result = api.login(&mut session, email, password).await;
    println!("{}", LoginView::from_result(&result));
    if let Some(token) = session.token() {
        println!("{}", render_navbar(&session, api.unread_count(&session).await.unwrap_or(0)));
        println!("token: {}", token);
    }
    Ok(())
}

async fn inbox(client: ClientConfig, token: String, unread: bool, mark_read: bool) -> Result<()> {
    let api = ApiClient::new(client.api_url);
    let mut session = Session::with_token(token);
    api.me(&mut session).await.context("token was rejected")?;

    let notifications = api
        .notifications(&session, unread)
        .await
        .context("failed to load notifications")?;
    let unread_count = notifications.iter().filter(|n| !n.is_read).count();
    println!("{}", render_navbar(&session, unread_count));

    if notifications.is_empty() {
        println!("No notifications.");
    }
    for notification in &notifications {
        let marker = if notification.is_read { ' ' } else { '*' };
        println!(
            "{} {}  {:?}  {}",
            marker,
            notification.created_at.format("%Y-%m-%d %H:%M"),
            notification.kind,
            notification.message
        );
        if mark_read && !notification.is_read {
            api.mark_read(&session, &notification.id)
                .await
                .with_context(|| format!("failed to mark {} read", notification.id))?;
        }
    }
    Ok(())
}
