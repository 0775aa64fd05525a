//! Centralized tracing setup.

/// Installs the global subscriber.
///
/// ```bash
/// RUST_LOG=debug lead_desk serve   # Show debug logs
/// RUST_LOG=info lead_desk serve    # Show info logs only
/// RUST_LOG=lead_desk::clients=debug,lead_desk::api=warn lead_desk serve
/// ```
pub fn setup_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .compact()
        .init();
}
