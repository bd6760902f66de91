// Dashboard binary entry point
//
// Loads the lifecycle document and serves the dashboard on a local port.
// Usage: cargo run --bin dashboard

use lifecycle_dashboard::{create_router, AppConfig, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    // Default log level: info for our crate, warn for others
                    "lifecycle_dashboard=info,tower_http=debug,warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting lifecycle dashboard...");

    // Configuration from environment variables
    let config = AppConfig::from_env();

    tracing::info!("Configuration:");
    tracing::info!("  LIFECYCLE_DATA: {}", config.data_path.display());
    tracing::info!("  HOST: {}", config.host);
    tracing::info!("  PORT: {}", config.port);

    let addr = config.socket_addr();

    // Load data (falls back to the built-in dataset when the file is missing)
    tracing::info!("Initializing application state...");
    let state = AppState::new(config)?;
    tracing::info!("Application state initialized successfully");

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Dashboard listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
