use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use drone_pilot::config::{ServerConfig, DEFAULT_LOG_FILTER};
use drone_pilot::server::{build_router, shutdown_signal, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .init();

    let config = ServerConfig::from_env()?;
    info!(
        max_agents = config.max_agents,
        lead_time = config.steering.lead_time,
        sweep_hold = config.steering.sweep_hold,
        "steering configuration loaded"
    );

    let state = AppState::new(config.steering.clone(), config.max_agents);
    let app = build_router(state);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!("Starting drone-pilot server on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
