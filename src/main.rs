//! Number Aggregation Service — Binary Entrypoint
//! Boots the Axum HTTP server, wiring routes, shared state, and middleware.
//!
//! Environment:
//!   URLS              - comma-separated source URLs
//!   ACCESS_TOKEN      - optional bearer credential for the sources
//!   PORT              - listening port (default: 3000)
//!   SOURCE_TIMEOUT_MS - per-source fetch timeout (default: 500)

use std::net::SocketAddr;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use number_aggregator::{api, config::Settings, metrics::Metrics};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();
    init_tracing();

    let settings = Settings::from_env();
    let metrics = Metrics::init()?;

    tracing::info!(
        sources = settings.source_urls.len(),
        port = settings.port,
        timeout_ms = settings.source_timeout.as_millis() as u64,
        "starting number aggregator"
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    let state = api::AppState::new(settings)?;
    let app = api::router(state).merge(metrics.router());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = ?e, "failed to install ctrl-c handler");
    }
}
