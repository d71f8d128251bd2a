mod assessment;
mod config;
mod errors;
mod jobs;
mod metrics;
mod models;
mod routes;
mod runs;
mod scoring;
mod state;
mod store;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::scoring::ScoringEngine;
use crate::state::AppState;
use crate::store::InMemoryStore;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting scoring API v{}", env!("CARGO_PKG_VERSION"));

    // Weight table is checked once here; a bad override stops startup.
    let engine = ScoringEngine::new(config.scoring_weights)
        .context("SCORING_WEIGHTS is not a valid weight table")?;
    info!("Scoring weights: {:?}", engine.weights());

    let store = Arc::new(InMemoryStore::new(
        config.max_stored_jobs,
        config.max_stored_runs,
    ));
    info!(
        "In-memory job store initialized (limit: {} jobs, {} runs)",
        config.max_stored_jobs, config.max_stored_runs
    );

    let state = AppState { engine, store };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS to the dashboard origin

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
