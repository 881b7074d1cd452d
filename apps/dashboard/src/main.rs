mod api_client;
mod config;
mod controller;
mod effects;
mod errors;
mod models;
mod render;
mod routes;
mod state;
mod upload;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::api_client::HttpRankingApi;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume ranking dashboard v{}", env!("CARGO_PKG_VERSION"));

    let api = HttpRankingApi::new(config.backend_url.clone(), config.backend_timeout)?;
    match config.backend_timeout {
        Some(timeout) => info!(
            "Scoring service at {} (timeout {}s)",
            api.base_url(),
            timeout.as_secs()
        ),
        None => info!("Scoring service at {} (no timeout)", api.base_url()),
    }

    let state = AppState { api: Arc::new(api) };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
