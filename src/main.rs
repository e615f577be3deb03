/// Launch search front-end: server-rendered pages over the launch library API
mod clients;
mod config;
mod domain;
mod errors;
mod handlers;
mod routes;
mod services;
mod utils;
mod views;

use crate::clients::LaunchClient;
use crate::config::AppConfig;
use crate::handlers::AppState;
use crate::routes::build_router;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    // Load configuration
    let config = AppConfig::from_env()?;
    info!("Configuration loaded successfully");

    // Initialize the launch API client
    let client = LaunchClient::new(config.api_url.clone(), &config.http)?;
    info!(
        "Using launch API at {} (max {} results per search)",
        client.base_url(),
        config.http.max_results
    );

    let state = AppState {
        api: Arc::new(client),
    };

    // Build router
    let app = build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("launch_search listening on {}", config.bind_addr);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
