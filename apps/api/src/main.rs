mod ats;
mod auth;
mod config;
mod db;
mod errors;
mod generation;
mod github;
mod llm_client;
mod models;
mod resumes;
mod routes;
mod state;
#[cfg(test)]
mod test_support;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, run_migrations};
use crate::github::client::GitHubClient;
use crate::llm_client::GeminiClient;
use crate::resumes::store::PgResumeStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ResumAI API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    run_migrations(&db).await?;

    // Initialize generation client
    let generator = GeminiClient::new(
        config.gemini_api_url.clone(),
        config.gemini_api_key.clone(),
        Duration::from_secs(config.generation_timeout_secs),
    )?;
    info!(
        "Generation client initialized (timeout {}s)",
        config.generation_timeout_secs
    );

    // Initialize GitHub client
    let repositories = GitHubClient::new(
        config.github_api_url.clone(),
        config.github_token.clone(),
        Duration::from_secs(config.github_timeout_secs),
    )?;
    info!(
        "GitHub client initialized ({})",
        if config.github_token.is_some() {
            "authenticated"
        } else {
            "anonymous"
        }
    );

    // Build app state
    let state = AppState {
        store: Arc::new(PgResumeStore::new(db)),
        generator: Arc::new(generator),
        repositories: Arc::new(repositories),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to the web client's domain

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
