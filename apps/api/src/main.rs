mod config;
mod engagement_log;
mod errors;
mod insights;
mod llm_client;
mod models;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::{Config, OracleMode};
use crate::engagement_log::EngagementLog;
use crate::insights::orchestrator::InsightOrchestrator;
use crate::llm_client::stub::StubOracle;
use crate::llm_client::{CompletionOracle, GeminiClient};
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

    info!("Starting Insights API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the completion oracle
    let oracle = build_oracle(&config)?;
    info!(
        "Oracle initialized ({:?}, model preference: {})",
        config.oracle_mode,
        config.model_preference.join(", ")
    );

    let orchestrator = InsightOrchestrator::new(oracle, config.model_preference.clone());

    // Engagement log (JSON array on disk)
    let engagement_log = EngagementLog::new(config.engagement_log_path.clone());
    info!("Engagement log at {}", engagement_log.path().display());

    // Build app state
    let state = AppState {
        orchestrator: Arc::new(orchestrator),
        engagement_log: Arc::new(engagement_log),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Gemini over HTTPS, or the offline stub when `INSIGHTS_ORACLE=stub`.
fn build_oracle(config: &Config) -> Result<Arc<dyn CompletionOracle>> {
    match config.oracle_mode {
        OracleMode::Gemini => {
            let api_key = config
                .google_api_key
                .clone()
                .context("GOOGLE_API_KEY is required for the Gemini oracle")?;
            let client = GeminiClient::new(
                api_key,
                config.gemini_api_base.clone(),
                config.oracle_timeout,
            )
            .context("Failed to build Gemini HTTP client")?;
            Ok(Arc::new(client))
        }
        OracleMode::Stub => Ok(Arc::new(StubOracle::new())),
    }
}
