//! LegalEase Service - Main Entry Point
//!
//! Upload legal documents, get plain-language summaries, and chat about them.

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use legalease::api::{self, AppState};
use legalease::types::ServiceConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "legalease=info,tower_http=debug".into()),
    );
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|f| f.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    tracing_subscriber::registry()
        .with(filter)
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json_logs).then(|| tracing_subscriber::fmt::layer()))
        .init();

    // Load configuration
    let config = ServiceConfig::from_env();

    info!("Starting LegalEase Service v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Summary model: {}, chunk budget: {} chars, concurrency: {}",
        config.summary.model, config.summary.max_chars, config.summary.concurrency
    );
    if config.llm.api_key.is_empty() {
        warn!("OPENROUTER_API_KEY is not set; LLM calls will be rejected upstream");
    }

    let port = config.port;
    let state = Arc::new(AppState::from_config(config)?);
    let app = api::router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
