//! HTTP surface of the service.

pub mod handlers;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use handlers::AppState;

/// Build the HTTP routes.
pub fn router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Upload and summarize
        .route("/summarize", post(handlers::summarize_document))
        // Document-grounded chat
        .route("/chat", post(handlers::chat_document))
        .route("/chat/history/:session_id", get(handlers::get_chat_history))
        // Listings
        .route("/documents/:user_id", get(handlers::get_documents))
        .layer(DefaultBodyLimit::max(body_limit))
        // State
        .with_state(state)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
