//! Route table.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::state::AppState;

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/spirit-gossip", post(handlers::spirit_gossip))
        .route("/api/v1/analyze", post(handlers::analyze))
        .route("/api/v1/spirit-chat/stream", post(handlers::spirit_chat_stream))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
