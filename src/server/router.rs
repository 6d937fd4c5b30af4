//! Route configuration.

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use super::{handlers, state::AppState};

pub const NEW_TOKENS_PATH: &str = "/api/bags/new-tokens";

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(NEW_TOKENS_PATH, get(handlers::new_tokens))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
