//! API routes module

pub mod ai;

use std::sync::Arc;

use crate::api::state::AppState;
use axum::Router;

type SharedState = Arc<AppState>;

/// Create the combined API router
pub fn router() -> Router<SharedState> {
    Router::new()
        // Conversation relay routes
        .nest("/ai", ai::router())
}
