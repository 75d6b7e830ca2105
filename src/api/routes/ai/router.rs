//! Router for the conversation relay

use std::sync::Arc;

use axum::{Router, extract::State, routing::post};

use super::public;
use crate::api::public::ApiError;
use crate::api::state::AppState;
use crate::chat::ChatTurn;

type SharedState = Arc<AppState>;

/// Forward a transcript to the provider and respond with only the
/// assistant's reply
async fn conversation_handler(
    State(state): State<SharedState>,
    axum::Json(payload): axum::Json<public::ConversationRequest>,
) -> Result<axum::Json<ChatTurn>, ApiError> {
    tracing::debug!(
        "Relaying conversation of {} messages to {}",
        payload.messages.len(),
        state.config.openai_model
    );

    let reply = state.provider.complete(&payload.messages).await?;

    Ok(axum::Json(reply))
}

/// Create the ai router
pub fn router() -> Router<SharedState> {
    Router::new().route("/conversation", post(conversation_handler))
}
