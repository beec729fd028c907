//! Axum route handler for the chat assistant.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::assistant::AssistantReply;
use crate::errors::AppError;
use crate::models::chat::ChatMessage;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AssistantRequest {
    pub query: String,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

/// POST /assistant
///
/// Routes the utterance through the intent router and returns the reply.
/// The router itself never errors; a broken collaborator answer comes back
/// as an apology reply, so the client transcript cannot crash.
pub async fn handle_assistant(
    State(state): State<AppState>,
    Json(request): Json<AssistantRequest>,
) -> Result<Json<AssistantReply>, AppError> {
    if request.query.trim().is_empty() {
        return Err(AppError::Validation("query cannot be empty".to_string()));
    }

    let reply = state
        .assistant
        .route(&request.history, &request.query)
        .await;

    Ok(Json(reply))
}
