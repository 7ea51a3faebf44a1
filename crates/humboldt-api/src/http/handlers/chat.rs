//! Chat endpoint.
//!
//! POST /api/v1/chat
//!
//! The server holds no conversation state: callers send the prior turns with
//! every prompt and append the returned `display_text` themselves.

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use humboldt_core::assistant::ReplyKind;
use humboldt_types::chat::ChatTurn;
use humboldt_types::topic::TopicBucket;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Request body for the chat endpoint.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// The new user prompt.
    pub prompt: String,
    /// Prior turns, oldest first, not including `prompt`.
    #[serde(default)]
    pub turns: Vec<ChatTurn>,
    /// Optional topic override, by display name or slug.
    pub topic: Option<String>,
}

/// Reply returned to the client.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub answer: String,
    pub references: Vec<String>,
    /// Answer plus reference section, as it should be appended to the transcript.
    pub display_text: String,
    pub topic: Option<TopicBucket>,
    pub kind: ReplyKind,
}

fn parse_topic(topic: Option<&str>) -> Result<Option<TopicBucket>, AppError> {
    match topic.map(str::trim).filter(|t| !t.is_empty()) {
        None => Ok(None),
        Some(name) => name.parse().map(Some).map_err(AppError::Validation),
    }
}

/// POST /api/v1/chat -- answer one prompt.
pub async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ApiResponse<ChatResponse>>, AppError> {
    let start = Instant::now();

    if body.prompt.trim().is_empty() {
        return Err(AppError::Validation("prompt must not be empty".to_string()));
    }
    let topic = parse_topic(body.topic.as_deref())?;

    let reply = state
        .assistant
        .handle_user_prompt(&body.prompt, &body.turns, topic)
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "Knowledge base query failed"))?;

    let display_text = reply.display_text();
    let response = ChatResponse {
        answer: reply.answer_text,
        references: reply.references,
        display_text,
        topic: reply.topic,
        kind: reply.kind,
    };

    Ok(Json(
        ApiResponse::success(response, start).with_link("self", "/api/v1/chat"),
    ))
}
