//! Chat request handler.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::Serialize;
use serde_json::Value;
use topichat_core::invoker;
use topichat_core::prompt::build_prompt;
use topichat_core::request::ChatRequest;
use tracing::debug;

use crate::AppState;
use crate::error::{AppError, AppResult};

/// Successful `POST /chat` body.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// `POST /chat` — answer `message` within the scope of `topic`.
///
/// A body that is not a JSON object is an internal error (500), while a
/// missing or empty field is a validation error (400).
pub async fn chat_handler(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<ChatResponse>> {
    let Json(body) = body?;
    if !body.is_object() {
        return Err(AppError::Internal(
            "request body is not a JSON object".into(),
        ));
    }
    let request: ChatRequest = serde_json::from_value(body)
        .map_err(|e| AppError::Internal(format!("failed to decode chat request: {e}")))?;

    let chat = request.validate()?;
    debug!(
        topic = %chat.topic,
        message_len = chat.message.len(),
        generator = state.generator.name(),
        "forwarding chat message"
    );

    let prompt = build_prompt(&chat.topic, &chat.message);
    let response = invoker::invoke(state.generator.as_ref(), &prompt, &state.model_config).await?;

    Ok(Json(ChatResponse { response }))
}
