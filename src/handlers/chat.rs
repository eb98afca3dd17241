use axum::{extract::State, Extension, Json};
use serde_json::Value;

use crate::auth::middleware::AuthUser;
use crate::dto::ChatRequest;
use crate::error::{AppError, AppResult};
use crate::extractors::JsonBody;
use crate::AppState;

/// Relays the message to the RAG backend and returns its reply unchanged.
pub async fn chat(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    JsonBody(body): JsonBody<ChatRequest>,
) -> AppResult<Json<Value>> {
    if body.message.trim().is_empty() {
        return Err(AppError::Validation("Message is required".into()));
    }

    let reply = state.upstream.rag_chat(&body.message, auth_user.id).await?;

    // Losing the log entry shouldn't cost the user their answer.
    let response_text = reply.get("response").and_then(Value::as_str);
    if let Err(e) = state
        .store
        .insert_chat_log(auth_user.id, &body.message, response_text)
        .await
    {
        tracing::warn!(error = %e, user_id = %auth_user.id, "Failed to record chat log");
    }

    Ok(Json(reply))
}
