use axum::{extract::State, http::StatusCode, Extension, Json};

use crate::auth::middleware::AuthUser;
use crate::dto::{AddStressEntryRequest, MessageResponse};
use crate::error::AppResult;
use crate::extractors::JsonBody;
use crate::models::mood::StressEntry;
use crate::AppState;

pub async fn add_stress_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    JsonBody(body): JsonBody<AddStressEntryRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    state
        .moods
        .add_stress_entry(auth_user.id, body.date, body.stress_level, &body.emotion)
        .await?;

    Ok((StatusCode::CREATED, Json(MessageResponse::new("Entry saved"))))
}

/// Entries come back in store order; callers sort by date if they need to.
pub async fn stress_history(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<StressEntry>>> {
    let history = state.moods.stress_history(auth_user.id).await?;
    Ok(Json(history))
}
