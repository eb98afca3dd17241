use axum::{extract::State, Extension, Json};

use crate::auth::middleware::AuthUser;
use crate::dto::{CurrentMoodResponse, LogEmotionRequest, LogEmotionResponse};
use crate::error::AppResult;
use crate::extractors::JsonBody;
use crate::AppState;

pub async fn log_emotion(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    JsonBody(body): JsonBody<LogEmotionRequest>,
) -> AppResult<Json<LogEmotionResponse>> {
    let logged = state
        .moods
        .log_emotion(auth_user.id, body.emotion.as_deref())
        .await?;

    Ok(Json(LogEmotionResponse {
        status: "ok",
        emotion: logged.emotion,
        updated_summary: logged.summary,
    }))
}

pub async fn current_mood(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<CurrentMoodResponse>> {
    let mood = state.moods.current_mood(auth_user.id).await?;
    Ok(Json(CurrentMoodResponse { mood }))
}
