use axum::{extract::State, http::header::CONTENT_TYPE, response::IntoResponse};

use crate::dto::GenerateImageRequest;
use crate::error::{AppError, AppResult};
use crate::extractors::JsonBody;
use crate::AppState;

pub async fn generate_image(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<GenerateImageRequest>,
) -> AppResult<impl IntoResponse> {
    if body.prompt.trim().is_empty() {
        return Err(AppError::Validation("Prompt is required".into()));
    }

    let image = state.upstream.generate_image(&body.prompt).await?;
    tracing::debug!(bytes = image.len(), "Generated image");

    Ok(([(CONTENT_TYPE, "image/png")], image))
}
