use axum::{extract::State, http::StatusCode, Extension, Json};

use crate::auth::middleware::AuthUser;
use crate::dto::{CreatePostRequest, MessageResponse};
use crate::error::{AppError, AppResult};
use crate::extractors::ValidatedJson;
use crate::models::community::{CommunityPost, CommunityPostView, NewPost};
use crate::AppState;

pub async fn create_post(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedJson(body): ValidatedJson<CreatePostRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    if body.content.trim().is_empty() {
        return Err(AppError::Validation("Content is required".into()));
    }

    let post = state
        .store
        .create_post(NewPost {
            user_id: auth_user.id,
            content: body.content,
            tags: body.tags,
            anonymous: body.anonymous,
        })
        .await?;

    tracing::info!(post_id = %post.id, user_id = %auth_user.id, "Community post created");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Post created successfully")),
    ))
}

pub async fn list_posts(State(state): State<AppState>) -> AppResult<Json<Vec<CommunityPostView>>> {
    Ok(Json(state.store.list_posts().await?))
}

pub async fn my_posts(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<CommunityPost>>> {
    Ok(Json(state.store.list_posts_by_user(auth_user.id).await?))
}
