use axum::{extract::State, http::StatusCode, Json};

use crate::auth::{
    jwt::create_access_token,
    password::{hash_password, verify_password},
};
use crate::dto::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest};
use crate::error::{AppError, AppResult};
use crate::extractors::{JsonBody, ValidatedJson};
use crate::models::user::NewUser;
use crate::AppState;

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let email = normalize_email(&body.email);
    if state.store.find_user_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict("User already exists".into()));
    }

    let user = state
        .store
        .create_user(NewUser {
            email,
            password_hash: hash_password(&body.password)?,
            role: body.role.unwrap_or_default(),
        })
        .await?;

    tracing::info!(user_id = %user.id, role = ?user.role, "User registered");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registered successfully")),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let user = state
        .store
        .find_user_by_email(&normalize_email(&body.email))
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !verify_password(&body.password, &user.password_hash)? {
        return Err(AppError::Unauthorized);
    }

    let token = create_access_token(user.id, user.role, &state.config)?;
    Ok(Json(LoginResponse {
        token,
        role: user.role,
    }))
}
