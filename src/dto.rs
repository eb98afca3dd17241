//! Request/response bodies.
//!
//! Wire names are camelCase to match what the frontend already sends and
//! reads. `*Request` types are deserialized from JSON bodies, `*Response`
//! types serialized back. Field rules use `validator` derives where the
//! check is more than presence.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::mood::DailyMoodSummary;
use crate::models::user::Role;

// ============================================================================
// Common
// ============================================================================

/// `{"msg": "..."}` acknowledgement
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub msg: String,
}

impl MessageResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

// ============================================================================
// Auth
// ============================================================================

/// POST /register
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
    pub role: Option<Role>,
}

/// POST /login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub role: Role,
}

// ============================================================================
// Emotion / mood
// ============================================================================

/// POST /api/emotion/log
#[derive(Debug, Deserialize)]
pub struct LogEmotionRequest {
    pub emotion: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEmotionResponse {
    pub status: &'static str,
    pub emotion: String,
    pub updated_summary: DailyMoodSummary,
}

/// GET /api/mood/current
#[derive(Debug, Serialize)]
pub struct CurrentMoodResponse {
    pub mood: String,
}

// ============================================================================
// Stress
// ============================================================================

/// POST /api/stress/add
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddStressEntryRequest {
    pub date: NaiveDate,
    pub stress_level: i32,
    pub emotion: String,
}

// ============================================================================
// Community
// ============================================================================

/// POST /api/community/post
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 5000, message = "Content must be 1-5000 characters"))]
    pub content: String,
    #[serde(default)]
    #[validate(length(max = 10, message = "At most 10 tags"))]
    pub tags: Vec<String>,
    #[serde(default)]
    pub anonymous: bool,
}

// ============================================================================
// Proxies
// ============================================================================

/// POST /api/chat
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

/// POST /generate-image
#[derive(Debug, Deserialize)]
pub struct GenerateImageRequest {
    #[serde(default)]
    pub prompt: String,
}
