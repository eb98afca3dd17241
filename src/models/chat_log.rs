use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ChatLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub message: String,
    pub response: Option<String>,
    pub created_at: DateTime<Utc>,
}
