use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CommunityPost {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub tags: Vec<String>,
    pub anonymous: bool,
    pub created_at: DateTime<Utc>,
}

/// Public feed item. Anonymous posts carry neither the author id nor email.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityPostView {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub author_email: Option<String>,
    pub content: String,
    pub tags: Vec<String>,
    pub anonymous: bool,
    pub created_at: DateTime<Utc>,
}

impl CommunityPostView {
    pub fn new(post: CommunityPost, author_email: Option<String>) -> Self {
        let (user_id, author_email) = if post.anonymous {
            (None, None)
        } else {
            (Some(post.user_id), author_email)
        };
        Self {
            id: post.id,
            user_id,
            author_email,
            content: post.content,
            tags: post.tags,
            anonymous: post.anonymous,
            created_at: post.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub user_id: Uuid,
    pub content: String,
    pub tags: Vec<String>,
    pub anonymous: bool,
}
