//! Persistence ports.
//!
//! Handlers and services talk to these traits only. `PgStore` backs them
//! with Postgres; `MemoryStore` keeps everything in process and is used
//! when no database is configured and throughout the tests.
//!
//! None of the operations lock across calls: a read-modify-write sequence
//! built from several of them can interleave with another request.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::chat_log::ChatLog;
use crate::models::community::{CommunityPost, CommunityPostView, NewPost};
use crate::models::mood::{DailyMoodSummary, StressEntry};
use crate::models::user::{NewUser, User};

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Duplicate(String),

    #[error("record not found: {0}")]
    Missing(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user. Fails with `Duplicate` when the email is taken.
    async fn create_user(&self, new_user: NewUser) -> StoreResult<User>;

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;
}

#[async_trait]
pub trait MoodRepository: Send + Sync {
    /// Append `emotion` to the (user, date) summary, creating it if absent.
    /// Returns the summary as it stands after the append.
    async fn append_mood(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        emotion: &str,
    ) -> StoreResult<DailyMoodSummary>;

    async fn set_most_frequent_mood(&self, summary_id: Uuid, mood: &str) -> StoreResult<()>;

    async fn find_summary(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> StoreResult<Option<DailyMoodSummary>>;
}

#[async_trait]
pub trait StressRepository: Send + Sync {
    /// Overwrite emotion and level on the first entry for (user, date), or
    /// insert one if there is none.
    async fn upsert_daily_stress(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        emotion: &str,
        stress_level: i32,
    ) -> StoreResult<StressEntry>;

    /// Unconditional insert; several entries per (user, date) are allowed.
    async fn insert_stress_entry(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        emotion: &str,
        stress_level: i32,
    ) -> StoreResult<StressEntry>;

    /// All entries for the user in store order.
    async fn list_stress_entries(&self, user_id: Uuid) -> StoreResult<Vec<StressEntry>>;
}

#[async_trait]
pub trait CommunityRepository: Send + Sync {
    async fn create_post(&self, post: NewPost) -> StoreResult<CommunityPost>;

    /// Every post, newest first, joined with its author's email.
    async fn list_posts(&self) -> StoreResult<Vec<CommunityPostView>>;

    async fn list_posts_by_user(&self, user_id: Uuid) -> StoreResult<Vec<CommunityPost>>;
}

#[async_trait]
pub trait ChatLogRepository: Send + Sync {
    async fn insert_chat_log(
        &self,
        user_id: Uuid,
        message: &str,
        response: Option<&str>,
    ) -> StoreResult<ChatLog>;
}

#[async_trait]
pub trait Store:
    UserRepository + MoodRepository + StressRepository + CommunityRepository + ChatLogRepository
{
    /// Cheap liveness probe for readiness checks.
    async fn ping(&self) -> StoreResult<()>;
}
