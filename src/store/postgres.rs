use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use tracing::instrument;
use uuid::Uuid;

use crate::models::chat_log::ChatLog;
use crate::models::community::{CommunityPost, CommunityPostView, NewPost};
use crate::models::mood::{DailyMoodSummary, StressEntry};
use crate::models::user::{NewUser, User};

use super::{
    ChatLogRepository, CommunityRepository, MoodRepository, Store, StoreError, StoreResult,
    StressRepository, UserRepository,
};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct PostWithAuthorRow {
    id: Uuid,
    user_id: Uuid,
    content: String,
    tags: Vec<String>,
    anonymous: bool,
    created_at: DateTime<Utc>,
    author_email: Option<String>,
}

impl From<PostWithAuthorRow> for CommunityPostView {
    fn from(row: PostWithAuthorRow) -> Self {
        let post = CommunityPost {
            id: row.id,
            user_id: row.user_id,
            content: row.content,
            tags: row.tags,
            anonymous: row.anonymous,
            created_at: row.created_at,
        };
        CommunityPostView::new(post, row.author_email)
    }
}

#[async_trait]
impl UserRepository for PgStore {
    #[instrument(skip(self, new_user), fields(email = %new_user.email))]
    async fn create_user(&self, new_user: NewUser) -> StoreResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(new_user.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db_err) if db_err.is_unique_violation() => {
                StoreError::Duplicate("User already exists".into())
            }
            _ => StoreError::Database(e),
        })
    }

    #[instrument(skip(self))]
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }
}

#[async_trait]
impl MoodRepository for PgStore {
    #[instrument(skip(self))]
    async fn append_mood(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        emotion: &str,
    ) -> StoreResult<DailyMoodSummary> {
        let summary = sqlx::query_as::<_, DailyMoodSummary>(
            r#"
            INSERT INTO daily_mood_summaries (id, user_id, summary_date, moods)
            VALUES ($1, $2, $3, ARRAY[$4::text])
            ON CONFLICT (user_id, summary_date) DO UPDATE SET
                moods = array_append(daily_mood_summaries.moods, $4::text),
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(date)
        .bind(emotion)
        .fetch_one(&self.pool)
        .await?;
        Ok(summary)
    }

    #[instrument(skip(self))]
    async fn set_most_frequent_mood(&self, summary_id: Uuid, mood: &str) -> StoreResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE daily_mood_summaries
            SET most_frequent_mood = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(summary_id)
        .bind(mood)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Missing(format!("daily mood summary {summary_id}")));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_summary(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> StoreResult<Option<DailyMoodSummary>> {
        let summary = sqlx::query_as::<_, DailyMoodSummary>(
            "SELECT * FROM daily_mood_summaries WHERE user_id = $1 AND summary_date = $2",
        )
        .bind(user_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;
        Ok(summary)
    }
}

#[async_trait]
impl StressRepository for PgStore {
    #[instrument(skip(self))]
    async fn upsert_daily_stress(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        emotion: &str,
        stress_level: i32,
    ) -> StoreResult<StressEntry> {
        // Entries added directly may share a date; the oldest one is the day's record.
        let updated = sqlx::query_as::<_, StressEntry>(
            r#"
            UPDATE stress_entries SET emotion = $3, stress_level = $4
            WHERE id = (
                SELECT id FROM stress_entries
                WHERE user_id = $1 AND entry_date = $2
                ORDER BY created_at
                LIMIT 1
            )
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(date)
        .bind(emotion)
        .bind(stress_level)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(entry) => Ok(entry),
            None => {
                self.insert_stress_entry(user_id, date, emotion, stress_level)
                    .await
            }
        }
    }

    #[instrument(skip(self))]
    async fn insert_stress_entry(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        emotion: &str,
        stress_level: i32,
    ) -> StoreResult<StressEntry> {
        let entry = sqlx::query_as::<_, StressEntry>(
            r#"
            INSERT INTO stress_entries (id, user_id, entry_date, emotion, stress_level)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(date)
        .bind(emotion)
        .bind(stress_level)
        .fetch_one(&self.pool)
        .await?;
        Ok(entry)
    }

    #[instrument(skip(self))]
    async fn list_stress_entries(&self, user_id: Uuid) -> StoreResult<Vec<StressEntry>> {
        let entries =
            sqlx::query_as::<_, StressEntry>("SELECT * FROM stress_entries WHERE user_id = $1")
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(entries)
    }
}

#[async_trait]
impl CommunityRepository for PgStore {
    #[instrument(skip(self, post), fields(user_id = %post.user_id))]
    async fn create_post(&self, post: NewPost) -> StoreResult<CommunityPost> {
        let created = sqlx::query_as::<_, CommunityPost>(
            r#"
            INSERT INTO community_posts (id, user_id, content, tags, anonymous)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(post.user_id)
        .bind(&post.content)
        .bind(&post.tags)
        .bind(post.anonymous)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    #[instrument(skip(self))]
    async fn list_posts(&self) -> StoreResult<Vec<CommunityPostView>> {
        let rows = sqlx::query_as::<_, PostWithAuthorRow>(
            r#"
            SELECT p.id, p.user_id, p.content, p.tags, p.anonymous, p.created_at,
                   u.email AS author_email
            FROM community_posts p
            LEFT JOIN users u ON u.id = p.user_id
            ORDER BY p.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(CommunityPostView::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_posts_by_user(&self, user_id: Uuid) -> StoreResult<Vec<CommunityPost>> {
        let posts = sqlx::query_as::<_, CommunityPost>(
            "SELECT * FROM community_posts WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(posts)
    }
}

#[async_trait]
impl ChatLogRepository for PgStore {
    #[instrument(skip(self, message, response))]
    async fn insert_chat_log(
        &self,
        user_id: Uuid,
        message: &str,
        response: Option<&str>,
    ) -> StoreResult<ChatLog> {
        let log = sqlx::query_as::<_, ChatLog>(
            r#"
            INSERT INTO chat_logs (id, user_id, message, response)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(message)
        .bind(response)
        .fetch_one(&self.pool)
        .await?;
        Ok(log)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}

/// These run against a live database:
/// `TEST_DATABASE_URL=postgres://... cargo test -- --ignored`
#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_pool;
    use crate::models::user::Role;

    async fn store_with_user() -> (PgStore, Uuid) {
        let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL not set");
        let pool = create_pool(&url).await.unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();

        let store = PgStore::new(pool);
        let user = store
            .create_user(NewUser {
                email: format!("{}@test.local", Uuid::new_v4()),
                password_hash: "x".into(),
                role: Role::User,
            })
            .await
            .unwrap();
        (store, user.id)
    }

    #[tokio::test]
    #[ignore]
    async fn test_append_mood_extends_same_row() {
        let (store, user_id) = store_with_user().await;
        let date = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();

        let first = store.append_mood(user_id, date, "joy").await.unwrap();
        let second = store.append_mood(user_id, date, "Sad").await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.moods, vec!["joy", "Sad"]);

        store.set_most_frequent_mood(second.id, "joy").await.unwrap();
        let found = store.find_summary(user_id, date).await.unwrap().unwrap();
        assert_eq!(found.most_frequent_mood.as_deref(), Some("joy"));
    }

    #[tokio::test]
    #[ignore]
    async fn test_upsert_overwrites_oldest_entry() {
        let (store, user_id) = store_with_user().await;
        let date = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();

        let oldest = store.insert_stress_entry(user_id, date, "calm", 2).await.unwrap();
        let newer = store.insert_stress_entry(user_id, date, "calm", 2).await.unwrap();

        let upserted = store
            .upsert_daily_stress(user_id, date, "anger", 7)
            .await
            .unwrap();
        assert_eq!(upserted.id, oldest.id);

        let entries = store.list_stress_entries(user_id).await.unwrap();
        assert_eq!(entries.len(), 2);
        let untouched = entries.iter().find(|e| e.id == newer.id).unwrap();
        assert_eq!(untouched.emotion, "calm");
    }

    #[tokio::test]
    #[ignore]
    async fn test_duplicate_email_is_duplicate() {
        let (store, _) = store_with_user().await;
        let new_user = NewUser {
            email: format!("{}@test.local", Uuid::new_v4()),
            password_hash: "x".into(),
            role: Role::User,
        };

        store.create_user(new_user.clone()).await.unwrap();
        let err = store.create_user(new_user).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
    }
}
