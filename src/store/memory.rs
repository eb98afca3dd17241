use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::chat_log::ChatLog;
use crate::models::community::{CommunityPost, CommunityPostView, NewPost};
use crate::models::mood::{DailyMoodSummary, StressEntry};
use crate::models::user::{NewUser, User};

use super::{
    ChatLogRepository, CommunityRepository, MoodRepository, Store, StoreError, StoreResult,
    StressRepository, UserRepository,
};

/// Process-local store. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    summaries: Vec<DailyMoodSummary>,
    stress_entries: Vec<StressEntry>,
    posts: Vec<CommunityPost>,
    chat_logs: Vec<ChatLog>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn new_stress_entry(user_id: Uuid, date: NaiveDate, emotion: &str, stress_level: i32) -> StressEntry {
    StressEntry {
        id: Uuid::new_v4(),
        user_id,
        date,
        emotion: emotion.to_string(),
        stress_level,
        created_at: Utc::now(),
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_user(&self, new_user: NewUser) -> StoreResult<User> {
        let mut tables = self.tables.lock().await;
        if tables.users.iter().any(|u| u.email == new_user.email) {
            return Err(StoreError::Duplicate("User already exists".into()));
        }

        let user = User {
            id: Uuid::new_v4(),
            email: new_user.email,
            password_hash: new_user.password_hash,
            role: new_user.role,
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.lock().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }
}

#[async_trait]
impl MoodRepository for MemoryStore {
    async fn append_mood(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        emotion: &str,
    ) -> StoreResult<DailyMoodSummary> {
        let mut tables = self.tables.lock().await;
        let now = Utc::now();

        if let Some(summary) = tables
            .summaries
            .iter_mut()
            .find(|s| s.user_id == user_id && s.date == date)
        {
            summary.moods.push(emotion.to_string());
            summary.updated_at = now;
            return Ok(summary.clone());
        }

        let summary = DailyMoodSummary {
            id: Uuid::new_v4(),
            user_id,
            date,
            moods: vec![emotion.to_string()],
            most_frequent_mood: None,
            created_at: now,
            updated_at: now,
        };
        tables.summaries.push(summary.clone());
        Ok(summary)
    }

    async fn set_most_frequent_mood(&self, summary_id: Uuid, mood: &str) -> StoreResult<()> {
        let mut tables = self.tables.lock().await;
        let summary = tables
            .summaries
            .iter_mut()
            .find(|s| s.id == summary_id)
            .ok_or_else(|| StoreError::Missing(format!("daily mood summary {summary_id}")))?;
        summary.most_frequent_mood = Some(mood.to_string());
        summary.updated_at = Utc::now();
        Ok(())
    }

    async fn find_summary(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> StoreResult<Option<DailyMoodSummary>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .summaries
            .iter()
            .find(|s| s.user_id == user_id && s.date == date)
            .cloned())
    }
}

#[async_trait]
impl StressRepository for MemoryStore {
    async fn upsert_daily_stress(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        emotion: &str,
        stress_level: i32,
    ) -> StoreResult<StressEntry> {
        let mut tables = self.tables.lock().await;

        if let Some(entry) = tables
            .stress_entries
            .iter_mut()
            .find(|e| e.user_id == user_id && e.date == date)
        {
            entry.emotion = emotion.to_string();
            entry.stress_level = stress_level;
            return Ok(entry.clone());
        }

        let entry = new_stress_entry(user_id, date, emotion, stress_level);
        tables.stress_entries.push(entry.clone());
        Ok(entry)
    }

    async fn insert_stress_entry(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        emotion: &str,
        stress_level: i32,
    ) -> StoreResult<StressEntry> {
        let entry = new_stress_entry(user_id, date, emotion, stress_level);
        self.tables.lock().await.stress_entries.push(entry.clone());
        Ok(entry)
    }

    async fn list_stress_entries(&self, user_id: Uuid) -> StoreResult<Vec<StressEntry>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .stress_entries
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl CommunityRepository for MemoryStore {
    async fn create_post(&self, post: NewPost) -> StoreResult<CommunityPost> {
        let created = CommunityPost {
            id: Uuid::new_v4(),
            user_id: post.user_id,
            content: post.content,
            tags: post.tags,
            anonymous: post.anonymous,
            created_at: Utc::now(),
        };
        self.tables.lock().await.posts.push(created.clone());
        Ok(created)
    }

    async fn list_posts(&self) -> StoreResult<Vec<CommunityPostView>> {
        let tables = self.tables.lock().await;
        // Insertion order is creation order, so reversing gives newest first.
        Ok(tables
            .posts
            .iter()
            .rev()
            .map(|post| {
                let email = tables
                    .users
                    .iter()
                    .find(|u| u.id == post.user_id)
                    .map(|u| u.email.clone());
                CommunityPostView::new(post.clone(), email)
            })
            .collect())
    }

    async fn list_posts_by_user(&self, user_id: Uuid) -> StoreResult<Vec<CommunityPost>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .posts
            .iter()
            .rev()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ChatLogRepository for MemoryStore {
    async fn insert_chat_log(
        &self,
        user_id: Uuid,
        message: &str,
        response: Option<&str>,
    ) -> StoreResult<ChatLog> {
        let log = ChatLog {
            id: Uuid::new_v4(),
            user_id,
            message: message.to_string(),
            response: response.map(str::to_string),
            created_at: Utc::now(),
        };
        self.tables.lock().await.chat_logs.push(log.clone());
        Ok(log)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
