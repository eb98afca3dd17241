//! Daily mood aggregation.
//!
//! All aggregation happens on write: each logged emotion is appended to the
//! day's summary and the most frequent label is recomputed right away, so
//! reads are point lookups. The summary update and the stress entry upsert
//! are two separate store calls; if the second fails the first stays.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::mood::{DailyMoodSummary, StressEntry};
use crate::services::clock::DateProvider;
use crate::services::stress_map::StressMap;
use crate::store::Store;

/// Result of a single `log_emotion` call.
#[derive(Debug, Clone)]
pub struct LoggedEmotion {
    pub emotion: String,
    pub summary: DailyMoodSummary,
    pub stress: StressEntry,
}

#[derive(Clone)]
pub struct MoodService {
    store: Arc<dyn Store>,
    stress_map: Arc<StressMap>,
    dates: Arc<dyn DateProvider>,
}

impl MoodService {
    pub fn new(store: Arc<dyn Store>, stress_map: StressMap, dates: Arc<dyn DateProvider>) -> Self {
        Self {
            store,
            stress_map: Arc::new(stress_map),
            dates,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.dates.today()
    }

    pub async fn log_emotion(&self, user_id: Uuid, emotion: Option<&str>) -> AppResult<LoggedEmotion> {
        let emotion = emotion
            .filter(|e| !e.is_empty())
            .ok_or_else(|| AppError::Validation("Emotion is required".into()))?;
        let today = self.today();

        let mut summary = self.store.append_mood(user_id, today, emotion).await?;
        if let Some(top) = most_frequent(&summary.moods) {
            self.store.set_most_frequent_mood(summary.id, &top).await?;
            summary.most_frequent_mood = Some(top);
        }

        let stress_level = self.stress_map.level_for_logged(emotion);
        let stress = self
            .store
            .upsert_daily_stress(user_id, today, emotion, stress_level)
            .await?;

        tracing::info!(
            user_id = %user_id,
            emotion = %emotion,
            date = %today,
            stress_level,
            "Logged emotion"
        );

        Ok(LoggedEmotion {
            emotion: emotion.to_string(),
            summary,
            stress,
        })
    }

    pub async fn current_mood(&self, user_id: Uuid) -> AppResult<String> {
        self.store
            .find_summary(user_id, self.today())
            .await?
            .and_then(|s| s.most_frequent_mood)
            .ok_or_else(|| AppError::NotFound("No mood recorded for today".into()))
    }

    pub async fn add_stress_entry(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        stress_level: i32,
        emotion: &str,
    ) -> AppResult<StressEntry> {
        let entry = self
            .store
            .insert_stress_entry(user_id, date, emotion, stress_level)
            .await?;
        Ok(entry)
    }

    pub async fn stress_history(&self, user_id: Uuid) -> AppResult<Vec<StressEntry>> {
        Ok(self.store.list_stress_entries(user_id).await?)
    }
}

/// Label with the highest count. Labels are compared exactly; on a tie the
/// one that first appeared in `moods` wins.
pub fn most_frequent(moods: &[String]) -> Option<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for mood in moods {
        *counts.entry(mood.as_str()).or_default() += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for mood in moods {
        let count = counts[mood.as_str()];
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((mood.as_str(), count));
        }
    }
    best.map(|(label, _)| label.to_string())
}
