use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One user's emotion observations for a single calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DailyMoodSummary {
    pub id: Uuid,
    pub user_id: Uuid,
    #[sqlx(rename = "summary_date")]
    pub date: NaiveDate,
    /// Labels in the order they were logged, casing as sent.
    pub moods: Vec<String>,
    pub most_frequent_mood: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StressEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    #[sqlx(rename = "entry_date")]
    pub date: NaiveDate,
    pub emotion: String,
    pub stress_level: i32,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_wire_shape() {
        let summary = DailyMoodSummary {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
            moods: vec!["joy".into()],
            most_frequent_mood: Some("joy".into()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["date"], "2025-05-01");
        assert_eq!(json["mostFrequentMood"], "joy");
        assert!(json.get("userId").is_some());
    }

    #[test]
    fn test_stress_entry_wire_shape() {
        let entry = StressEntry {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(),
            emotion: "Sad".into(),
            stress_level: 7,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["date"], "2025-04-02");
        assert_eq!(json["stressLevel"], 7);
        assert_eq!(json["emotion"], "Sad");
    }
}
