use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error as ThisError;

pub const HISTORY_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct SessionRecord {
    pub id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration_seconds: i32,
    pub avg_heart_rate: i32,
    pub avg_wrist_angle: f64,
    pub accuracy_score: f64,
    pub risk_level: String,
    pub ai_conclusion: String,
    pub exercise_tip: String,
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct SessionReadingRecord {
    pub id: i64,
    pub session_id: i64,
    pub timestamp: DateTime<Utc>,
    pub wrist_angle: f64,
    pub heart_rate: i32,
}

/// Row values for a session that finished recording and is about to be stored.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_seconds: i32,
    pub avg_heart_rate: i32,
    pub avg_wrist_angle: f64,
    pub accuracy_score: f64,
    pub risk_level: String,
    pub ai_conclusion: String,
    pub exercise_tip: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionMessage {
    pub message: String,
}

impl SessionMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StopSessionResponse {
    pub analysis: String,
    pub avg_hr: i32,
    pub avg_angle: f64,
    pub session_id: i64,
    pub conclusion: String,
    pub exercise_tip: String,
    pub accuracy_score: f64,
    pub risk_level: String,
    pub duration_seconds: i32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HistoryEntry {
    pub id: i64,
    pub date: String,
    pub hr: i32,
    pub accuracy: f64,
    pub risk: String,
}

impl From<&SessionRecord> for HistoryEntry {
    fn from(session: &SessionRecord) -> Self {
        Self {
            id: session.id,
            date: session.start_time.format(HISTORY_DATE_FORMAT).to_string(),
            hr: session.avg_heart_rate,
            accuracy: session.accuracy_score,
            risk: session.risk_level.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExerciseOverview {
    pub history: Vec<HistoryEntry>,
    pub ai_overview: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionDetail {
    #[serde(flatten)]
    pub session: SessionRecord,
    pub readings: Vec<SessionReadingRecord>,
}

#[derive(Debug, ThisError)]
pub enum SessionError {
    #[error("Database not configured")]
    DatabaseNotConfigured,

    #[error("Session {0} not found")]
    NotFound(i64),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn history_entry_uses_minute_precision_dates() {
        let record = SessionRecord {
            id: 7,
            start_time: Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap(),
            end_time: None,
            duration_seconds: 60,
            avg_heart_rate: 88,
            avg_wrist_angle: 12.5,
            accuracy_score: 87.5,
            risk_level: "Low (Safe)".to_string(),
            ai_conclusion: "Stable.".to_string(),
            exercise_tip: "Keep going.".to_string(),
        };

        let entry = HistoryEntry::from(&record);
        assert_eq!(entry, HistoryEntry {
            id: 7,
            date: "2025-03-14 09:26".to_string(),
            hr: 88,
            accuracy: 87.5,
            risk: "Low (Safe)".to_string(),
        });
    }
}
