use sqlx::PgPool;

use crate::db::sessions::{
    get_recent_sessions, get_session_by_id, get_session_readings, insert_session_with_readings,
    RECENT_SESSIONS_LIMIT,
};
use crate::models::llm::SummaryContext;
use crate::models::sensor::SensorData;
use crate::models::session::{
    ExerciseOverview, HistoryEntry, NewSession, SessionDetail, SessionError, StopSessionResponse,
};
use crate::models::status::LiveStatus;
use crate::monitor::{parse_session_analysis, SessionRecorder, StopOutcome};
use crate::services::ollama::{format_history_summary, Ollama};

pub const NO_SESSIONS_OVERVIEW: &str = "No sessions found.";

#[derive(Debug)]
pub enum StopResult {
    NotActive,
    NoData,
    Saved(StopSessionResponse),
}

/// Ties the recorder, the summarizer and the session tables together.
#[derive(Debug)]
pub struct SessionService {
    recorder: SessionRecorder,
    summarizer: Ollama,
    pool: Option<PgPool>,
}

impl SessionService {
    pub fn new(pool: Option<PgPool>, summarizer: Ollama) -> Self {
        Self {
            recorder: SessionRecorder::new(),
            summarizer,
            pool,
        }
    }

    fn pool(&self) -> Result<&PgPool, SessionError> {
        self.pool.as_ref().ok_or(SessionError::DatabaseNotConfigured)
    }

    pub fn recorder(&self) -> &SessionRecorder {
        &self.recorder
    }

    pub async fn start(&self) {
        let recording_id = self.recorder.start().await;
        tracing::info!("SESSION STARTED - Buffer Cleared (recording {})", recording_id);
    }

    pub async fn ingest(&self, sample: SensorData) -> bool {
        self.recorder.ingest(sample).await
    }

    pub async fn status(&self) -> LiveStatus {
        self.recorder.status().await
    }

    /// Close the open recording, analyse it and store it.
    ///
    /// Fails fast when no database is configured, before the recording is touched.
    #[tracing::instrument(name = "Stop session", skip(self))]
    pub async fn stop(&self) -> Result<StopResult, SessionError> {
        let pool = self.pool()?;

        let recording = match self.recorder.stop().await {
            StopOutcome::NotActive => return Ok(StopResult::NotActive),
            StopOutcome::NoData => {
                tracing::info!("Session stopped without any readings");
                return Ok(StopResult::NoData);
            }
            StopOutcome::Completed(recording) => recording,
        };

        let stats = recording.stats();
        tracing::info!(
            "Recording {} closed with {} readings: avg HR {}, avg angle {}, stability {}",
            recording.recording_id,
            stats.reading_count,
            stats.avg_heart_rate,
            stats.avg_wrist_angle,
            stats.stability_score
        );

        let analysis_text = self
            .summarizer
            .summarize(&SummaryContext::SingleSession {
                avg_heart_rate: stats.avg_heart_rate,
                avg_wrist_angle: stats.avg_wrist_angle,
            })
            .await;
        let analysis = parse_session_analysis(&analysis_text);

        let new_session = NewSession {
            start_time: recording.started_at,
            end_time: recording.ended_at,
            duration_seconds: recording.duration_seconds(),
            avg_heart_rate: stats.avg_heart_rate,
            avg_wrist_angle: stats.avg_wrist_angle,
            accuracy_score: stats.stability_score,
            risk_level: stats.risk_level.to_string(),
            ai_conclusion: analysis.conclusion,
            exercise_tip: analysis.tip,
        };

        let session_id = insert_session_with_readings(pool, &new_session, recording.readings())
            .await
            .map_err(|e| {
                tracing::error!(
                    "Failed to save recording {} ({} readings lost): {}",
                    recording.recording_id,
                    recording.readings().len(),
                    e
                );
                SessionError::Database(e)
            })?;

        self.recorder.set_summary(analysis_text.clone()).await;

        Ok(StopResult::Saved(StopSessionResponse {
            analysis: analysis_text,
            avg_hr: new_session.avg_heart_rate,
            avg_angle: new_session.avg_wrist_angle,
            session_id,
            conclusion: new_session.ai_conclusion,
            exercise_tip: new_session.exercise_tip,
            accuracy_score: new_session.accuracy_score,
            risk_level: new_session.risk_level,
            duration_seconds: new_session.duration_seconds,
        }))
    }

    /// Recent history plus a narrative over it. The summarizer is skipped when
    /// there is no history.
    #[tracing::instrument(name = "Exercise overview", skip(self))]
    pub async fn overview(&self) -> Result<ExerciseOverview, SessionError> {
        let pool = self.pool()?;
        let sessions = get_recent_sessions(pool, RECENT_SESSIONS_LIMIT).await?;

        if sessions.is_empty() {
            return Ok(ExerciseOverview {
                history: Vec::new(),
                ai_overview: NO_SESSIONS_OVERVIEW.to_string(),
            });
        }

        let ai_overview = self
            .summarizer
            .summarize(&SummaryContext::Overview {
                history_summary: format_history_summary(&sessions),
            })
            .await;

        Ok(ExerciseOverview {
            history: sessions.iter().map(HistoryEntry::from).collect(),
            ai_overview,
        })
    }

    pub async fn session_detail(&self, session_id: i64) -> Result<SessionDetail, SessionError> {
        let pool = self.pool()?;
        let session = get_session_by_id(pool, session_id)
            .await?
            .ok_or(SessionError::NotFound(session_id))?;
        let readings = get_session_readings(pool, session_id).await?;

        Ok(SessionDetail { session, readings })
    }
}
