use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::sensor::{Reading, SensorData};
use crate::models::status::{LiveStatus, ACTIVE_RISK_LABEL, NO_DATA_SUMMARY, RECORDING_SUMMARY};
use crate::monitor::risk::RiskLevel;
use crate::monitor::stats::SessionStats;

/// Whether a recording is open, and if so the readings it owns.
#[derive(Debug)]
pub enum RecordingState {
    Idle,
    Recording {
        /// Correlates log lines of one recording before it has a database id.
        recording_id: Uuid,
        started_at: DateTime<Utc>,
        readings: Vec<Reading>,
    },
}

/// A recording that was closed by `stop` and still has to be analysed and stored.
/// Only built by `SessionRecorder::stop`, which never hands out an empty buffer.
#[derive(Debug)]
pub struct CompletedRecording {
    pub recording_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    readings: Vec<Reading>,
}

impl CompletedRecording {
    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats::aggregate(&self.readings)
    }

    pub fn duration_seconds(&self) -> i32 {
        self.ended_at
            .signed_duration_since(self.started_at)
            .num_seconds()
            .max(0) as i32
    }
}

#[derive(Debug)]
pub enum StopOutcome {
    NotActive,
    NoData,
    Completed(CompletedRecording),
}

#[derive(Debug)]
struct RecorderInner {
    state: RecordingState,
    status: LiveStatus,
}

/// Owns the single process-wide recording and the live status snapshot.
///
/// The lock is only held for in-memory updates. `stop` swaps the buffer out,
/// so samples that arrive while a stop is being processed never reach it.
#[derive(Debug)]
pub struct SessionRecorder {
    inner: Mutex<RecorderInner>,
}

impl Default for SessionRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(RecorderInner {
                state: RecordingState::Idle,
                status: LiveStatus::default(),
            }),
        }
    }

    /// Opens a new recording. An already open recording is discarded unsaved.
    pub async fn start(&self) -> Uuid {
        let mut inner = self.inner.lock().await;
        if let RecordingState::Recording { recording_id, readings, .. } = &inner.state {
            tracing::warn!(
                "Restarting recording {} - discarding {} unsaved readings",
                recording_id,
                readings.len()
            );
        }

        let recording_id = Uuid::new_v4();
        inner.state = RecordingState::Recording {
            recording_id,
            started_at: Utc::now(),
            readings: Vec::new(),
        };
        inner.status.is_recording = true;
        inner.status.ai_summary = RECORDING_SUMMARY.to_string();
        inner.status.risk_level = ACTIVE_RISK_LABEL.to_string();
        recording_id
    }

    /// Updates the live view and buffers the sample if a recording is open.
    /// Returns whether the sample was buffered.
    pub async fn ingest(&self, sample: SensorData) -> bool {
        let mut inner = self.inner.lock().await;
        let RecorderInner { state, status } = &mut *inner;

        status.heart_rate = sample.heart_rate;
        status.wrist_angle = sample.wrist_angle;

        match state {
            RecordingState::Idle => {
                status.risk_level =
                    RiskLevel::classify(sample.heart_rate, sample.wrist_angle).to_string();
                false
            }
            RecordingState::Recording { readings, .. } => {
                readings.push(Reading::from_sample(sample, Utc::now()));
                true
            }
        }
    }

    /// Closes the open recording and hands its readings to the caller.
    pub async fn stop(&self) -> StopOutcome {
        let mut inner = self.inner.lock().await;
        let state = std::mem::replace(&mut inner.state, RecordingState::Idle);

        match state {
            RecordingState::Idle => StopOutcome::NotActive,
            RecordingState::Recording { recording_id, started_at, readings } => {
                inner.status.is_recording = false;
                if readings.is_empty() {
                    inner.status.ai_summary = NO_DATA_SUMMARY.to_string();
                    return StopOutcome::NoData;
                }
                StopOutcome::Completed(CompletedRecording {
                    recording_id,
                    started_at,
                    ended_at: Utc::now(),
                    readings,
                })
            }
        }
    }

    pub async fn set_summary(&self, summary: impl Into<String>) {
        self.inner.lock().await.status.ai_summary = summary.into();
    }

    pub async fn status(&self) -> LiveStatus {
        self.inner.lock().await.status.clone()
    }

    pub async fn is_recording(&self) -> bool {
        matches!(self.inner.lock().await.state, RecordingState::Recording { .. })
    }

    pub async fn buffered_readings(&self) -> usize {
        match &self.inner.lock().await.state {
            RecordingState::Idle => 0,
            RecordingState::Recording { readings, .. } => readings.len(),
        }
    }
}
