use serde::{Deserialize, Serialize};

pub const IDLE_RISK_LABEL: &str = "Idle";
pub const ACTIVE_RISK_LABEL: &str = "Active";
pub const READY_SUMMARY: &str = "Ready to start session.";
pub const RECORDING_SUMMARY: &str = "Recording...";
pub const NO_DATA_SUMMARY: &str = "No data recorded.";

/// Snapshot served to the dashboard while it polls.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LiveStatus {
    pub heart_rate: i32,
    pub wrist_angle: f64,
    pub risk_level: String,
    pub ai_summary: String,
    pub is_recording: bool,
}

impl Default for LiveStatus {
    fn default() -> Self {
        Self {
            heart_rate: 0,
            wrist_angle: 0.0,
            risk_level: IDLE_RISK_LABEL.to_string(),
            ai_summary: READY_SUMMARY.to_string(),
            is_recording: false,
        }
    }
}
