use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One sample pushed by the wearable.
#[derive(Debug, Deserialize, Serialize, Clone, Copy)]
pub struct SensorData {
    pub heart_rate: i32,
    pub wrist_angle: f64,
}

/// A buffered sample, stamped when it reached the backend.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Reading {
    pub heart_rate: i32,
    pub wrist_angle: f64,
    pub timestamp: DateTime<Utc>,
}

impl Reading {
    pub fn from_sample(sample: SensorData, timestamp: DateTime<Utc>) -> Self {
        Self {
            heart_rate: sample.heart_rate,
            wrist_angle: sample.wrist_angle,
            timestamp,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SensorAck {
    pub status: &'static str,
}

impl SensorAck {
    pub fn received() -> Self {
        Self { status: "received" }
    }
}
