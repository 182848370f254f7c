use crate::models::sensor::Reading;
use crate::monitor::risk::RiskLevel;

/// Aggregates computed over the readings of one finished recording.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStats {
    pub avg_heart_rate: i32,
    pub avg_wrist_angle: f64,
    pub stability_score: f64,
    pub risk_level: RiskLevel,
    pub reading_count: usize,
}

impl SessionStats {
    /// Returns `None` for an empty buffer.
    pub fn from_readings(readings: &[Reading]) -> Option<Self> {
        if readings.is_empty() {
            return None;
        }
        Some(Self::aggregate(readings))
    }

    /// Caller guarantees `readings` is non-empty.
    pub(crate) fn aggregate(readings: &[Reading]) -> Self {
        debug_assert!(!readings.is_empty());
        let count = readings.len() as f64;

        let hr_sum: i64 = readings.iter().map(|r| r.heart_rate as i64).sum();
        let avg_heart_rate = (hr_sum as f64 / count) as i32;

        let angle_sum: f64 = readings.iter().map(|r| r.wrist_angle).sum();
        let avg_wrist_angle = round_to(angle_sum / count, 2);

        let stability_score = calculate_stability_score(readings);

        Self {
            avg_heart_rate,
            avg_wrist_angle,
            stability_score,
            risk_level: RiskLevel::classify(avg_heart_rate, avg_wrist_angle),
            reading_count: readings.len(),
        }
    }
}

/// Penalizes the mean absolute deviation from a 0 degree baseline, clamped at zero.
pub fn calculate_stability_score(readings: &[Reading]) -> f64 {
    if readings.is_empty() {
        return 0.0;
    }
    let mean_deviation = readings.iter().map(|r| r.wrist_angle.abs()).sum::<f64>()
        / readings.len() as f64;
    round_to((100.0 - mean_deviation).max(0.0), 1)
}

/// Exact halves go to the even neighbour, so 0.125 becomes 0.12.
fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}
