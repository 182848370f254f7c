use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse physiological risk derived from heart rate and wrist angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "Low (Safe)")]
    Low,
    #[serde(rename = "Moderate (Caution)")]
    Moderate,
    #[serde(rename = "High (Danger)")]
    High,
}

impl RiskLevel {
    /// Danger thresholds are checked before caution thresholds.
    pub fn classify(heart_rate: i32, wrist_angle: f64) -> Self {
        if heart_rate > 120 || heart_rate < 40 {
            RiskLevel::High
        } else if heart_rate > 100 || wrist_angle > 45.0 {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low (Safe)",
            RiskLevel::Moderate => "Moderate (Caution)",
            RiskLevel::High => "High (Danger)",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heart_rate_danger_zone() {
        assert_eq!(RiskLevel::classify(121, 0.0), RiskLevel::High);
        assert_eq!(RiskLevel::classify(39, 0.0), RiskLevel::High);
        assert_eq!(RiskLevel::classify(0, 0.0), RiskLevel::High);
    }

    #[test]
    fn test_danger_takes_precedence_over_caution() {
        // Angle alone would be caution, heart rate makes it danger
        assert_eq!(RiskLevel::classify(130, 60.0), RiskLevel::High);
        assert_eq!(RiskLevel::classify(35, 90.0), RiskLevel::High);
    }

    #[test]
    fn test_caution_zone() {
        assert_eq!(RiskLevel::classify(101, 0.0), RiskLevel::Moderate);
        assert_eq!(RiskLevel::classify(120, 0.0), RiskLevel::Moderate);
        assert_eq!(RiskLevel::classify(80, 45.1), RiskLevel::Moderate);
    }

    #[test]
    fn test_boundaries_are_exclusive() {
        assert_eq!(RiskLevel::classify(40, 0.0), RiskLevel::Low);
        assert_eq!(RiskLevel::classify(100, 45.0), RiskLevel::Low);
        // Negative angles never trigger caution
        assert_eq!(RiskLevel::classify(70, -80.0), RiskLevel::Low);
    }

    #[test]
    fn test_labels_cover_full_input_grid() {
        let labels = ["Low (Safe)", "Moderate (Caution)", "High (Danger)"];
        for hr in (-10..=200).step_by(5) {
            for angle in [-90.0, -45.0, 0.0, 30.0, 45.0, 46.0, 90.0] {
                let level = RiskLevel::classify(hr, angle);
                assert!(labels.contains(&level.as_str()));
                if hr > 120 || hr < 40 {
                    assert_eq!(level, RiskLevel::High);
                }
            }
        }
    }

    #[test]
    fn test_serializes_as_label() {
        let json = serde_json::to_string(&RiskLevel::Moderate).unwrap();
        assert_eq!(json, "\"Moderate (Caution)\"");
        assert_eq!(RiskLevel::High.to_string(), "High (Danger)");
    }
}
