pub mod analysis;
pub mod recorder;
pub mod risk;
pub mod stats;

pub use analysis::parse_session_analysis;
pub use recorder::{SessionRecorder, StopOutcome};
pub use risk::RiskLevel;
pub use stats::SessionStats;
