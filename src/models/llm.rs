use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

/// Which prompt template the summarizer should use.
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryContext {
    /// Analysis of one finished recording.
    SingleSession { avg_heart_rate: i32, avg_wrist_angle: f64 },
    /// Progress report over several stored sessions.
    Overview { history_summary: String },
}

/// Conclusion and tip extracted from the generated session text.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SessionAnalysis {
    pub conclusion: String,
    pub tip: String,
}

// Error types for the generation service
#[derive(Debug, ThisError)]
pub enum LLMError {
    #[error("LLM service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
