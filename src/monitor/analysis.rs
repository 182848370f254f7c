use crate::models::llm::SessionAnalysis;

pub const CONCLUSION_MARKER: &str = "Medical Conclusion:";
pub const TIP_MARKER: &str = "Exercise Tip:";
pub const DEFAULT_CONCLUSION: &str = "Analysis pending";
pub const DEFAULT_TIP: &str = "Keep practicing";

/// Split generated session text into a conclusion and an exercise tip.
///
/// Never fails. Without the conclusion marker the whole text becomes the
/// conclusion and the default tip is used.
pub fn parse_session_analysis(text: &str) -> SessionAnalysis {
    let Some((_, after_conclusion)) = text.split_once(CONCLUSION_MARKER) else {
        tracing::debug!("Generated text has no conclusion marker, using it verbatim");
        let conclusion = text.trim();
        return SessionAnalysis {
            conclusion: if conclusion.is_empty() {
                DEFAULT_CONCLUSION.to_string()
            } else {
                conclusion.to_string()
            },
            tip: DEFAULT_TIP.to_string(),
        };
    };

    // A repeated conclusion marker ends the section
    let section = after_conclusion
        .split(CONCLUSION_MARKER)
        .next()
        .unwrap_or(after_conclusion);

    let mut parts = section.split(TIP_MARKER);
    let conclusion = parts.next().unwrap_or_default().trim();
    let tip = parts.next().map(str::trim).filter(|tip| !tip.is_empty());

    SessionAnalysis {
        conclusion: if conclusion.is_empty() {
            DEFAULT_CONCLUSION.to_string()
        } else {
            conclusion.to_string()
        },
        tip: tip.unwrap_or(DEFAULT_TIP).to_string(),
    }
}
