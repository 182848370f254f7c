use std::time::Duration;
use serde::Deserialize;
use serde_json::json;
use reqwest::Client;

use crate::config::llm::LlmSettings;
use crate::models::llm::{LLMError, SummaryContext};
use crate::models::session::SessionRecord;

pub const FALLBACK_ANALYSIS: &str = "Medical Conclusion: Data recorded.\n\nExercise Tip: Consult dashboard.";

#[derive(Deserialize)]
struct ModelTags {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Deserialize)]
struct ModelTag {
    name: String,
}

#[derive(Clone, Debug)]
pub struct Ollama {
    client: Client,
    request_timeout: Duration,
    model_name: String,
    base_url: String,
    num_predict: u32,
}

impl Ollama {
    pub fn new(settings: &LlmSettings) -> Result<Self, LLMError> {
        let request_timeout = Duration::from_secs(settings.timeout_secs);
        let client = Client::builder()
            .timeout(request_timeout)
            .build()?;

        Ok(Self {
            client,
            request_timeout,
            model_name: settings.model_name.clone(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            num_predict: settings.num_predict,
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// True when Ollama answers `/api/tags` and lists the configured model.
    pub async fn health_check(&self) -> bool {
        let tags = self.client
            .get(&format!("{}/api/tags", self.base_url))
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .and_then(|response| response.error_for_status());

        let available = match tags {
            Ok(response) => match response.json::<ModelTags>().await {
                Ok(tags) => tags.models.iter().any(|model| model.name == self.model_name),
                Err(e) => {
                    tracing::warn!("Unreadable model list from Ollama: {}", e);
                    false
                }
            },
            Err(e) => {
                tracing::warn!("Ollama not reachable at {}: {}", self.base_url, e);
                false
            }
        };

        if available {
            tracing::info!("Summary model '{}' is ready", self.model_name);
        } else {
            tracing::warn!("Summary model '{}' is not available", self.model_name);
        }
        available
    }

    /// Produce summary text for the given context. Never fails; any error is
    /// logged and replaced by `FALLBACK_ANALYSIS`.
    #[tracing::instrument(name = "Generate summary", skip(self, context))]
    pub async fn summarize(&self, context: &SummaryContext) -> String {
        let prompt = build_prompt(context);
        match self.generate(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("AI Error: {}", e);
                FALLBACK_ANALYSIS.to_string()
            }
        }
    }

    /// Make actual HTTP call
    pub async fn generate(&self, prompt: &str) -> Result<String, LLMError> {
        tracing::info!("Using Ollama model: {}", self.model_name);

        let ollama_request = json!({
            "model": self.model_name,
            "prompt": prompt,
            "stream": false,
            "options": {
                "num_predict": self.num_predict
            }
        });

        let response = self.client
            .post(&format!("{}/api/generate", self.base_url))
            .json(&ollama_request)
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LLMError::Timeout
                } else {
                    LLMError::NetworkError(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            tracing::error!("Ollama API error {}: {}", status, error_text);

            return Err(match status.as_u16() {
                404 => LLMError::InvalidResponse(format!("Model not found: {}", error_text)),
                429 => LLMError::RateLimited,
                500..=599 => LLMError::ServiceUnavailable(error_text),
                _ => LLMError::InvalidResponse(format!("HTTP {}: {}", status, error_text))
            });
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                LLMError::Timeout
            } else {
                LLMError::NetworkError(e)
            }
        })?;
        let ollama_response: serde_json::Value = serde_json::from_str(&body)?;

        let content = ollama_response["response"]
            .as_str()
            .ok_or_else(|| LLMError::InvalidResponse("No response content".to_string()))?
            .trim();

        if content.is_empty() {
            return Err(LLMError::InvalidResponse("Empty content".to_string()));
        }

        Ok(content.to_string())
    }
}

pub fn build_prompt(context: &SummaryContext) -> String {
    match context {
        SummaryContext::SingleSession { avg_heart_rate, avg_wrist_angle } => format!(
            "Context: Physical therapy analysis. \
            Data: Avg HR {} bpm, Avg Angle {} degrees. \
            Task: Provide 'Medical Conclusion' and one 'Exercise Tip'. \
            Format: \
            Medical Conclusion: [One sentence summary].\n\n\
            Exercise Tip: [One actionable tip].\n\
            No conversational filler.",
            avg_heart_rate, avg_wrist_angle
        ),
        SummaryContext::Overview { history_summary } => format!(
            "Context: Patient Progress Report over multiple sessions. \
            History: {} \
            Task: Analyze the history to identify positive trends and suggest one area for improvement. \
            Format: Provide a structured report in plain text. \
            Start with a brief conversational opening. \
            Strict Instructions: Do not use Markdown. Do not use bold text. Do not use asterisks. \
            Follow this exact structure:\n\n\
            Example Output:\n\
            Here is the summary of your recent progress.\n\
            Trend Analysis:\n\
            - Observation: Heart rate has stabilized.\n\
            - Trend: Consistency is improving.\n\n\
            Area for Improvement:\n\
            - Recommendation: Focus on wrist stability.\n\n\
            Now generate the report for the current data:",
            history_summary
        ),
    }
}

/// One line per session, e.g. `Session 3: Avg HR 92, Accuracy 88.3%`.
pub fn format_history_summary(sessions: &[SessionRecord]) -> String {
    sessions
        .iter()
        .map(|s| format!(
            "Session {}: Avg HR {}, Accuracy {:.1}%",
            s.id, s.avg_heart_rate, s.accuracy_score
        ))
        .collect::<Vec<_>>()
        .join("; ")
}
