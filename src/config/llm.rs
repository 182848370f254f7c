use serde::Deserialize;

fn default_timeout_secs() -> u64 {
    45
}

fn default_num_predict() -> u32 {
    300
}

/// Connection details for the local Ollama instance that writes session summaries.
#[derive(Deserialize, Debug, Clone)]
pub struct LlmSettings {
    pub base_url: String,
    pub model_name: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_num_predict")]
    pub num_predict: u32,
}

impl LlmSettings {
    pub fn new(base_url: String, model_name: String) -> Self {
        Self {
            base_url,
            model_name,
            timeout_secs: default_timeout_secs(),
            num_predict: default_num_predict(),
        }
    }
}
