use serde::{Deserialize, Serialize};

use super::defaults;

/// Text-generation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub model: String,
    /// Override for the chat completions endpoint URL.
    pub endpoint: Option<String>,
    /// Falls back to the environment when unset.
    pub api_key: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Bound on the final answer generation.
    pub timeout_ms: u64,
    /// Bound on every advisory judgment call.
    pub judge_timeout_ms: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: defaults::DEFAULT_GENERATION_MODEL.to_string(),
            endpoint: None,
            api_key: None,
            temperature: defaults::DEFAULT_TEMPERATURE,
            max_tokens: defaults::DEFAULT_MAX_TOKENS,
            timeout_ms: defaults::DEFAULT_GENERATION_TIMEOUT_MS,
            judge_timeout_ms: defaults::DEFAULT_JUDGE_TIMEOUT_MS,
        }
    }
}
