use serde::{Deserialize, Serialize};

use super::defaults;

/// Context compression configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionConfig {
    /// Token budget for the context handed to the generator.
    pub context_max_tokens: usize,
    /// Cap on the text sent to the generator in aggressive mode.
    pub aggressive_input_chars: usize,
    /// Leading chars hashed for near-duplicate detection in `moderate` mode.
    pub dedup_prefix_chars: usize,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            context_max_tokens: defaults::DEFAULT_CONTEXT_MAX_TOKENS,
            aggressive_input_chars: defaults::DEFAULT_AGGRESSIVE_INPUT_CHARS,
            dedup_prefix_chars: defaults::DEFAULT_DEDUP_PREFIX_CHARS,
        }
    }
}
