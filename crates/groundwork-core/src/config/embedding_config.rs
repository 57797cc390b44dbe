use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Embedding provider: "api" or "hashing".
    pub provider: String,
    pub model: String,
    /// Override for the embeddings endpoint URL.
    pub endpoint: Option<String>,
    /// Falls back to the environment when unset.
    pub api_key: Option<String>,
    pub dimensions: usize,
    /// In-memory cache max entries.
    pub cache_capacity: u64,
    pub cache_ttl_secs: u64,
    pub max_retries: u32,
    pub timeout_ms: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: defaults::DEFAULT_EMBEDDING_PROVIDER.to_string(),
            model: defaults::DEFAULT_EMBEDDING_MODEL.to_string(),
            endpoint: None,
            api_key: None,
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            cache_capacity: defaults::DEFAULT_EMBEDDING_CACHE_CAPACITY,
            cache_ttl_secs: defaults::DEFAULT_EMBEDDING_CACHE_TTL_SECS,
            max_retries: defaults::DEFAULT_EMBEDDING_MAX_RETRIES,
            timeout_ms: defaults::DEFAULT_EMBEDDING_TIMEOUT_MS,
        }
    }
}
