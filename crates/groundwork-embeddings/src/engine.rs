//! EmbeddingEngine: the main entry point for groundwork-embeddings.
//!
//! Coordinates the configured provider with the query cache, a per-attempt
//! timeout and retry with exponential backoff. Implements `IEmbedder`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use groundwork_core::config::EmbeddingConfig;
use groundwork_core::errors::EmbeddingError;
use groundwork_core::traits::IEmbedder;
use tracing::{debug, info, warn};

use crate::cache::EmbeddingCache;
use crate::providers;

/// Base delay of the retry backoff; attempt `n` waits `BASE * 2^(n-1)` after failing.
const RETRY_BASE_DELAY_MS: u64 = 100;

/// Cached, retrying embedder.
pub struct EmbeddingEngine {
    provider: Arc<dyn IEmbedder>,
    cache: EmbeddingCache,
    max_attempts: u32,
    timeout: Duration,
}

impl EmbeddingEngine {
    /// Wrap an existing provider using the cache/retry knobs from `config`.
    pub fn new(provider: Arc<dyn IEmbedder>, config: &EmbeddingConfig) -> Self {
        info!(
            provider = provider.name(),
            dims = provider.dimensions(),
            cache_capacity = config.cache_capacity,
            cache_ttl_secs = config.cache_ttl_secs,
            "EmbeddingEngine initialized"
        );

        Self {
            provider,
            cache: EmbeddingCache::new(
                config.cache_capacity,
                Duration::from_secs(config.cache_ttl_secs),
            ),
            max_attempts: config.max_retries.max(1),
            timeout: Duration::from_millis(config.timeout_ms),
        }
    }

    /// Build the configured provider and wrap it.
    pub fn from_config(
        config: &EmbeddingConfig,
        api_key: Option<String>,
    ) -> Result<Self, EmbeddingError> {
        let provider = providers::create_provider(config, api_key)?;
        Ok(Self::new(provider, config))
    }

    /// Embed `text`, consulting the cache only when `use_cache` is set.
    ///
    /// Uncached calls neither read nor populate the cache.
    pub async fn embed_with_cache(
        &self,
        text: &str,
        use_cache: bool,
    ) -> Result<Vec<f32>, EmbeddingError> {
        if !use_cache {
            return self.embed_with_retry(text).await;
        }

        let key = EmbeddingCache::key_for(text);
        if let Some(hit) = self.cache.get(&key) {
            debug!(key = %key, "embedding cache hit");
            return Ok(hit);
        }

        let embedding = self.embed_with_retry(text).await?;
        self.cache.insert(key, embedding.clone());
        Ok(embedding)
    }

    async fn embed_with_retry(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut last_err = None;

        for attempt in 1..=self.max_attempts {
            match self.embed_once(text).await {
                Ok(embedding) => {
                    if attempt > 1 {
                        debug!(attempt, "embedding succeeded after retry");
                    }
                    return Ok(embedding);
                }
                // A wrong-sized vector will not fix itself on retry.
                Err(e @ EmbeddingError::DimensionMismatch { .. }) => return Err(e),
                Err(e) => {
                    warn!(attempt, error = %e, "embedding attempt failed");
                    last_err = Some(e);
                    if attempt < self.max_attempts {
                        let delay = RETRY_BASE_DELAY_MS * 2u64.pow(attempt - 1);
                        tokio::time::sleep(Duration::from_millis(delay)).await;
                    }
                }
            }
        }

        Err(EmbeddingError::RetriesExhausted {
            attempts: self.max_attempts,
            reason: last_err
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no attempt made".to_string()),
        })
    }

    async fn embed_once(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let embedding = tokio::time::timeout(self.timeout, self.provider.embed(text))
            .await
            .map_err(|_| EmbeddingError::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
            })??;

        let expected = self.provider.dimensions();
        if embedding.len() != expected {
            return Err(EmbeddingError::DimensionMismatch {
                expected,
                actual: embedding.len(),
            });
        }
        Ok(embedding)
    }

    /// Number of cached query embeddings.
    pub fn cache_len(&self) -> u64 {
        self.cache.len()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

#[async_trait]
impl IEmbedder for EmbeddingEngine {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.embed_with_cache(text, true).await
    }

    fn dimensions(&self) -> usize {
        self.provider.dimensions()
    }

    fn name(&self) -> &str {
        self.provider.name()
    }
}
