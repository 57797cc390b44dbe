//! ContextCompressor: mode dispatch plus the aggressive-mode generator call.

use std::sync::Arc;
use std::time::Duration;

use groundwork_core::config::CompressionConfig;
use groundwork_core::constants::estimate_tokens;
use groundwork_core::models::CompressionMode;
use groundwork_core::traits::IGenerator;
use groundwork_core::Document;
use groundwork_observability::tracing_setup::events;
use tracing::debug;

use crate::modes;
use crate::render::render_all;

/// Compresses documents into a budgeted context string. Never fails.
pub struct ContextCompressor {
    generator: Option<Arc<dyn IGenerator>>,
    judge_timeout: Duration,
    config: CompressionConfig,
}

impl ContextCompressor {
    /// Compressor without a generator; `aggressive` degrades to `moderate`.
    pub fn new(config: CompressionConfig) -> Self {
        Self {
            generator: None,
            judge_timeout: Duration::from_millis(
                groundwork_core::config::defaults::DEFAULT_JUDGE_TIMEOUT_MS,
            ),
            config,
        }
    }

    pub fn with_generator(mut self, generator: Arc<dyn IGenerator>, judge_timeout: Duration) -> Self {
        self.generator = Some(generator);
        self.judge_timeout = judge_timeout;
        self
    }

    /// The configured context budget.
    pub fn default_budget(&self) -> usize {
        self.config.context_max_tokens
    }

    pub async fn compress(
        &self,
        documents: &[Document],
        max_tokens: usize,
        mode: CompressionMode,
    ) -> String {
        if documents.is_empty() {
            return String::new();
        }

        let compressed = match mode {
            CompressionMode::None => modes::concatenate(documents, max_tokens),
            CompressionMode::Moderate => self.moderate(documents, max_tokens),
            CompressionMode::Aggressive => self.aggressive(documents, max_tokens).await,
        };

        debug!(
            mode = ?mode,
            documents = documents.len(),
            tokens = estimate_tokens(&compressed),
            max_tokens,
            "context compressed"
        );
        compressed
    }

    fn moderate(&self, documents: &[Document], max_tokens: usize) -> String {
        modes::dedup_and_truncate(documents, max_tokens, self.config.dedup_prefix_chars)
    }

    async fn aggressive(&self, documents: &[Document], max_tokens: usize) -> String {
        let full = render_all(documents);
        if estimate_tokens(&full) <= max_tokens {
            return full;
        }

        let Some(generator) = self.generator.as_ref() else {
            events::compression_fallback("aggressive", "moderate", "no generator configured");
            return self.moderate(documents, max_tokens);
        };

        let request =
            modes::compression_request(&full, max_tokens, self.config.aggressive_input_chars);
        match groundwork_llm::judge(generator.as_ref(), &request, self.judge_timeout).await {
            Ok(condensed) => condensed,
            Err(e) => {
                events::compression_fallback("aggressive", "moderate", &e.to_string());
                self.moderate(documents, max_tokens)
            }
        }
    }
}
