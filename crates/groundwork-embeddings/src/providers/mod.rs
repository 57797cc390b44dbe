//! Provider registry.
//!
//! - `api`: OpenAI-compatible embeddings endpoint (default, needs a key)
//! - `hashing`: deterministic feature hashing, offline

pub mod api_provider;
pub mod hashing_provider;

pub use api_provider::ApiEmbedder;
pub use hashing_provider::HashingEmbedder;

use std::sync::Arc;

use groundwork_core::config::EmbeddingConfig;
use groundwork_core::errors::EmbeddingError;
use groundwork_core::traits::IEmbedder;
use tracing::{info, warn};

/// Create the provider named by `config.provider`.
///
/// The API provider without a key is an error rather than a silent downgrade,
/// since its vectors would not match a corpus embedded by the API model.
pub fn create_provider(
    config: &EmbeddingConfig,
    api_key: Option<String>,
) -> Result<Arc<dyn IEmbedder>, EmbeddingError> {
    match config.provider.as_str() {
        "api" => {
            let api_key = api_key.ok_or_else(|| EmbeddingError::ProviderUnavailable {
                provider: format!("api ({}): no API key configured", config.model),
            })?;
            let provider = ApiEmbedder::new(
                config.model.clone(),
                api_key,
                config.endpoint.clone(),
                config.dimensions,
            )?;
            info!(provider = "api", model = %config.model, "embedding provider ready");
            Ok(Arc::new(provider))
        }
        "hashing" => {
            info!(provider = "hashing", "using feature-hashing embedding provider");
            Ok(Arc::new(HashingEmbedder::new(config.dimensions)))
        }
        other => {
            warn!(provider = %other, "unknown embedding provider, using feature hashing");
            Ok(Arc::new(HashingEmbedder::new(config.dimensions)))
        }
    }
}
