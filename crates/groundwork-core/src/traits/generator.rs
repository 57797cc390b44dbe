use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;

use crate::errors::GenerationError;
use crate::models::GenerationRequest;

/// Token deltas from a streamed generation.
pub type TokenStream = Pin<Box<dyn Stream<Item = Result<String, GenerationError>> + Send>>;

/// Prompt → text, optionally streamed.
#[async_trait]
pub trait IGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;

    /// Stream the answer token by token.
    ///
    /// Providers without streaming yield the aggregate as a single delta.
    async fn generate_stream(
        &self,
        request: &GenerationRequest,
    ) -> Result<TokenStream, GenerationError> {
        let text = self.generate(request).await?;
        Ok(Box::pin(futures::stream::once(async move { Ok(text) })))
    }

    fn name(&self) -> &str;
}
