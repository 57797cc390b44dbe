//! OpenAI-compatible embeddings endpoint (`POST /v1/embeddings`).

use async_trait::async_trait;
use groundwork_core::errors::EmbeddingError;
use groundwork_core::traits::IEmbedder;
use serde::{Deserialize, Serialize};
use tracing::debug;

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/embeddings";

/// Cloud embedding provider. Single attempt per call; the engine retries.
pub struct ApiEmbedder {
    client: reqwest::Client,
    model: String,
    api_key: String,
    endpoint: String,
    dimensions: usize,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: [&'a str; 1],
}

#[derive(Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedData>,
}

#[derive(Deserialize)]
struct EmbedData {
    embedding: Vec<f32>,
}

impl ApiEmbedder {
    pub fn new(
        model: String,
        api_key: String,
        endpoint: Option<String>,
        dimensions: usize,
    ) -> Result<Self, EmbeddingError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| EmbeddingError::ProviderUnavailable {
                provider: format!("api: client build failed: {e}"),
            })?;

        Ok(Self {
            client,
            model,
            api_key,
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            dimensions,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl IEmbedder for ApiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let body = EmbedRequest {
            model: &self.model,
            input: [text],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("HTTP error: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::InferenceFailed {
                reason: format!("API returned {status}: {body}"),
            });
        }

        let parsed: EmbedResponse =
            response
                .json()
                .await
                .map_err(|e| EmbeddingError::InferenceFailed {
                    reason: format!("JSON parse error: {e}"),
                })?;

        debug!(model = %self.model, "embedding received");
        parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| EmbeddingError::InferenceFailed {
                reason: "empty response".to_string(),
            })
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_shape() {
        let body = serde_json::to_value(EmbedRequest {
            model: "text-embedding-3-small",
            input: ["hello"],
        })
        .unwrap();
        assert_eq!(body["model"], "text-embedding-3-small");
        assert_eq!(body["input"][0], "hello");
    }

    #[test]
    fn default_endpoint_is_openai() {
        let p = ApiEmbedder::new("m".into(), "k".into(), None, 8).unwrap();
        assert_eq!(p.endpoint(), DEFAULT_ENDPOINT);
        let p = ApiEmbedder::new("m".into(), "k".into(), Some("http://localhost:9/e".into()), 8)
            .unwrap();
        assert_eq!(p.endpoint(), "http://localhost:9/e");
    }

    #[tokio::test]
    async fn unreachable_endpoint_fails_inference() {
        let p = ApiEmbedder::new(
            "m".into(),
            "k".into(),
            Some("http://127.0.0.1:9/v1/embeddings".into()),
            8,
        )
        .unwrap();
        let err = p.embed("x").await.unwrap_err();
        assert!(matches!(err, EmbeddingError::InferenceFailed { .. }));
    }
}
