//! Hypothetical document embeddings: retrieve with a generated passage
//! that reads like the answer instead of the question.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use groundwork_core::errors::JudgmentError;
use groundwork_core::models::RetrievalRequest;
use groundwork_core::traits::{IGenerator, IRetriever};
use groundwork_core::{Document, GenerationRequest};
use groundwork_observability::tracing_setup::events;

use super::DenseRetriever;

pub const HYDE_TEMPERATURE: f32 = 0.3;
pub const HYDE_MAX_TOKENS: u32 = 300;

const HYDE_SYSTEM_PROMPT: &str = "You are writing an excerpt from a professional profile. \
Given a question, write a short factual passage (2-4 sentences, third person) that would \
answer it as if taken from the profile. Do not mention the question.";

pub fn hyde_request(query: &str) -> GenerationRequest {
    GenerationRequest::single(
        HYDE_SYSTEM_PROMPT,
        format!("Question: {query}\n\nProfile excerpt:"),
    )
    .with_temperature(HYDE_TEMPERATURE)
    .with_max_tokens(HYDE_MAX_TOKENS)
}

pub struct HydeRetriever {
    dense: Arc<DenseRetriever>,
    generator: Arc<dyn IGenerator>,
    judge_timeout: Duration,
}

impl HydeRetriever {
    pub fn new(
        dense: Arc<DenseRetriever>,
        generator: Arc<dyn IGenerator>,
        judge_timeout: Duration,
    ) -> Self {
        Self {
            dense,
            generator,
            judge_timeout,
        }
    }

    /// The hypothetical passage for `query`.
    pub async fn hypothesize(&self, query: &str) -> Result<String, JudgmentError> {
        groundwork_llm::judge(self.generator.as_ref(), &hyde_request(query), self.judge_timeout)
            .await
    }
}

#[async_trait]
impl IRetriever for HydeRetriever {
    async fn retrieve(&self, request: &RetrievalRequest) -> Vec<Document> {
        match self.hypothesize(&request.query).await {
            // Generated passages are never worth caching.
            Ok(passage) => {
                self.dense
                    .retrieve(&request.with_query(passage).without_cache())
                    .await
            }
            Err(e) => {
                events::degradation_triggered("hyde", &e.to_string(), "dense");
                self.dense.retrieve(request).await
            }
        }
    }

    fn name(&self) -> &'static str {
        "hyde"
    }
}
