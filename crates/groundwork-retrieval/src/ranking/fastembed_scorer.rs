//! fastembed cross-encoder behind the `reranker` feature.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use fastembed::{RerankInitOptions, RerankerModel, TextRerank};
use groundwork_core::errors::RetrievalError;
use groundwork_core::traits::IRelevanceScorer;

pub struct FastEmbedScorer {
    model: Arc<Mutex<TextRerank>>,
}

impl FastEmbedScorer {
    /// Load the BGE base reranker. Downloads the model on first use.
    pub fn try_new() -> Result<Self, RetrievalError> {
        let model = TextRerank::try_new(RerankInitOptions::new(RerankerModel::BGERerankerBase))
            .map_err(|e| RetrievalError::RankingFailed {
                reason: format!("failed to load reranker model: {e}"),
            })?;
        Ok(Self {
            model: Arc::new(Mutex::new(model)),
        })
    }
}

#[async_trait]
impl IRelevanceScorer for FastEmbedScorer {
    async fn score(&self, query: &str, passages: &[String]) -> Result<Vec<f64>, RetrievalError> {
        let model = Arc::clone(&self.model);
        let query = query.to_string();
        let passages = passages.to_vec();

        tokio::task::spawn_blocking(move || {
            let mut model = model.lock().map_err(|_| RetrievalError::RankingFailed {
                reason: "reranker lock poisoned".to_string(),
            })?;
            let documents: Vec<&str> = passages.iter().map(String::as_str).collect();
            let results = model
                .rerank(query.as_str(), documents, false, None)
                .map_err(|e| RetrievalError::RankingFailed {
                    reason: e.to_string(),
                })?;

            let mut scores = vec![f64::NEG_INFINITY; passages.len()];
            for r in results {
                if let Some(slot) = scores.get_mut(r.index) {
                    *slot = r.score as f64;
                }
            }
            Ok(scores)
        })
        .await
        .map_err(|e| RetrievalError::RankingFailed {
            reason: e.to_string(),
        })?
    }

    fn name(&self) -> &str {
        "fastembed-bge-reranker-base"
    }
}
