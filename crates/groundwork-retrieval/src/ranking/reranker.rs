//! Cross-encoder re-ranking with a similarity-order fallback.
//!
//! Scores every (query, content) pair through an [`IRelevanceScorer`]. With
//! no scorer attached, or when scoring fails, candidates are ordered by the
//! similarity the previous stage wrote. Either way the output is at most
//! `top_k` long and the call never fails.

use std::cmp::Ordering;
use std::sync::Arc;

use groundwork_core::errors::RetrievalError;
use groundwork_core::traits::IRelevanceScorer;
use groundwork_core::Document;
use groundwork_observability::tracing_setup::events;
use tracing::debug;

/// Descending by `similarity`; documents without one sort last. Stable.
pub fn sort_by_similarity(documents: &mut [Document]) {
    documents.sort_by(|a, b| match (a.similarity, b.similarity) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

#[derive(Clone, Default)]
pub struct CrossEncoderReranker {
    scorer: Option<Arc<dyn IRelevanceScorer>>,
}

impl CrossEncoderReranker {
    /// Reranker without a model: always the similarity fallback.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scorer(scorer: Arc<dyn IRelevanceScorer>) -> Self {
        Self {
            scorer: Some(scorer),
        }
    }

    pub fn has_scorer(&self) -> bool {
        self.scorer.is_some()
    }

    pub async fn rerank(&self, query: &str, documents: Vec<Document>, top_k: usize) -> Vec<Document> {
        if documents.is_empty() {
            return documents;
        }

        let Some(scorer) = self.scorer.as_ref() else {
            return fallback(documents, top_k);
        };

        match score_all(scorer.as_ref(), query, &documents).await {
            Ok(scores) => {
                let mut scored: Vec<Document> = documents
                    .into_iter()
                    .zip(scores)
                    .map(|(doc, score)| doc.with_similarity(score))
                    .collect();
                sort_by_similarity(&mut scored);
                scored.truncate(top_k);
                debug!(scorer = scorer.name(), kept = scored.len(), "reranked");
                scored
            }
            Err(e) => {
                events::rerank_fallback(scorer.name(), &e.to_string(), documents.len());
                fallback(documents, top_k)
            }
        }
    }
}

async fn score_all(
    scorer: &dyn IRelevanceScorer,
    query: &str,
    documents: &[Document],
) -> Result<Vec<f64>, RetrievalError> {
    let passages: Vec<String> = documents.iter().map(|d| d.content.clone()).collect();
    let scores = scorer.score(query, &passages).await?;
    if scores.len() != passages.len() {
        return Err(RetrievalError::RankingFailed {
            reason: format!("{} scores for {} passages", scores.len(), passages.len()),
        });
    }
    Ok(scores)
}

fn fallback(mut documents: Vec<Document>, top_k: usize) -> Vec<Document> {
    sort_by_similarity(&mut documents);
    documents.truncate(top_k);
    documents
}
