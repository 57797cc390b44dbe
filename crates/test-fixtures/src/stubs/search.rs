use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use groundwork_core::errors::RetrievalError;
use groundwork_core::traits::{ILexicalSearch, IVectorSearch};
use groundwork_core::{Document, MetadataFilters};

use super::cosine;

/// In-memory vector search over a fixed document list.
///
/// Scores by cosine against each document's embedding, or by its preset
/// `similarity` when it has none.
pub struct StaticVectorSearch {
    documents: Vec<Document>,
    fail: bool,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl StaticVectorSearch {
    pub fn new(documents: Vec<Document>) -> Self {
        Self {
            documents,
            fail: false,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::empty()
        }
    }

    /// Sleep before answering, for timeout paths.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IVectorSearch for StaticVectorSearch {
    async fn search(
        &self,
        query_vector: &[f32],
        top_k: usize,
        threshold: f64,
        filters: &MetadataFilters,
    ) -> Result<Vec<Document>, RetrievalError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(RetrievalError::SearchFailed {
                reason: "stub vector search failure".to_string(),
            });
        }

        let mut hits: Vec<Document> = self
            .documents
            .iter()
            .filter(|d| d.matches_filters(filters))
            .filter_map(|d| {
                let sim = match &d.embedding {
                    Some(e) => cosine(query_vector, e),
                    None => d.similarity.unwrap_or(0.0),
                };
                (sim > threshold).then(|| d.clone().with_similarity(sim))
            })
            .collect();
        hits.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(top_k);
        Ok(hits)
    }
}

/// In-memory lexical search: every query term must appear as a word.
///
/// Score is the total number of term occurrences.
pub struct StaticLexicalSearch {
    documents: Vec<Document>,
    fail: bool,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl StaticLexicalSearch {
    pub fn new(documents: Vec<Document>) -> Self {
        Self {
            documents,
            fail: false,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::empty()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn words(text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
            .collect()
    }
}

#[async_trait]
impl ILexicalSearch for StaticLexicalSearch {
    async fn search(
        &self,
        query_text: &str,
        top_k: usize,
        filters: &MetadataFilters,
    ) -> Result<Vec<Document>, RetrievalError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(RetrievalError::SearchFailed {
                reason: "stub lexical search failure".to_string(),
            });
        }

        let terms = Self::words(query_text);
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let mut hits: Vec<Document> = self
            .documents
            .iter()
            .filter(|d| d.matches_filters(filters))
            .filter_map(|d| {
                let words = Self::words(&d.content);
                let mut score = 0usize;
                for term in &terms {
                    let n = words.iter().filter(|w| *w == term).count();
                    if n == 0 {
                        return None;
                    }
                    score += n;
                }
                Some(d.clone().with_similarity(score as f64))
            })
            .collect();
        hits.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(top_k);
        Ok(hits)
    }
}
