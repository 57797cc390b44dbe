//! Candidate re-ranking.

pub mod reranker;

#[cfg(feature = "reranker")]
pub mod fastembed_scorer;

pub use reranker::{sort_by_similarity, CrossEncoderReranker};

#[cfg(feature = "reranker")]
pub use fastembed_scorer::FastEmbedScorer;
