use serde::{Deserialize, Serialize};

use super::MetadataFilters;
use crate::query::{QueryType, RetrievalStrategy};

/// Everything the router derives from a raw query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryAnalysis {
    pub query_type: QueryType,
    pub retrieval_strategy: RetrievalStrategy,
    pub rewritten_query: Option<String>,
    pub metadata_filters: MetadataFilters,
    pub expanded_queries: Vec<String>,
    pub requires_rewriting: bool,
    pub requires_expansion: bool,
}

impl QueryAnalysis {
    /// The query to retrieve with: the rewrite when present, else the original.
    pub fn effective_query<'a>(&'a self, original: &'a str) -> &'a str {
        self.rewritten_query.as_deref().unwrap_or(original)
    }

    pub fn should_retrieve(&self) -> bool {
        !self.query_type.is_meta() && self.retrieval_strategy != RetrievalStrategy::None
    }
}
