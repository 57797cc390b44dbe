//! Pipeline inputs, outputs and streamed events.

use groundwork_core::errors::ErrorCode;
use groundwork_core::models::GroundingResult;
use groundwork_core::{Message, MetadataFilters, QueryType, RetrievalStrategy};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRequest {
    pub query: String,
    pub user_id: String,
    pub session_id: String,
    #[serde(default)]
    pub conversation_history: Vec<Message>,
    /// Overrides the filters the router extracts, when present.
    #[serde(default)]
    pub metadata_filters: Option<MetadataFilters>,
}

impl RunRequest {
    /// Anonymous request in a fresh session.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            user_id: "anonymous".to_string(),
            session_id: uuid::Uuid::new_v4().to_string(),
            conversation_history: Vec::new(),
            metadata_filters: None,
        }
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = session_id.into();
        self
    }

    pub fn with_history(mut self, history: Vec<Message>) -> Self {
        self.conversation_history = history;
        self
    }

    pub fn with_filters(mut self, filters: MetadataFilters) -> Self {
        self.metadata_filters = Some(filters);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResponse {
    pub response: String,
    pub retrieved_docs_count: usize,
    pub query_type: QueryType,
    pub grounding_result: GroundingResult,
}

/// Progress of a streamed run. `Completed` or `Failed` is always last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PipelineEvent {
    QueryAnalyzed {
        query_type: QueryType,
        strategy: RetrievalStrategy,
    },
    RetrievalCompleted {
        document_count: usize,
    },
    Token {
        text: String,
    },
    Completed(RunResponse),
    Failed {
        code: ErrorCode,
        message: String,
    },
}

impl PipelineEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed(_) | Self::Failed { .. })
    }
}
