use serde::{Deserialize, Serialize};

/// The 7 query types the router can assign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryType {
    FactualQa,
    Conversational,
    MultiHop,
    Summarization,
    Clarification,
    Greeting,
    OutOfScope,
}

impl QueryType {
    /// Total number of query types.
    pub const COUNT: usize = 7;

    /// All variants for iteration.
    pub const ALL: [QueryType; 7] = [
        Self::FactualQa,
        Self::Conversational,
        Self::MultiHop,
        Self::Summarization,
        Self::Clarification,
        Self::Greeting,
        Self::OutOfScope,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FactualQa => "factual_qa",
            Self::Conversational => "conversational",
            Self::MultiHop => "multi_hop",
            Self::Summarization => "summarization",
            Self::Clarification => "clarification",
            Self::Greeting => "greeting",
            Self::OutOfScope => "out_of_scope",
        }
    }

    /// Meta types are answered without retrieval.
    pub fn is_meta(&self) -> bool {
        matches!(self, Self::Greeting | Self::OutOfScope)
    }
}

impl std::fmt::Display for QueryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
