use serde::{Deserialize, Serialize};

use super::defaults;

/// A controlled-vocabulary term that turns into a metadata filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterTerm {
    /// Lowercase substring searched for in the query.
    pub term: String,
    pub key: String,
    pub value: String,
}

impl FilterTerm {
    pub fn skill(term: &str, value: &str) -> Self {
        Self {
            term: term.to_string(),
            key: "skills".to_string(),
            value: value.to_string(),
        }
    }
}

/// Query routing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Use the router; when false the orchestrator falls back to keyword gating.
    pub enable_routing: bool,
    pub enable_hyde: bool,
    pub enable_multi_hop: bool,
    pub rewrite_history_messages: usize,
    pub rewrite_message_chars: usize,
    pub max_expanded_queries: usize,
    /// Checked in order; the first hit wins.
    pub filter_vocabulary: Vec<FilterTerm>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            enable_routing: defaults::DEFAULT_ENABLE_ROUTING,
            enable_hyde: defaults::DEFAULT_ENABLE_HYDE,
            enable_multi_hop: defaults::DEFAULT_ENABLE_MULTI_HOP,
            rewrite_history_messages: defaults::DEFAULT_REWRITE_HISTORY_MESSAGES,
            rewrite_message_chars: defaults::DEFAULT_REWRITE_MESSAGE_CHARS,
            max_expanded_queries: defaults::DEFAULT_MAX_EXPANDED_QUERIES,
            filter_vocabulary: vec![
                FilterTerm::skill("python", "Python"),
                FilterTerm::skill("fastapi", "FastAPI"),
                FilterTerm::skill("postgresql", "PostgreSQL"),
                FilterTerm::skill("docker", "Docker"),
                FilterTerm::skill("react", "React"),
                FilterTerm::skill("javascript", "JavaScript"),
            ],
        }
    }
}
