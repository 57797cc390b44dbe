//! Query routing: classification, strategy selection, filter extraction,
//! context-aware rewriting and connective expansion.

pub mod classifier;
pub mod expansion;
pub mod filters;
pub mod rewrite;

use std::sync::{Arc, LazyLock};
use std::time::Duration;

use groundwork_core::config::{RouterConfig, SubjectConfig};
use groundwork_core::models::QueryAnalysis;
use groundwork_core::traits::{IGenerator, IQueryClassifier};
use groundwork_core::{Message, QueryType, RetrievalStrategy};
use groundwork_observability::tracing_setup::events;
use regex::Regex;

pub use classifier::KeywordClassifier;

/// Queries shorter than this many words are always candidates for rewriting.
pub const REWRITE_MIN_WORDS: usize = 3;

/// Rewriting needs at least this much conversation to resolve against.
pub const REWRITE_MIN_HISTORY: usize = 2;

pub const PRONOUNS: &[&str] = &["he", "she", "it", "they", "this", "that", "these", "those"];

static PRONOUN_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| classifier::word_alternation(PRONOUNS));

/// Whether the query is too short or too referential to retrieve with as-is.
pub fn requires_rewriting(query: &str, history: &[Message]) -> bool {
    let q = query.trim().to_lowercase();
    q.split_whitespace().count() < REWRITE_MIN_WORDS
        || (classifier::matches(&PRONOUN_RE, &q) && !history.is_empty())
}

/// Strategy for a query type under the enabled feature flags.
pub fn select_strategy(
    query_type: QueryType,
    enable_hyde: bool,
    enable_multi_hop: bool,
) -> RetrievalStrategy {
    match query_type {
        QueryType::FactualQa if enable_hyde => RetrievalStrategy::Hyde,
        QueryType::FactualQa => RetrievalStrategy::Hybrid,
        QueryType::Conversational => RetrievalStrategy::Dense,
        QueryType::MultiHop if enable_multi_hop => RetrievalStrategy::MultiHop,
        QueryType::MultiHop => RetrievalStrategy::Hybrid,
        QueryType::Summarization => RetrievalStrategy::Hybrid,
        QueryType::Clarification => RetrievalStrategy::Dense,
        QueryType::Greeting | QueryType::OutOfScope => RetrievalStrategy::None,
    }
}

/// Turns a raw query plus history into a [`QueryAnalysis`].
///
/// Classification is synchronous and deterministic. Rewriting is the only
/// step that calls out, and only when a generator is attached.
pub struct QueryRouter {
    classifier: Arc<dyn IQueryClassifier>,
    generator: Option<Arc<dyn IGenerator>>,
    judge_timeout: Duration,
    config: RouterConfig,
}

impl QueryRouter {
    pub fn new(config: RouterConfig, subject: &SubjectConfig) -> Self {
        Self {
            classifier: Arc::new(KeywordClassifier::new(subject)),
            generator: None,
            judge_timeout: Duration::from_millis(
                groundwork_core::config::defaults::DEFAULT_JUDGE_TIMEOUT_MS,
            ),
            config,
        }
    }

    /// Swap in a different classifier.
    pub fn with_classifier(mut self, classifier: Arc<dyn IQueryClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Enable context-aware rewriting.
    pub fn with_generator(mut self, generator: Arc<dyn IGenerator>, judge_timeout: Duration) -> Self {
        self.generator = Some(generator);
        self.judge_timeout = judge_timeout;
        self
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn classify(&self, query: &str, history: &[Message]) -> QueryType {
        self.classifier.classify(query, history)
    }

    pub async fn analyze(&self, query: &str, history: &[Message]) -> QueryAnalysis {
        let query_type = self.classify(query, history);
        let lowered = query.trim().to_lowercase();
        let retrieval_strategy =
            select_strategy(query_type, self.config.enable_hyde, self.config.enable_multi_hop);
        let metadata_filters = filters::extract_filters(&lowered, &self.config.filter_vocabulary);
        let needs_rewrite = requires_rewriting(query, history);
        let needs_expansion = expansion::requires_expansion(&lowered);

        let rewritten_query = if needs_rewrite
            && history.len() >= REWRITE_MIN_HISTORY
            && !query_type.is_meta()
        {
            self.rewrite(query, history).await
        } else {
            None
        };

        let expanded_queries = if needs_expansion {
            expansion::expand(query, self.config.max_expanded_queries)
        } else {
            vec![query.to_string()]
        };

        events::query_classified(
            query_type.as_str(),
            retrieval_strategy.as_str(),
            rewritten_query.is_some(),
        );

        QueryAnalysis {
            query_type,
            retrieval_strategy,
            rewritten_query,
            metadata_filters,
            expanded_queries,
            requires_rewriting: needs_rewrite,
            requires_expansion: needs_expansion,
        }
    }

    async fn rewrite(&self, query: &str, history: &[Message]) -> Option<String> {
        let generator = self.generator.as_ref()?;
        match rewrite::rewrite_query(
            generator.as_ref(),
            query,
            history,
            self.config.rewrite_history_messages,
            self.config.rewrite_message_chars,
            self.judge_timeout,
        )
        .await
        {
            Ok(rewritten) => Some(rewritten),
            Err(e) => {
                events::judgment_defaulted("query_rewrite", &e.to_string(), "original query");
                None
            }
        }
    }
}
