//! Iterative retrieval for questions that need more than one lookup.
//!
//! Each hop retrieves with the current query, merges unseen documents into
//! the accumulator and asks the generator what is still missing. The loop
//! ends on a completion sentinel, a repeated or empty follow-up, a
//! generator failure, or after `max_hops`. The accumulator is reranked
//! once against the initial query.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use groundwork_core::config::RetrievalConfig;
use groundwork_core::constants::truncate_chars;
use groundwork_core::errors::JudgmentError;
use groundwork_core::models::RetrievalRequest;
use groundwork_core::traits::IGenerator;
use groundwork_core::{Document, GenerationRequest, Message, MetadataFilters, RetrievalStrategy};
use groundwork_observability::tracing_setup::events;
use tracing::{debug, info};

use crate::pool::RetrieverPool;
use crate::ranking::CrossEncoderReranker;

pub const FOLLOW_UP_TEMPERATURE: f32 = 0.3;
pub const FOLLOW_UP_MAX_TOKENS: u32 = 100;

/// Documents shown to the follow-up prompt, and their char cap.
const FOLLOW_UP_DOCS: usize = 5;
const FOLLOW_UP_DOC_CHARS: usize = 200;
const FOLLOW_UP_CONTEXT_MESSAGES: usize = 4;

/// First words that mean "nothing left to retrieve".
pub const COMPLETION_SENTINELS: &[&str] = &["COMPLETE", "DONE", "SUFFICIENT", "ENOUGH"];

const FOLLOW_UP_SYSTEM_PROMPT: &str = "You refine search queries for multi-step retrieval. \
Compare the original question with the documents found so far and write one short, focused \
query for the information that is still missing. If the documents already answer the \
question, reply with COMPLETE and nothing else.";

/// What the generator proposed after a hop.
#[derive(Debug, Clone, PartialEq)]
pub enum FollowUp {
    Query(String),
    Complete,
}

/// Interpret a follow-up reply. `None` for blank input.
pub fn parse_follow_up(reply: &str) -> Option<FollowUp> {
    let reply = reply.trim();
    let first = reply.split_whitespace().next()?;
    let first = first.trim_matches(|c: char| !c.is_alphanumeric());
    if COMPLETION_SENTINELS
        .iter()
        .any(|s| s.eq_ignore_ascii_case(first))
    {
        return Some(FollowUp::Complete);
    }
    Some(FollowUp::Query(reply.to_string()))
}

pub fn follow_up_request(
    initial_query: &str,
    current_query: &str,
    accumulated: &[Document],
    conversation_context: &[Message],
) -> GenerationRequest {
    let docs = accumulated
        .iter()
        .take(FOLLOW_UP_DOCS)
        .map(|d| format!("- {}...", truncate_chars(&d.content, FOLLOW_UP_DOC_CHARS)))
        .collect::<Vec<_>>()
        .join("\n");

    let mut prompt = String::new();
    if !conversation_context.is_empty() {
        let start = conversation_context
            .len()
            .saturating_sub(FOLLOW_UP_CONTEXT_MESSAGES);
        prompt.push_str("Conversation so far:\n");
        for m in &conversation_context[start..] {
            prompt.push_str(&format!("{}: {}\n", m.role.as_str(), m.content));
        }
        prompt.push('\n');
    }
    prompt.push_str(&format!(
        "Original query: {initial_query}\nCurrent query: {current_query}\n\n\
         Documents retrieved so far:\n{docs}\n\n\
         Follow-up query (or COMPLETE):"
    ));

    GenerationRequest::single(FOLLOW_UP_SYSTEM_PROMPT, prompt)
        .with_temperature(FOLLOW_UP_TEMPERATURE)
        .with_max_tokens(FOLLOW_UP_MAX_TOKENS)
}

pub struct MultiHopRetriever {
    pool: Arc<RetrieverPool>,
    reranker: CrossEncoderReranker,
    generator: Option<Arc<dyn IGenerator>>,
    judge_timeout: Duration,
    threshold: f64,
    per_hop_k: usize,
    final_k: usize,
    filters: MetadataFilters,
}

impl MultiHopRetriever {
    pub fn new(
        pool: Arc<RetrieverPool>,
        reranker: CrossEncoderReranker,
        config: &RetrievalConfig,
    ) -> Self {
        Self {
            pool,
            reranker,
            generator: None,
            judge_timeout: Duration::from_millis(
                groundwork_core::config::defaults::DEFAULT_JUDGE_TIMEOUT_MS,
            ),
            threshold: config.similarity_threshold,
            per_hop_k: config.multi_hop_per_hop_k,
            final_k: config.multi_hop_final_k,
            filters: MetadataFilters::new(),
        }
    }

    /// Without a generator the loop stops after the first hop.
    pub fn with_generator(mut self, generator: Arc<dyn IGenerator>, judge_timeout: Duration) -> Self {
        self.generator = Some(generator);
        self.judge_timeout = judge_timeout;
        self
    }

    /// Filters applied to every hop.
    pub fn with_filters(mut self, filters: MetadataFilters) -> Self {
        self.filters = filters;
        self
    }

    pub async fn retrieve_iterative(
        &self,
        initial_query: &str,
        max_hops: usize,
        conversation_context: &[Message],
        strategy: RetrievalStrategy,
    ) -> Vec<Document> {
        let max_hops = max_hops.max(1);
        let strategy = match strategy {
            RetrievalStrategy::MultiHop | RetrievalStrategy::None => RetrievalStrategy::Hybrid,
            other => other,
        };

        let mut accumulated: Vec<Document> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut current_query = initial_query.to_string();
        let mut hops = 0;

        for hop in 0..max_hops {
            hops = hop + 1;
            let request = RetrievalRequest::new(current_query.as_str(), self.per_hop_k, self.threshold)
                .with_filters(self.filters.clone());
            let found = self.pool.retrieve(strategy, &request).await;
            let before = accumulated.len();
            for doc in found {
                if seen.insert(doc.identity_key().to_string()) {
                    accumulated.push(doc);
                }
            }
            debug!(hop = hops, new = accumulated.len() - before, total = accumulated.len(), "hop retrieved");

            // Nothing to reason over, or no hops left.
            if hop + 1 == max_hops || accumulated.is_empty() {
                break;
            }

            match self
                .next_query(initial_query, &current_query, &accumulated, conversation_context)
                .await
            {
                Ok(Some(FollowUp::Query(next)))
                    if !next.trim().eq_ignore_ascii_case(current_query.trim()) =>
                {
                    current_query = next;
                }
                Ok(_) => break,
                Err(e) => {
                    events::judgment_defaulted("multi_hop_follow_up", &e.to_string(), "stop");
                    break;
                }
            }
        }

        info!(hops, documents = accumulated.len(), "multi-hop retrieval finished");
        self.reranker
            .rerank(initial_query, accumulated, self.final_k)
            .await
    }

    async fn next_query(
        &self,
        initial_query: &str,
        current_query: &str,
        accumulated: &[Document],
        conversation_context: &[Message],
    ) -> Result<Option<FollowUp>, JudgmentError> {
        let Some(generator) = self.generator.as_ref() else {
            return Ok(None);
        };
        let request = follow_up_request(initial_query, current_query, accumulated, conversation_context);
        let reply = groundwork_llm::judge(generator.as_ref(), &request, self.judge_timeout).await?;
        Ok(parse_follow_up(&reply))
    }
}
