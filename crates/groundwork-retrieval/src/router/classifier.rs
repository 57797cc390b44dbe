//! Deterministic keyword classifier.
//!
//! Ordered rules over the lowercased, trimmed query; the first match wins.

use std::sync::LazyLock;

use groundwork_core::config::SubjectConfig;
use groundwork_core::traits::IQueryClassifier;
use groundwork_core::{Message, QueryType};
use regex::Regex;

/// Greeting classification only applies to messages this short.
pub const GREETING_MAX_WORDS: usize = 4;

pub const GREETING_PHRASES: &[&str] = &[
    "hello",
    "hi",
    "hey",
    "good morning",
    "good afternoon",
    "good evening",
    "how are you",
    "how's it going",
    "what's up",
    "howdy",
    "thanks",
    "thank you",
    "thank",
    "thanks a lot",
    "nice to meet you",
    "pleased to meet you",
    "goodbye",
    "bye",
    "see you",
    "have a nice day",
];

pub const MULTI_HOP_INDICATORS: &[&str] =
    &["compare", "difference", "relationship", "how does", "why does"];

pub const SUMMARIZATION_INDICATORS: &[&str] =
    &["summarize", "summary", "overview", "brief", "list all"];

pub const CLARIFICATION_INDICATORS: &[&str] = &["what do you mean", "clarify", "explain"];

pub const OUT_OF_SCOPE_INDICATORS: &[&str] = &[
    "weather",
    "temperature",
    "forecast",
    "rain",
    "snow",
    "sunny",
    "what time",
    "what day",
    "timezone",
    "news",
    "current events",
    "headlines",
    "recipe",
    "cooking",
    "how to cook",
    "joke",
    "jokes",
    "funny",
    "humor",
    "tell me a joke",
    "story",
    "stories",
    "anecdote",
];

/// Conversational follow-ups only count with more than this much history.
const CONVERSATIONAL_MIN_HISTORY: usize = 2;

static GREETING_RE: LazyLock<Option<Regex>> = LazyLock::new(|| word_alternation(GREETING_PHRASES));

static CONVERSATIONAL_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| word_alternation(&["also", "and", "what about", "what else"]));

/// `\b(?:a|b|...)\b` over escaped phrases.
pub(crate) fn word_alternation(phrases: &[&str]) -> Option<Regex> {
    let body = phrases
        .iter()
        .map(|p| regex::escape(p))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\b(?:{body})\b")).ok()
}

pub(crate) fn matches(re: &Option<Regex>, text: &str) -> bool {
    re.as_ref().is_some_and(|re| re.is_match(text))
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Keyword-rule classifier with configurable subject-reference tokens.
pub struct KeywordClassifier {
    subject_re: Option<Regex>,
}

impl KeywordClassifier {
    pub fn new(subject: &SubjectConfig) -> Self {
        let tokens = subject.reference_tokens();
        let refs: Vec<&str> = tokens.iter().map(String::as_str).collect();
        Self {
            subject_re: if refs.is_empty() {
                None
            } else {
                word_alternation(&refs)
            },
        }
    }

    fn mentions_subject(&self, q: &str) -> bool {
        matches(&self.subject_re, q)
    }

    /// Whether `q` (already lowercased) is a greeting.
    pub fn is_greeting(q: &str) -> bool {
        q.split_whitespace().count() <= GREETING_MAX_WORDS && matches(&GREETING_RE, q)
    }

    /// Whether `q` (already lowercased) asks about something outside the corpus.
    pub fn is_out_of_scope(&self, q: &str) -> bool {
        contains_any(q, OUT_OF_SCOPE_INDICATORS) && !self.mentions_subject(q)
    }
}

impl IQueryClassifier for KeywordClassifier {
    fn classify(&self, query: &str, history: &[Message]) -> QueryType {
        let q = query.trim().to_lowercase();

        if Self::is_greeting(&q) {
            return QueryType::Greeting;
        }
        if contains_any(&q, MULTI_HOP_INDICATORS) {
            return QueryType::MultiHop;
        }
        if contains_any(&q, SUMMARIZATION_INDICATORS) {
            return QueryType::Summarization;
        }
        if history.len() > CONVERSATIONAL_MIN_HISTORY && matches(&CONVERSATIONAL_RE, &q) {
            return QueryType::Conversational;
        }
        if contains_any(&q, CLARIFICATION_INDICATORS) {
            return QueryType::Clarification;
        }
        if self.is_out_of_scope(&q) {
            return QueryType::OutOfScope;
        }
        QueryType::FactualQa
    }
}
