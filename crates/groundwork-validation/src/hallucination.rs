//! Cheap lexical hallucination risk.

use std::sync::LazyLock;

use groundwork_core::models::HallucinationAssessment;
use groundwork_core::traits::IHallucinationHeuristic;
use groundwork_core::Document;
use regex::Regex;

/// Phrasing that claims precision the evidence may not carry.
static CERTAINTY_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)(exactly|precisely|specifically|in detail)").ok());

pub const NO_CONTEXT_SCORE: f64 = 0.8;
pub const THIN_CONTEXT_SCORE: f64 = 0.6;
pub const BASELINE_SCORE: f64 = 0.2;

/// Context shorter than this (in chars) is considered thin.
pub const DEFAULT_MIN_CONTEXT_CHARS: usize = 500;

#[derive(Debug, Clone)]
pub struct LexicalHallucinationHeuristic {
    min_context_chars: usize,
}

impl Default for LexicalHallucinationHeuristic {
    fn default() -> Self {
        Self {
            min_context_chars: DEFAULT_MIN_CONTEXT_CHARS,
        }
    }
}

impl LexicalHallucinationHeuristic {
    pub fn with_min_context_chars(min_context_chars: usize) -> Self {
        Self { min_context_chars }
    }
}

impl IHallucinationHeuristic for LexicalHallucinationHeuristic {
    fn assess(&self, answer: &str, context: &[Document]) -> HallucinationAssessment {
        if context.is_empty() {
            return HallucinationAssessment {
                detected: true,
                score: NO_CONTEXT_SCORE,
            };
        }

        let certain = CERTAINTY_RE.as_ref().is_some_and(|re| re.is_match(answer));
        let context_chars: usize = context.iter().map(|d| d.content.chars().count()).sum();
        if certain && context_chars < self.min_context_chars {
            return HallucinationAssessment {
                detected: true,
                score: THIN_CONTEXT_SCORE,
            };
        }

        HallucinationAssessment {
            detected: false,
            score: BASELINE_SCORE,
        }
    }
}
