use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// The validator's verdict on a generated answer. Built once per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedAnswer {
    pub answer: String,
    /// In [0, 1].
    pub confidence: f64,
    pub sources: BTreeSet<String>,
    /// The judge's faithfulness verdict alone.
    pub is_grounded: bool,
    pub hallucinations_detected: bool,
    pub missing_claims: Vec<String>,
    /// filename → sentence indices citing it.
    pub citations: BTreeMap<String, Vec<usize>>,
}

/// Grounding information returned with every pipeline response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GroundingResult {
    /// The validator ran.
    Validated(ValidatedAnswer),
    /// Validation was skipped or could not run.
    Fallback {
        is_grounded: bool,
        hallucinations_detected: bool,
        reason: String,
    },
}

impl GroundingResult {
    pub fn fallback(reason: impl Into<String>) -> Self {
        Self::Fallback {
            is_grounded: true,
            hallucinations_detected: false,
            reason: reason.into(),
        }
    }

    pub fn is_grounded(&self) -> bool {
        match self {
            Self::Validated(v) => v.is_grounded,
            Self::Fallback { is_grounded, .. } => *is_grounded,
        }
    }

    pub fn validated(&self) -> Option<&ValidatedAnswer> {
        match self {
            Self::Validated(v) => Some(v),
            Self::Fallback { .. } => None,
        }
    }
}
