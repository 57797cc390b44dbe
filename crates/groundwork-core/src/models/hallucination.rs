use serde::{Deserialize, Serialize};

/// Output of the hallucination heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HallucinationAssessment {
    pub detected: bool,
    /// Risk score in [0, 1].
    pub score: f64,
}
