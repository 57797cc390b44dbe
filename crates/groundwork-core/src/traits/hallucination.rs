use crate::models::{Document, HallucinationAssessment};

/// Cheap hallucination risk estimate for an answer given its evidence.
pub trait IHallucinationHeuristic: Send + Sync {
    fn assess(&self, answer: &str, context: &[Document]) -> HallucinationAssessment;
}
