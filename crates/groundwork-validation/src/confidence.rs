pub const UNFAITHFUL_CONFIDENCE: f64 = 0.3;
pub const UNSOURCED_CONFIDENCE: f64 = 0.4;
pub const BASE_CONFIDENCE: f64 = 0.7;
pub const HALLUCINATION_PENALTY: f64 = 0.3;

/// Confidence in [0, 1]. Never increases with the hallucination score.
pub fn calculate_confidence(is_faithful: bool, hallucination_score: f64, has_sources: bool) -> f64 {
    if !is_faithful {
        return UNFAITHFUL_CONFIDENCE;
    }
    if !has_sources {
        return UNSOURCED_CONFIDENCE;
    }
    (BASE_CONFIDENCE - HALLUCINATION_PENALTY * hallucination_score).clamp(0.0, 1.0)
}
