//! # groundwork-validation
//!
//! Checks a generated answer against the documents it was generated from.
//!
//! ## Steps
//! 1. **Faithfulness**: a low-temperature judge call, JSON verdict
//! 2. **Hallucination heuristic**: lexical, no model call
//! 3. **Regeneration**: one grounded retry when the answer is not faithful
//! 4. **Citations**: filenames literally present in the final answer
//! 5. **Confidence**: derived from the verdict and the heuristic score
//!
//! Every judge failure degrades to a permissive default so infrastructure
//! trouble never blocks an answer.

pub mod citations;
pub mod confidence;
pub mod faithfulness;
pub mod hallucination;
pub mod regeneration;
pub mod validator;

pub use citations::{add_inline_citations, extract_citations};
pub use confidence::calculate_confidence;
pub use faithfulness::FaithfulnessVerdict;
pub use hallucination::LexicalHallucinationHeuristic;
pub use validator::AnswerValidator;
