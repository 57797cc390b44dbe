//! AnswerValidator: faithfulness, heuristic, one regeneration, citations.

use std::sync::Arc;
use std::time::Duration;

use groundwork_core::config::{GenerationConfig, ValidationConfig};
use groundwork_core::models::ValidatedAnswer;
use groundwork_core::traits::{IGenerator, IHallucinationHeuristic};
use groundwork_core::Document;
use groundwork_observability::tracing_setup::events;
use groundwork_observability::validation_span;
use tracing::{info, Instrument};

use crate::citations::{collect_sources, extract_citations};
use crate::confidence::calculate_confidence;
use crate::faithfulness::{self, FaithfulnessVerdict};
use crate::hallucination::LexicalHallucinationHeuristic;
use crate::regeneration::regeneration_request;

pub struct AnswerValidator {
    generator: Arc<dyn IGenerator>,
    heuristic: Arc<dyn IHallucinationHeuristic>,
    config: ValidationConfig,
    judge_timeout: Duration,
    regeneration_timeout: Duration,
    regeneration_max_tokens: u32,
}

impl AnswerValidator {
    pub fn new(
        generator: Arc<dyn IGenerator>,
        config: ValidationConfig,
        generation: &GenerationConfig,
    ) -> Self {
        Self {
            generator,
            heuristic: Arc::new(LexicalHallucinationHeuristic::default()),
            config,
            judge_timeout: Duration::from_millis(generation.judge_timeout_ms),
            regeneration_timeout: Duration::from_millis(generation.timeout_ms),
            regeneration_max_tokens: generation.max_tokens,
        }
    }

    pub fn with_heuristic(mut self, heuristic: Arc<dyn IHallucinationHeuristic>) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub async fn validate_and_correct(
        &self,
        query: &str,
        answer: &str,
        context_documents: &[Document],
    ) -> ValidatedAnswer {
        let span = validation_span!(context_documents.len());
        self.validate_inner(query, answer, context_documents)
            .instrument(span)
            .await
    }

    async fn validate_inner(
        &self,
        query: &str,
        answer: &str,
        context_documents: &[Document],
    ) -> ValidatedAnswer {
        let verdict = self.check_faithfulness(answer, context_documents).await;
        let assessment = self.heuristic.assess(answer, context_documents);

        let final_answer = if !verdict.is_faithful && !context_documents.is_empty() {
            self.regenerate(query, answer, context_documents, &verdict.missing_claims)
                .await
        } else {
            answer.to_string()
        };

        let citations = extract_citations(&final_answer, context_documents);
        let sources = collect_sources(context_documents);
        let confidence =
            calculate_confidence(verdict.is_faithful, assessment.score, !sources.is_empty());

        info!(
            faithful = verdict.is_faithful,
            hallucination_score = assessment.score,
            confidence,
            citations = citations.len(),
            "answer validated"
        );

        ValidatedAnswer {
            answer: final_answer,
            confidence,
            sources,
            is_grounded: verdict.is_faithful,
            hallucinations_detected: assessment.detected,
            missing_claims: verdict.missing_claims,
            citations,
        }
    }

    /// Judge whether `answer` is supported by the top context documents.
    ///
    /// No documents: unfaithful. Judge failure: faithful. Non-JSON reply:
    /// read from the text.
    pub async fn check_faithfulness(
        &self,
        answer: &str,
        context_documents: &[Document],
    ) -> FaithfulnessVerdict {
        if context_documents.is_empty() {
            return FaithfulnessVerdict::no_context();
        }

        let context = faithfulness::judge_context(
            context_documents,
            self.config.context_docs,
            self.config.doc_chars,
        );
        let request = faithfulness::faithfulness_request(answer, &context);
        let reply =
            match groundwork_llm::judge(self.generator.as_ref(), &request, self.judge_timeout)
                .await
            {
                Ok(reply) => reply,
                Err(e) => {
                    events::judgment_defaulted("faithfulness", &e.to_string(), "faithful");
                    return FaithfulnessVerdict::faithful();
                }
            };

        faithfulness::parse_verdict(&reply).unwrap_or_else(|e| {
            events::judgment_defaulted("faithfulness", &e.to_string(), "text heuristic");
            faithfulness::verdict_from_text(&reply)
        })
    }

    /// One grounded retry. Failure keeps the original answer.
    async fn regenerate(
        &self,
        query: &str,
        answer: &str,
        context_documents: &[Document],
        missing_claims: &[String],
    ) -> String {
        let context = faithfulness::judge_context(
            context_documents,
            self.config.context_docs,
            self.config.doc_chars,
        );
        let request = regeneration_request(
            query,
            answer,
            &context,
            missing_claims,
            self.regeneration_max_tokens,
        );
        match groundwork_llm::judge(self.generator.as_ref(), &request, self.regeneration_timeout)
            .await
        {
            Ok(regenerated) => {
                events::answer_regenerated(missing_claims.len(), true);
                regenerated
            }
            Err(e) => {
                events::judgment_defaulted("regeneration", &e.to_string(), "original answer");
                events::answer_regenerated(missing_claims.len(), false);
                answer.to_string()
            }
        }
    }
}
