mod common;

use std::sync::Arc;

use groundwork_core::errors::{ErrorCode, GenerationError};
use groundwork_core::models::GroundingResult;
use groundwork_core::traits::IHallucinationHeuristic;
use groundwork_core::{GroundworkError, Message, MetadataFilters, QueryType, RetrievalStrategy};
use groundwork_pipeline::prompts::{
    greeting_reply, out_of_scope_reply, CONTEXT_HEADER, NO_INFORMATION_HEADER,
};
use groundwork_pipeline::RunRequest;
use groundwork_validation::LexicalHallucinationHeuristic;
use test_fixtures::{
    embedded_corpus, load_profile_corpus, ScriptedGenerator, StaticLexicalSearch,
    StaticVectorSearch, PROFILE_SUBJECT,
};

use common::*;

fn fallback_reason(result: &GroundingResult) -> Option<&str> {
    match result {
        GroundingResult::Fallback { reason, .. } => Some(reason.as_str()),
        GroundingResult::Validated(_) => None,
    }
}

#[tokio::test]
async fn greeting_skips_retrieval() {
    let generator = Arc::new(scripted());
    let vector = Arc::new(StaticVectorSearch::new(embedded_corpus()));
    let lexical = Arc::new(StaticLexicalSearch::new(load_profile_corpus()));
    let pipeline = build(config(), generator.clone(), vector.clone(), lexical.clone());

    let out = pipeline.run(RunRequest::new("Hello there!")).await.unwrap();

    assert_eq!(out.query_type, QueryType::Greeting);
    assert_eq!(out.response, greeting_reply(PROFILE_SUBJECT));
    assert_eq!(out.retrieved_docs_count, 0);
    assert_eq!(fallback_reason(&out.grounding_result), Some("no documents retrieved"));
    assert_eq!(vector.call_count(), 0);
    assert_eq!(lexical.call_count(), 0);
    // One generation, bare query as the user turn.
    let calls = generator.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].last_user_content(), Some("Hello there!"));
}

#[tokio::test]
async fn weather_is_redirected() {
    let generator = Arc::new(scripted());
    let pipeline = profile_pipeline(config(), generator.clone());

    let out = pipeline
        .run(RunRequest::new("What's the weather like in Toronto today?"))
        .await
        .unwrap();

    assert_eq!(out.query_type, QueryType::OutOfScope);
    assert_eq!(out.response, out_of_scope_reply(PROFILE_SUBJECT));
    assert_eq!(out.retrieved_docs_count, 0);
    assert!(out.grounding_result.is_grounded());
    assert_eq!(generator.calls_matching(JUDGE), 0);
}

#[tokio::test]
async fn education_question_is_grounded_with_citation() {
    let generator = Arc::new(scripted());
    let pipeline = profile_pipeline(config(), generator.clone());

    let out = pipeline
        .run(RunRequest::new("Tell me about his education").with_session("s-1"))
        .await
        .unwrap();

    assert_eq!(out.query_type, QueryType::FactualQa);
    assert_eq!(out.retrieved_docs_count, 1);
    assert_eq!(
        out.response,
        format!("{EDUCATION_ANSWER}\n\nSources: education.md")
    );
    let validated = out.grounding_result.validated().expect("validator ran");
    assert!(validated.is_grounded);
    assert!(!validated.hallucinations_detected);
    assert_eq!(validated.citations["education.md"], vec![0]);
    assert!((validated.confidence - 0.64).abs() < 1e-9);

    // The answer prompt carried the compressed evidence at the task temperature.
    let answer_call = generator
        .calls()
        .into_iter()
        .find(|r| r.system_prompt.contains(ANSWER))
        .unwrap();
    let user = answer_call.last_user_content().unwrap();
    assert!(user.starts_with(CONTEXT_HEADER));
    assert!(user.contains("From education.md:"));
    assert!(user.ends_with("Tell me about his education"));
    assert_eq!(answer_call.temperature, 0.1);
    assert_eq!(answer_call.max_tokens, 300);

    let entries = logged(&pipeline, 1).await;
    assert_eq!(entries[0].session_id, "s-1");
    assert_eq!(entries[0].query_type, QueryType::FactualQa);
    assert_eq!(entries[0].strategy, RetrievalStrategy::Hybrid);
    assert_eq!(entries[0].retrieved, 1);
    assert!(entries[0].confidence.is_some());
    assert!(entries[0].error_code.is_none());
}

#[tokio::test]
async fn empty_corpus_takes_warning_branch() {
    let generator = Arc::new(
        ScriptedGenerator::new("unexpected prompt")
            .on(ANSWER, "I don't have information about Avery's education."),
    );
    let pipeline = empty_pipeline(config(), generator.clone());

    let out = pipeline
        .run(RunRequest::new("Tell me about his education"))
        .await
        .unwrap();

    assert_eq!(out.retrieved_docs_count, 0);
    assert_eq!(fallback_reason(&out.grounding_result), Some("no documents retrieved"));
    assert_eq!(generator.calls_matching(NO_INFORMATION_HEADER), 1);
    assert_eq!(generator.calls_matching(CONTEXT_HEADER), 0);

    let risk = LexicalHallucinationHeuristic::default().assess(&out.response, &[]);
    assert!(risk.detected);
    assert!(risk.score >= 0.8);
}

#[tokio::test]
async fn validation_can_be_disabled() {
    let generator = Arc::new(scripted());
    let mut config = config();
    config.validation.enable_answer_validation = false;
    let pipeline = profile_pipeline(config, generator.clone());

    let out = pipeline
        .run(RunRequest::new("Tell me about his education"))
        .await
        .unwrap();

    assert_eq!(fallback_reason(&out.grounding_result), Some("validation disabled"));
    assert_eq!(out.response, EDUCATION_ANSWER);
    assert_eq!(generator.calls_matching(JUDGE), 0);
}

#[tokio::test]
async fn caller_filters_override_extracted_ones() {
    let pipeline = profile_pipeline(config(), Arc::new(scripted()));
    let mut filters = MetadataFilters::new();
    filters.insert("section".to_string(), "experience".to_string());

    let out = pipeline
        .run(RunRequest::new("Tell me about his education").with_filters(filters))
        .await
        .unwrap();

    assert_eq!(out.retrieved_docs_count, 0);
}

#[tokio::test]
async fn routing_disabled_uses_keyword_gating() {
    let mut config = config();
    config.router.enable_routing = false;
    let pipeline = profile_pipeline(config, Arc::new(scripted()));

    let hi = pipeline.run(RunRequest::new("hi")).await.unwrap();
    assert_eq!(hi.query_type, QueryType::Greeting);
    assert_eq!(hi.retrieved_docs_count, 0);

    let edu = pipeline
        .run(RunRequest::new("Tell me about his education"))
        .await
        .unwrap();
    assert_eq!(edu.query_type, QueryType::FactualQa);
    assert_eq!(edu.retrieved_docs_count, 1);
}

#[tokio::test]
async fn history_is_sent_before_the_question() {
    let generator = Arc::new(scripted());
    let pipeline = profile_pipeline(config(), generator.clone());
    let history = vec![
        Message::user("Who is Avery?"),
        Message::assistant("Avery Quinn is a platform engineer."),
    ];

    pipeline
        .run(RunRequest::new("Tell me about the education of Avery").with_history(history))
        .await
        .unwrap();

    let answer_call = generator
        .calls()
        .into_iter()
        .find(|r| r.system_prompt.contains(ANSWER))
        .unwrap();
    assert_eq!(answer_call.messages.len(), 3);
    assert_eq!(answer_call.messages[0].content, "Who is Avery?");
}

#[tokio::test]
async fn hyde_retrieves_with_hypothetical_passage() {
    let generator = Arc::new(
        scripted().on(HYDE, "Avery studied at the university and earned a degree."),
    );
    let mut config = config();
    config.router.enable_hyde = true;
    let pipeline = profile_pipeline(config, generator.clone());

    let out = pipeline
        .run(RunRequest::new("Tell me about his education"))
        .await
        .unwrap();

    assert_eq!(generator.calls_matching(HYDE), 1);
    assert_eq!(out.retrieved_docs_count, 1);
    assert!(out.grounding_result.is_grounded());
}

#[tokio::test]
async fn multi_hop_question_iterates() {
    let generator = Arc::new(scripted().on(FOLLOW_UP, "COMPLETE"));
    let mut config = config();
    config.router.enable_multi_hop = true;
    let pipeline = profile_pipeline(config, generator.clone());

    let out = pipeline
        .run(RunRequest::new("Compare his fintech and platform experience"))
        .await
        .unwrap();

    assert_eq!(out.query_type, QueryType::MultiHop);
    assert_eq!(generator.calls_matching(FOLLOW_UP), 1);
    assert_eq!(out.retrieved_docs_count, 2);

    let entries = logged(&pipeline, 1).await;
    assert_eq!(entries[0].strategy, RetrievalStrategy::MultiHop);
}

#[tokio::test]
async fn generation_failure_is_the_only_error() {
    let generator = Arc::new(ScriptedGenerator::new("unused").fail_on(
        ANSWER,
        GenerationError::QuotaExceeded {
            reason: "insufficient_quota".to_string(),
        },
    ));
    let pipeline = profile_pipeline(config(), generator);

    let err = pipeline
        .run(RunRequest::new("Tell me about his education"))
        .await
        .unwrap_err();

    assert!(matches!(err, GroundworkError::Generation(GenerationError::QuotaExceeded { .. })));
    assert_eq!(err.code(), ErrorCode::QuotaExceeded);

    let entries = logged(&pipeline, 1).await;
    assert_eq!(entries[0].error_code.as_deref(), Some("quota_exceeded"));
}

#[tokio::test]
async fn judge_outage_does_not_fail_the_request() {
    let generator = Arc::new(
        ScriptedGenerator::new("unused")
            .fail_on(
                JUDGE,
                GenerationError::Unavailable {
                    reason: "down".to_string(),
                },
            )
            .on(ANSWER, EDUCATION_ANSWER),
    );
    let pipeline = profile_pipeline(config(), generator);

    let out = pipeline
        .run(RunRequest::new("Tell me about his education"))
        .await
        .unwrap();
    assert!(out.grounding_result.is_grounded());
}

#[test]
fn missing_capability_is_a_config_error() {
    let result = groundwork_pipeline::Pipeline::builder(config())
        .generator(Arc::new(scripted()))
        .build();
    assert!(matches!(result, Err(GroundworkError::Config(_))));
}
