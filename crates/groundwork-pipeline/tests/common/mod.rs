#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use groundwork_core::config::GroundworkConfig;
use groundwork_core::traits::IGenerator;
use groundwork_observability::QueryLogEntry;
use groundwork_pipeline::prompts::{greeting_reply, out_of_scope_reply};
use groundwork_pipeline::Pipeline;
use test_fixtures::{
    embedded_corpus, load_profile_corpus, ScriptedGenerator, StaticLexicalSearch,
    StaticVectorSearch, StubEmbedder, PROFILE_SUBJECT,
};

/// Needles that pick out each kind of generation request.
pub const ANSWER: &str = "Answer questions about";
pub const GREETING: &str = "greeting, small talk";
pub const OUT_OF_SCOPE: &str = "clearly outside your scope";
pub const JUDGE: &str = "fact-checker";
pub const HYDE: &str = "excerpt from a professional profile";
pub const FOLLOW_UP: &str = "refine search queries";

pub const FAITHFUL: &str = r#"{"is_faithful": true, "missing_claims": [], "confidence": 0.9}"#;
pub const EDUCATION_ANSWER: &str =
    "Avery earned a Bachelor of Science in Computer Science from the University of Toronto (education.md).";

pub fn config() -> GroundworkConfig {
    let mut config = GroundworkConfig::default();
    config.subject.name = PROFILE_SUBJECT.to_string();
    config.embedding.dimensions = 5;
    config.embedding.max_retries = 1;
    config.generation.judge_timeout_ms = 500;
    config.generation.timeout_ms = 1_000;
    config
}

/// Generator that answers every pipeline prompt sensibly.
pub fn scripted() -> ScriptedGenerator {
    ScriptedGenerator::new("unexpected prompt")
        .on(JUDGE, FAITHFUL)
        .on(GREETING, greeting_reply(PROFILE_SUBJECT))
        .on(OUT_OF_SCOPE, out_of_scope_reply(PROFILE_SUBJECT))
        .on(ANSWER, EDUCATION_ANSWER)
}

pub fn build(
    config: GroundworkConfig,
    generator: Arc<dyn IGenerator>,
    vector: Arc<StaticVectorSearch>,
    lexical: Arc<StaticLexicalSearch>,
) -> Pipeline {
    Pipeline::builder(config)
        .embedder(Arc::new(StubEmbedder::new()))
        .vector_search(vector)
        .lexical_search(lexical)
        .generator(generator)
        .build()
        .expect("pipeline builds")
}

pub fn profile_pipeline(config: GroundworkConfig, generator: Arc<dyn IGenerator>) -> Pipeline {
    build(
        config,
        generator,
        Arc::new(StaticVectorSearch::new(embedded_corpus())),
        Arc::new(StaticLexicalSearch::new(load_profile_corpus())),
    )
}

pub fn empty_pipeline(config: GroundworkConfig, generator: Arc<dyn IGenerator>) -> Pipeline {
    build(
        config,
        generator,
        Arc::new(StaticVectorSearch::empty()),
        Arc::new(StaticLexicalSearch::empty()),
    )
}

/// Poll the fire-and-forget query log until it holds `n` entries.
pub async fn logged(pipeline: &Pipeline, n: usize) -> Vec<QueryLogEntry> {
    let log = pipeline.query_log();
    for _ in 0..200 {
        {
            let log = log.lock().unwrap();
            if log.count() >= n {
                return log.entries().cloned().collect();
            }
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("query log never reached {n} entries");
}
