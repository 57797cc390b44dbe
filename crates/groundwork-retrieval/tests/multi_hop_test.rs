mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use groundwork_core::config::RetrievalConfig;
use groundwork_core::errors::GenerationError;
use groundwork_core::traits::IGenerator;
use groundwork_core::{GenerationRequest, Message, RetrievalStrategy};
use groundwork_retrieval::{CrossEncoderReranker, MultiHopRetriever};
use test_fixtures::{
    embedded_corpus, load_profile_corpus, FailingGenerator, ScriptedGenerator,
    StaticLexicalSearch, StaticVectorSearch,
};

/// Proposes a different follow-up every call.
#[derive(Default)]
struct EndlessFollowUps {
    calls: AtomicUsize,
}

#[async_trait]
impl IGenerator for EndlessFollowUps {
    async fn generate(&self, _request: &GenerationRequest) -> Result<String, GenerationError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("education detail {n}"))
    }

    fn name(&self) -> &str {
        "endless"
    }
}

struct Harness {
    vector: Arc<StaticVectorSearch>,
    lexical: Arc<StaticLexicalSearch>,
    retriever: MultiHopRetriever,
}

fn harness(generator: Option<Arc<dyn IGenerator>>) -> Harness {
    let vector = Arc::new(StaticVectorSearch::new(embedded_corpus()));
    let lexical = Arc::new(StaticLexicalSearch::new(load_profile_corpus()));
    let pool = Arc::new(common::pool(vector.clone(), lexical.clone()));
    let mut retriever =
        MultiHopRetriever::new(pool, CrossEncoderReranker::new(), &RetrievalConfig::default());
    if let Some(g) = generator {
        retriever = retriever.with_generator(g, Duration::from_secs(1));
    }
    Harness {
        vector,
        lexical,
        retriever,
    }
}

#[tokio::test]
async fn max_hops_is_a_hard_bound() {
    let generator = Arc::new(EndlessFollowUps::default());
    let h = harness(Some(generator.clone()));
    let docs = h
        .retriever
        .retrieve_iterative("education", 3, &[], RetrievalStrategy::MultiHop)
        .await;
    assert_eq!(h.vector.call_count(), 3);
    assert_eq!(h.lexical.call_count(), 3);
    // No follow-up after the last hop.
    assert_eq!(generator.calls.load(Ordering::SeqCst), 2);
    assert_eq!(docs[0].filename, "education.md");
}

#[tokio::test]
async fn zero_hops_runs_once() {
    let generator = Arc::new(EndlessFollowUps::default());
    let h = harness(Some(generator.clone()));
    h.retriever
        .retrieve_iterative("education", 0, &[], RetrievalStrategy::Hybrid)
        .await;
    assert_eq!(h.vector.call_count(), 1);
    assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn completion_sentinel_stops_the_loop() {
    let generator = Arc::new(ScriptedGenerator::new("COMPLETE"));
    let h = harness(Some(generator.clone()));
    let docs = h
        .retriever
        .retrieve_iterative("education", 3, &[], RetrievalStrategy::Hybrid)
        .await;
    assert_eq!(h.vector.call_count(), 1);
    assert_eq!(generator.call_count(), 1);
    assert!(!docs.is_empty());
}

#[tokio::test]
async fn repeated_follow_up_stops_the_loop() {
    let generator = Arc::new(ScriptedGenerator::new("  EDUCATION "));
    let h = harness(Some(generator.clone()));
    h.retriever
        .retrieve_iterative("education", 3, &[], RetrievalStrategy::Hybrid)
        .await;
    assert_eq!(h.vector.call_count(), 1);
}

#[tokio::test]
async fn generator_failure_keeps_gathered_documents() {
    let h = harness(Some(Arc::new(FailingGenerator::unavailable())));
    let docs = h
        .retriever
        .retrieve_iterative("education", 3, &[], RetrievalStrategy::Hybrid)
        .await;
    assert_eq!(h.vector.call_count(), 1);
    assert_eq!(docs[0].filename, "education.md");
}

#[tokio::test]
async fn empty_first_hop_skips_follow_up() {
    let generator = Arc::new(EndlessFollowUps::default());
    let h = harness(Some(generator.clone()));
    let docs = h
        .retriever
        .retrieve_iterative("zzz qqq", 3, &[], RetrievalStrategy::Hybrid)
        .await;
    assert!(docs.is_empty());
    assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn hops_accumulate_without_duplicates() {
    let generator = Arc::new(
        ScriptedGenerator::new("COMPLETE").on("Current query: education", "Kubernetes"),
    );
    let h = harness(Some(generator.clone()));
    let docs = h
        .retriever
        .retrieve_iterative(
            "education",
            3,
            &[Message::user("tell me about avery")],
            RetrievalStrategy::Hybrid,
        )
        .await;
    let mut names: Vec<&str> = docs.iter().map(|d| d.filename.as_str()).collect();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), docs.len());
    assert!(names.contains(&"education.md"));
    assert!(names.contains(&"experience_platform.md"));
    assert_eq!(h.vector.call_count(), 2);
}
