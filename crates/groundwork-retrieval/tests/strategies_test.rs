mod common;

use std::sync::Arc;
use std::time::Duration;

use groundwork_core::models::RetrievalRequest;
use groundwork_core::traits::IRetriever;
use groundwork_core::{MetadataFilters, RetrievalStrategy};
use groundwork_retrieval::HydeRetriever;
use test_fixtures::{
    embedded_corpus, load_profile_corpus, FailingGenerator, ScriptedGenerator,
    StaticLexicalSearch, StaticVectorSearch,
};

use common::{parts, pool};

fn corpus_parts() -> common::Parts {
    parts(
        Arc::new(StaticVectorSearch::new(embedded_corpus())),
        Arc::new(StaticLexicalSearch::new(load_profile_corpus())),
    )
}

fn names(docs: &[groundwork_core::Document]) -> Vec<&str> {
    docs.iter().map(|d| d.filename.as_str()).collect()
}

#[tokio::test]
async fn dense_finds_education_above_threshold() {
    let p = corpus_parts();
    let docs = p
        .dense
        .retrieve(&RetrievalRequest::new("Tell me about his education", 5, 0.15))
        .await;
    assert_eq!(names(&docs), vec!["education.md"]);
    assert!(docs[0].similarity.unwrap() > 0.15);
}

#[tokio::test]
async fn dense_populates_cache_only_when_allowed() {
    let p = corpus_parts();
    let request = RetrievalRequest::new("education", 3, 0.15);
    p.dense.retrieve(&request.clone().without_cache()).await;
    assert_eq!(p.engine.cache_len(), 0);
    p.dense.retrieve(&request).await;
    assert_eq!(p.engine.cache_len(), 1);
}

#[tokio::test]
async fn dense_failures_yield_empty() {
    let failing = parts(
        Arc::new(StaticVectorSearch::failing()),
        Arc::new(StaticLexicalSearch::empty()),
    );
    let request = RetrievalRequest::new("education", 3, 0.15);
    assert!(failing.dense.retrieve(&request).await.is_empty());

    let slow = parts(
        Arc::new(StaticVectorSearch::new(embedded_corpus()).with_delay(Duration::from_secs(2))),
        Arc::new(StaticLexicalSearch::empty()),
    );
    assert!(slow.dense.retrieve(&request).await.is_empty());
}

#[tokio::test]
async fn sparse_requires_every_term() {
    let p = corpus_parts();
    let docs = p
        .sparse
        .retrieve(&RetrievalRequest::new("React JavaScript", 10, 0.0))
        .await;
    let mut got = names(&docs);
    got.sort();
    assert_eq!(got, vec!["projects_dashboard.md", "skills.md"]);

    let none = p
        .sparse
        .retrieve(&RetrievalRequest::new("React Kubernetes Ledgerline", 10, 0.0))
        .await;
    assert!(none.is_empty());
}

#[tokio::test]
async fn sparse_respects_filters() {
    let p = corpus_parts();
    let mut filters = MetadataFilters::new();
    filters.insert("skills".into(), "React".into());
    let docs = p
        .sparse
        .retrieve(&RetrievalRequest::new("JavaScript", 10, 0.0).with_filters(filters))
        .await;
    assert_eq!(names(&docs), vec!["projects_dashboard.md"]);
}

#[tokio::test]
async fn hybrid_survives_one_failing_side() {
    let p = parts(
        Arc::new(StaticVectorSearch::failing()),
        Arc::new(StaticLexicalSearch::new(load_profile_corpus())),
    );
    let docs = p
        .hybrid
        .retrieve(&RetrievalRequest::new("Kubernetes", 5, 0.15))
        .await;
    assert_eq!(names(&docs), vec!["experience_platform.md", "skills.md"]);
    assert!((docs[0].similarity.unwrap() - 1.0 / 61.0).abs() < 1e-12);
}

#[tokio::test]
async fn hybrid_rewards_agreement() {
    let p = corpus_parts();
    let docs = p
        .hybrid
        .retrieve(&RetrievalRequest::new("education", 2, 0.15))
        .await;
    assert_eq!(docs[0].filename, "education.md");
    // Ranked first by both sides.
    assert!((docs[0].similarity.unwrap() - 2.0 / 61.0).abs() < 1e-12);
}

#[tokio::test]
async fn hyde_searches_with_generated_passage_uncached() {
    let p = corpus_parts();
    let generator = Arc::new(ScriptedGenerator::new(
        "Avery studied at the university and earned a degree.",
    ));
    let hyde = HydeRetriever::new(p.dense.clone(), generator.clone(), Duration::from_secs(1));

    let docs = hyde
        .retrieve(&RetrievalRequest::new("What qualifications are there?", 3, 0.15))
        .await;
    assert_eq!(names(&docs), vec!["education.md"]);
    assert_eq!(generator.call_count(), 1);
    assert_eq!(p.engine.cache_len(), 0);
}

#[tokio::test]
async fn hyde_falls_back_to_dense_on_generator_failure() {
    let p = corpus_parts();
    let hyde = HydeRetriever::new(
        p.dense.clone(),
        Arc::new(FailingGenerator::unavailable()),
        Duration::from_secs(1),
    );
    let docs = hyde
        .retrieve(&RetrievalRequest::new("education", 3, 0.15))
        .await;
    assert_eq!(names(&docs), vec!["education.md"]);
    // The fallback is an ordinary cached dense lookup.
    assert_eq!(p.engine.cache_len(), 1);
}

#[tokio::test]
async fn pool_resolves_strategies() {
    let pool = pool(
        Arc::new(StaticVectorSearch::new(embedded_corpus())),
        Arc::new(StaticLexicalSearch::new(load_profile_corpus())),
    );
    assert_eq!(pool.get(RetrievalStrategy::Dense).name(), "dense");
    assert_eq!(pool.get(RetrievalStrategy::Sparse).name(), "sparse");
    assert_eq!(pool.get(RetrievalStrategy::Hybrid).name(), "hybrid");
    assert_eq!(pool.get(RetrievalStrategy::MultiHop).name(), "hybrid");
    assert_eq!(pool.get(RetrievalStrategy::None).name(), "hybrid");
    assert_eq!(pool.get(RetrievalStrategy::Hyde).name(), "dense");

    let docs = pool
        .retrieve(
            RetrievalStrategy::Sparse,
            &RetrievalRequest::new("Ledgerline", 3, 0.15),
        )
        .await;
    assert_eq!(names(&docs), vec!["experience_fintech.md"]);
}
