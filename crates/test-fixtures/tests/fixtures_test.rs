use groundwork_core::traits::{IEmbedder, IGenerator, ILexicalSearch, IVectorSearch};
use groundwork_core::{GenerationRequest, MetadataFilters};
use test_fixtures::{
    embedded_corpus, load_profile_corpus, ScriptedGenerator, StaticLexicalSearch,
    StaticVectorSearch, StubEmbedder,
};

#[test]
fn corpus_loads_with_metadata() {
    let docs = load_profile_corpus();
    assert_eq!(docs.len(), 6);
    assert!(docs.iter().any(|d| d.filename == "education.md"));
    let python = docs
        .iter()
        .filter(|d| d.metadata.get("skills").map(String::as_str) == Some("Python"))
        .count();
    assert_eq!(python, 2);
}

#[tokio::test]
async fn education_query_finds_education_chunk() {
    let embedder = StubEmbedder::new();
    let search = StaticVectorSearch::new(embedded_corpus());
    let q = embedder.embed("Tell me about his education").await.unwrap();
    let hits = search.search(&q, 3, 0.15, &MetadataFilters::new()).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].filename, "education.md");
}

#[tokio::test]
async fn lexical_requires_every_term() {
    let search = StaticLexicalSearch::new(load_profile_corpus());
    let both = search
        .search("React JavaScript", 10, &MetadataFilters::new())
        .await
        .unwrap();
    assert_eq!(both.len(), 2);
    let none = search
        .search("React Haskell", 10, &MetadataFilters::new())
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn scripted_generator_matches_rules_and_records() {
    let generator = ScriptedGenerator::new("default").on("follow-up", "COMPLETE");
    let a = generator
        .generate(&GenerationRequest::single("write a follow-up query", "q"))
        .await
        .unwrap();
    let b = generator
        .generate(&GenerationRequest::single("answer", "q"))
        .await
        .unwrap();
    assert_eq!(a, "COMPLETE");
    assert_eq!(b, "default");
    assert_eq!(generator.call_count(), 2);
    assert_eq!(generator.calls_matching("follow-up"), 1);
}

#[tokio::test]
async fn failing_embedder_recovers_after_n_calls() {
    let embedder = StubEmbedder::failing_first(2);
    assert!(embedder.embed("x").await.is_err());
    assert!(embedder.embed("x").await.is_err());
    assert!(embedder.embed("x").await.is_ok());
    assert_eq!(embedder.call_count(), 3);
}
