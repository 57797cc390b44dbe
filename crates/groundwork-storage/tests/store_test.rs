use std::collections::BTreeMap;

use groundwork_core::constants::{META_EMBEDDING_DIMENSION, META_EMBEDDING_MODEL};
use groundwork_core::errors::StorageError;
use groundwork_core::traits::{IEmbedder, ILexicalSearch, IVectorSearch};
use groundwork_core::MetadataFilters;
use groundwork_storage::DocumentStore;
use test_fixtures::{load_profile_corpus, StubEmbedder};

async fn seeded_store() -> DocumentStore {
    let store = DocumentStore::open_in_memory()
        .unwrap()
        .with_embedding_model("stub");
    let embedder = StubEmbedder::new();
    for doc in load_profile_corpus() {
        let vector = embedder.vectorize(&doc.content);
        store
            .add_document(&doc.filename, &doc.content, doc.metadata.clone(), Some(vector))
            .await
            .unwrap();
    }
    store
}

fn filters(key: &str, value: &str) -> MetadataFilters {
    let mut f = MetadataFilters::new();
    f.insert(key.to_string(), value.to_string());
    f
}

#[tokio::test]
async fn duplicate_content_is_stored_once() {
    let store = DocumentStore::open_in_memory().unwrap();
    let a = store
        .add_document("a.md", "same chunk", BTreeMap::new(), None)
        .await
        .unwrap();
    let b = store
        .add_document("b.md", "same chunk", BTreeMap::new(), None)
        .await
        .unwrap();
    assert_eq!(a.id, b.id);
    assert_eq!(b.filename, "a.md");
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn embedding_model_and_dimension_recorded() {
    let store = seeded_store().await;
    let doc = load_profile_corpus().remove(0);
    let stored = store.get_by_hash(&doc.content_hash).await.unwrap().unwrap();
    assert_eq!(stored.metadata.get(META_EMBEDDING_MODEL).map(String::as_str), Some("stub"));
    assert_eq!(stored.metadata.get(META_EMBEDDING_DIMENSION).map(String::as_str), Some("5"));
    assert_eq!(stored.embedding.map(|e| e.len()), Some(5));
}

#[tokio::test]
async fn vector_search_ranks_by_cosine_above_threshold() {
    let store = seeded_store().await;
    let q = StubEmbedder::new().embed("what degree did they get at university").await.unwrap();
    let hits = IVectorSearch::search(&store, &q, 3, 0.15, &MetadataFilters::new())
        .await
        .unwrap();
    assert!(!hits.is_empty());
    assert_eq!(hits[0].filename, "education.md");
    assert!(hits.iter().all(|d| d.similarity.unwrap() > 0.15));
    assert!(hits.windows(2).all(|w| w[0].similarity >= w[1].similarity));
}

#[tokio::test]
async fn vector_search_skips_other_dimensions() {
    let store = seeded_store().await;
    let hits = IVectorSearch::search(&store, &[1.0, 0.0, 0.0], 5, 0.0, &MetadataFilters::new())
        .await
        .unwrap();
    assert!(hits.is_empty());
}

#[tokio::test]
async fn vector_search_applies_metadata_containment() {
    let store = seeded_store().await;
    let q = StubEmbedder::new().embed("python skills project").await.unwrap();
    let hits = IVectorSearch::search(&store, &q, 10, 0.0, &filters("skills", "Python"))
        .await
        .unwrap();
    assert_eq!(hits.len(), 2);
    assert!(hits
        .iter()
        .all(|d| d.metadata.get("skills").map(String::as_str) == Some("Python")));
}

#[tokio::test]
async fn lexical_search_ands_terms_and_scores_positive() {
    let store = seeded_store().await;
    let hits = ILexicalSearch::search(&store, "React JavaScript", 10, &MetadataFilters::new())
        .await
        .unwrap();
    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|d| d.similarity.unwrap() > 0.0));

    let none = ILexicalSearch::search(&store, "React Haskell", 10, &MetadataFilters::new())
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn lexical_search_answers_natural_language_questions() {
    let store = DocumentStore::open_in_memory().unwrap();
    store
        .add_document(
            "education.md",
            "Avery earned a BSc in Computer Science. Education: UMKC, graduating in 2019.",
            BTreeMap::new(),
            None,
        )
        .await
        .unwrap();
    store
        .add_document("hobbies.md", "Avery enjoys sailing.", BTreeMap::new(), None)
        .await
        .unwrap();

    let none = MetadataFilters::new();
    for query in [
        "Tell me about his education",
        "education",
        "What did Avery earn in computer science?",
        "When did he graduate?",
    ] {
        let hits = ILexicalSearch::search(&store, query, 5, &none).await.unwrap();
        assert_eq!(hits.len(), 1, "{query}");
        assert_eq!(hits[0].filename, "education.md");
    }
}

#[tokio::test]
async fn lexical_search_filters_after_matching() {
    let store = seeded_store().await;
    let hits = ILexicalSearch::search(&store, "Avery", 1, &filters("section", "projects"))
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].metadata.get("section").map(String::as_str), Some("projects"));
}

#[tokio::test]
async fn lexical_search_with_punctuation_only_is_empty() {
    let store = seeded_store().await;
    let hits = ILexicalSearch::search(&store, "?!", 5, &MetadataFilters::new())
        .await
        .unwrap();
    assert!(hits.is_empty());
}

#[tokio::test]
async fn update_replaces_content_and_reindexes() {
    let store = DocumentStore::open_in_memory().unwrap();
    let doc = store
        .add_document("notes.md", "Avery enjoys sailing", BTreeMap::new(), None)
        .await
        .unwrap();
    let updated = store
        .update_document(&doc.content_hash, "Avery enjoys climbing", BTreeMap::new(), None)
        .await
        .unwrap();

    assert_eq!(updated.id, doc.id);
    assert_ne!(updated.content_hash, doc.content_hash);
    assert!(store.get_by_hash(&doc.content_hash).await.unwrap().is_none());

    let hits = ILexicalSearch::search(&store, "climbing", 5, &MetadataFilters::new())
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    let stale = ILexicalSearch::search(&store, "sailing", 5, &MetadataFilters::new())
        .await
        .unwrap();
    assert!(stale.is_empty());
}

#[tokio::test]
async fn update_of_unknown_hash_is_not_found() {
    let store = DocumentStore::open_in_memory().unwrap();
    let err = store
        .update_document("deadbeef", "x", BTreeMap::new(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound { .. }));
}

#[tokio::test]
async fn file_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("groundwork.db");
    {
        let store = DocumentStore::open(&path).unwrap();
        store
            .add_document("a.md", "persisted chunk", BTreeMap::new(), None)
            .await
            .unwrap();
    }
    let store = DocumentStore::open(&path).unwrap();
    assert_eq!(store.count().await.unwrap(), 1);
    assert_eq!(store.path(), Some(path.as_path()));
}
