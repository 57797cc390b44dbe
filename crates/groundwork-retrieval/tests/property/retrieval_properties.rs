use groundwork_core::config::SubjectConfig;
use groundwork_core::traits::IQueryClassifier;
use groundwork_core::{Document, Message, QueryType};
use groundwork_retrieval::fusion::{fuse, rrf_score};
use groundwork_retrieval::KeywordClassifier;
use proptest::prelude::*;

fn docs(ids: &[u8]) -> Vec<Document> {
    ids.iter()
        .map(|i| Document::new(format!("{i}.md"), format!("document {i}")))
        .collect()
}

/// Unique ids in first-seen order.
fn unique(ids: Vec<u8>) -> Vec<u8> {
    let mut out = Vec::new();
    for id in ids {
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}

proptest! {
    #[test]
    fn single_list_top_scores_one_over_k_plus_one(ids in prop::collection::vec(0u8..50, 1..20), k in 1u32..200) {
        let list = docs(&unique(ids));
        let fused = fuse(&[list.clone()], list.len(), k);
        prop_assert_eq!(fused[0].content_hash.clone(), list[0].content_hash.clone());
        prop_assert!((fused[0].similarity.unwrap() - 1.0 / (k as f64 + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn shared_top_scores_two_over_k_plus_one(ids in prop::collection::vec(0u8..50, 1..20), k in 1u32..200) {
        let list = docs(&unique(ids));
        let fused = fuse(&[list.clone(), list.clone()], 3, k);
        prop_assert!((fused[0].similarity.unwrap() - 2.0 / (k as f64 + 1.0)).abs() < 1e-12);
        prop_assert!((rrf_score(1, k) * 2.0 - fused[0].similarity.unwrap()).abs() < 1e-12);
    }

    #[test]
    fn fused_output_is_bounded_sorted_and_unique(
        a in prop::collection::vec(0u8..30, 0..25),
        b in prop::collection::vec(0u8..30, 0..25),
        top_k in 0usize..40,
    ) {
        let a = docs(&unique(a));
        let b = docs(&unique(b));
        let fused = fuse(&[a, b], top_k, 60);
        prop_assert!(fused.len() <= top_k);
        for pair in fused.windows(2) {
            prop_assert!(pair[0].similarity >= pair[1].similarity);
        }
        let mut hashes: Vec<&str> = fused.iter().map(|d| d.content_hash.as_str()).collect();
        hashes.sort();
        hashes.dedup();
        prop_assert_eq!(hashes.len(), fused.len());
    }

    #[test]
    fn classification_is_deterministic(query in "[a-zA-Z ,?']{0,60}", turns in 0usize..6) {
        let classifier = KeywordClassifier::new(&SubjectConfig::default());
        let history: Vec<Message> = (0..turns).map(|i| Message::user(format!("m{i}"))).collect();
        prop_assert_eq!(
            classifier.classify(&query, &history),
            classifier.classify(&query, &history)
        );
    }

    #[test]
    fn short_greetings_win_over_every_other_rule(
        greeting in prop::sample::select(vec!["hello", "hi", "hey", "thanks", "bye"]),
        other in prop::sample::select(vec!["compare", "summary", "explain", "weather"]),
        turns in 0usize..6,
    ) {
        let classifier = KeywordClassifier::new(&SubjectConfig::default());
        let history: Vec<Message> = (0..turns).map(|i| Message::user(format!("m{i}"))).collect();
        let query = format!("{greeting} {other}");
        prop_assert_eq!(classifier.classify(&query, &history), QueryType::Greeting);
    }
}
