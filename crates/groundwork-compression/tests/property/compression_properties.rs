use groundwork_compression::modes::{concatenate, dedup_and_truncate};
use groundwork_core::constants::estimate_tokens;
use groundwork_core::Document;
use proptest::prelude::*;

fn arb_docs() -> impl Strategy<Value = Vec<Document>> {
    prop::collection::vec(("[a-z]{1,8}", "[a-z ]{0,600}"), 0..8).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(name, content)| Document::new(format!("{name}.md"), content))
            .collect()
    })
}

proptest! {
    #[test]
    fn none_mode_stays_within_separator_slack(docs in arb_docs(), max_tokens in 0usize..400) {
        let out = concatenate(&docs, max_tokens);
        let slack = 3 * docs.len() + 1;
        prop_assert!(
            estimate_tokens(&out) <= max_tokens + slack,
            "{} tokens for budget {}", estimate_tokens(&out), max_tokens
        );
    }

    #[test]
    fn none_mode_keeps_document_order(docs in arb_docs()) {
        let out = concatenate(&docs, 100_000);
        let mut cursor = 0;
        for doc in &docs {
            let header = format!("From {}:\n", doc.filename);
            let found = out[cursor..].find(&header);
            prop_assert!(found.is_some());
            cursor += found.unwrap_or(0) + header.len();
        }
    }

    #[test]
    fn moderate_never_grows_a_document(docs in arb_docs(), max_tokens in 1usize..400) {
        let out = dedup_and_truncate(&docs, max_tokens, 100);
        let uncompressed: usize = docs.iter().map(|d| d.content.len() + d.filename.len() + 16).sum();
        prop_assert!(out.len() <= uncompressed + 10);
    }
}
