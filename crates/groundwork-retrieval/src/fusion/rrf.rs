//! Reciprocal Rank Fusion.
//!
//! `score(d) = Σ 1 / (k + rank)` over every list containing `d`, with
//! 1-based ranks. Only positions matter, so lists scored on different
//! scales (cosine, bm25) fuse without normalization.

use std::collections::HashMap;

use groundwork_core::Document;

/// Contribution of a single 1-based `rank`.
pub fn rrf_score(rank: usize, k: u32) -> f64 {
    1.0 / (k as f64 + rank as f64)
}

/// Fuse ranked lists into one, at most `top_k` long.
///
/// Identity is [`Document::identity_key`]; the first occurrence across the
/// lists is kept as the representative. Ties keep first-seen order. The
/// fused score replaces `similarity`.
pub fn fuse(result_sets: &[Vec<Document>], top_k: usize, k: u32) -> Vec<Document> {
    let mut order: Vec<Document> = Vec::new();
    let mut scores: Vec<f64> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for set in result_sets {
        for (i, doc) in set.iter().enumerate() {
            let contribution = rrf_score(i + 1, k);
            match index.get(doc.identity_key()) {
                Some(&slot) => scores[slot] += contribution,
                None => {
                    index.insert(doc.identity_key().to_string(), order.len());
                    order.push(doc.clone());
                    scores.push(contribution);
                }
            }
        }
    }

    let mut fused: Vec<(Document, f64)> = order.into_iter().zip(scores).collect();
    // `sort_by` is stable.
    fused.sort_by(|a, b| b.1.total_cmp(&a.1));
    fused
        .into_iter()
        .take(top_k)
        .map(|(mut doc, score)| {
            doc.similarity = Some(score);
            doc
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(content: &str) -> Document {
        Document::new(format!("{content}.md"), content)
    }

    #[test]
    fn shared_document_outranks_singletons() {
        let a = doc("alpha");
        let b = doc("beta");
        let c = doc("gamma");
        let fused = fuse(&[vec![a.clone(), b.clone()], vec![c.clone(), b.clone()]], 10, 60);
        assert_eq!(fused[0].content, "beta");
        assert!((fused[0].similarity.unwrap() - 2.0 / 62.0).abs() < 1e-12);
        // alpha and gamma tie at rank 1; alpha was seen first.
        assert_eq!(fused[1].content, "alpha");
        assert_eq!(fused[2].content, "gamma");
    }

    #[test]
    fn representative_is_first_occurrence() {
        let first = doc("same").with_similarity(0.9).with_metadata("from", "dense");
        let second = doc("same").with_metadata("from", "sparse");
        let fused = fuse(&[vec![first], vec![second]], 5, 60);
        assert_eq!(fused.len(), 1);
        assert_eq!(fused[0].metadata.get("from").map(String::as_str), Some("dense"));
    }

    #[test]
    fn empty_hash_falls_back_to_id() {
        let mut x = doc("x").with_id("one");
        let mut y = doc("y").with_id("one");
        x.content_hash.clear();
        y.content_hash.clear();
        assert_eq!(fuse(&[vec![x], vec![y]], 5, 60).len(), 1);
    }

    #[test]
    fn empty_inputs() {
        assert!(fuse(&[], 5, 60).is_empty());
        assert!(fuse(&[vec![], vec![]], 5, 60).is_empty());
        assert!(fuse(&[vec![doc("a")]], 0, 60).is_empty());
    }
}
