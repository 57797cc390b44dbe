//! Feature-hashing provider.
//!
//! Maps terms into fixed-dimension buckets with FNV-1a and a hash-derived
//! sign, weighted by sublinear term frequency. Deterministic and offline, so
//! development corpora can be embedded without an API key.

use std::collections::HashMap;

use async_trait::async_trait;
use groundwork_core::errors::EmbeddingError;
use groundwork_core::traits::IEmbedder;

pub struct HashingEmbedder {
    dimensions: usize,
}

impl HashingEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    fn fnv1a(term: &str) -> u64 {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in term.as_bytes() {
            h ^= *b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        h
    }

    fn terms(text: &str) -> impl Iterator<Item = String> + '_ {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|s| s.chars().count() >= 2)
            .map(str::to_lowercase)
    }

    /// The L2-normalized hashed vector for `text`; all zeros when no term survives.
    pub fn vectorize(&self, text: &str) -> Vec<f32> {
        let mut counts: HashMap<String, u32> = HashMap::new();
        for term in Self::terms(text) {
            *counts.entry(term).or_default() += 1;
        }

        let mut vec = vec![0.0f32; self.dimensions];
        if self.dimensions == 0 {
            return vec;
        }
        for (term, count) in &counts {
            let h = Self::fnv1a(term);
            let bucket = (h % self.dimensions as u64) as usize;
            let sign = if (h >> 63) == 0 { 1.0 } else { -1.0 };
            vec[bucket] += sign * (1.0 + (*count as f32).ln());
        }

        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vec {
                *v /= norm;
            }
        }
        vec
    }
}

#[async_trait]
impl IEmbedder for HashingEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Ok(self.vectorize(text))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hashing"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cosine(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b).map(|(x, y)| x * y).sum()
    }

    #[test]
    fn empty_text_is_zero_vector() {
        let v = HashingEmbedder::new(32).vectorize("");
        assert_eq!(v.len(), 32);
        assert!(v.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn deterministic_and_normalized() {
        let p = HashingEmbedder::new(256);
        let a = p.vectorize("Senior backend engineer, Python and FastAPI");
        let b = p.vectorize("Senior backend engineer, Python and FastAPI");
        assert_eq!(a, b);
        let norm: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn case_insensitive() {
        let p = HashingEmbedder::new(128);
        assert_eq!(p.vectorize("Docker KUBERNETES"), p.vectorize("docker kubernetes"));
    }

    #[test]
    fn shared_terms_score_higher() {
        let p = HashingEmbedder::new(512);
        let q = p.vectorize("education university degree");
        let near = p.vectorize("degree from the university, education in physics");
        let far = p.vectorize("kitchen recipe tomato basil");
        assert!(cosine(&q, &near) > cosine(&q, &far));
    }
}
