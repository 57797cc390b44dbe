use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use groundwork_core::errors::EmbeddingError;
use groundwork_core::traits::IEmbedder;

/// Topic axes of the stub vector space. Each word listed counts toward its axis.
pub const TOPICS: &[(&str, &[&str])] = &[
    (
        "education",
        &[
            "education", "university", "degree", "studied", "study", "bachelor", "master",
            "school", "graduated", "graduating", "college",
        ],
    ),
    (
        "experience",
        &[
            "experience", "worked", "work", "engineer", "engineers", "company", "role", "job",
            "career",
        ],
    ),
    (
        "skills",
        &[
            "skills", "skill", "python", "fastapi", "postgresql", "docker", "kubernetes", "react",
            "javascript", "strongest",
        ],
    ),
    (
        "projects",
        &["projects", "project", "built", "open-source", "dashboard"],
    ),
];

/// Weight of the constant axis that keeps every vector non-zero.
const BIAS: f32 = 0.25;

/// Keyword-topic embedder: texts about the same topic land close together.
#[derive(Default)]
pub struct StubEmbedder {
    calls: AtomicUsize,
    fail_first: usize,
}

impl StubEmbedder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails.
    pub fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_first: usize::MAX,
        }
    }

    /// The first `n` calls fail, later ones succeed.
    pub fn failing_first(n: usize) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_first: n,
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Normalized topic vector of `text`.
    pub fn vectorize(&self, text: &str) -> Vec<f32> {
        let mut vec = vec![0.0f32; TOPICS.len() + 1];
        for word in text
            .split(|c: char| !c.is_alphanumeric() && c != '-')
            .map(str::to_lowercase)
        {
            for (axis, (_, words)) in TOPICS.iter().enumerate() {
                if words.contains(&word.as_str()) {
                    vec[axis] += 1.0;
                }
            }
        }
        vec[TOPICS.len()] = BIAS;

        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        vec.iter_mut().for_each(|v| *v /= norm);
        vec
    }
}

#[async_trait]
impl IEmbedder for StubEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.fail_first {
            return Err(EmbeddingError::InferenceFailed {
                reason: format!("stub failure on call {}", call + 1),
            });
        }
        Ok(self.vectorize(text))
    }

    fn dimensions(&self) -> usize {
        TOPICS.len() + 1
    }

    fn name(&self) -> &str {
        "stub"
    }
}
