//! # groundwork-embeddings
//!
//! Query embedding for the dense retrieval path. [`EmbeddingEngine`] wraps a
//! provider with a blake3-keyed moka cache, per-attempt timeout and
//! exponential-backoff retry, and is itself an [`IEmbedder`].
//!
//! [`IEmbedder`]: groundwork_core::traits::IEmbedder

pub mod cache;
pub mod engine;
pub mod providers;

pub use cache::EmbeddingCache;
pub use engine::EmbeddingEngine;
pub use providers::{create_provider, ApiEmbedder, HashingEmbedder};
