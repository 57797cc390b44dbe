//! # groundwork-retrieval
//!
//! Everything between a raw query and a ranked candidate list:
//!
//! - [`router`]: keyword classification, rewrite, expansion, filter extraction
//! - [`strategies`]: dense, sparse and HyDE retrievers
//! - [`fusion`]: reciprocal rank fusion
//! - [`hybrid`] / [`multi_hop`]: composite retrievers
//! - [`ranking`]: cross-encoder reranking with similarity fallback
//! - [`task_adapter`]: query type → retrieval/generation knobs
//! - [`pool`]: strategy dispatch

pub mod fusion;
pub mod hybrid;
pub mod multi_hop;
pub mod pool;
pub mod ranking;
pub mod router;
pub mod strategies;
pub mod task_adapter;

pub use fusion::rrf;
pub use hybrid::HybridRetriever;
pub use multi_hop::MultiHopRetriever;
pub use pool::RetrieverPool;
pub use ranking::CrossEncoderReranker;
pub use router::{KeywordClassifier, QueryRouter};
pub use strategies::{DenseRetriever, HydeRetriever, SparseRetriever};
pub use task_adapter::TaskAdapter;
