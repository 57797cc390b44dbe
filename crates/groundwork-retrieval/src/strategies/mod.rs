//! Single-source retrieval strategies. Each one implements `IRetriever`
//! and swallows its own failures.

mod dense;
mod hyde;
mod sparse;

pub use dense::DenseRetriever;
pub use hyde::{HydeRetriever, HYDE_MAX_TOKENS, HYDE_TEMPERATURE};
pub use sparse::SparseRetriever;
