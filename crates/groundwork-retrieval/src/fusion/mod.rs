//! Rank fusion across result lists from different retrievers.

pub mod rrf;

pub use rrf::{fuse, rrf_score};
