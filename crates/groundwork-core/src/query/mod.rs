//! Query taxonomy: the closed set of query types and retrieval strategies.

mod query_type;
mod strategy;

pub use query_type::QueryType;
pub use strategy::RetrievalStrategy;
