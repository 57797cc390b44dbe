use crate::models::Message;
use crate::query::QueryType;

/// Labels a query with a `QueryType`. Must be a pure function of its inputs.
pub trait IQueryClassifier: Send + Sync {
    fn classify(&self, query: &str, history: &[Message]) -> QueryType;
}
