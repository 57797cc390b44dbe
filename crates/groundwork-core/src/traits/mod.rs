//! Capability interfaces consumed by the pipeline, plus the pluggable seams
//! (classifier, relevance scorer, hallucination heuristic, retriever).

mod classifier;
mod embedder;
mod generator;
mod hallucination;
mod lexical_search;
mod relevance_scorer;
mod retriever;
mod vector_search;

pub use classifier::IQueryClassifier;
pub use embedder::IEmbedder;
pub use generator::{IGenerator, TokenStream};
pub use hallucination::IHallucinationHeuristic;
pub use lexical_search::ILexicalSearch;
pub use relevance_scorer::IRelevanceScorer;
pub use retriever::IRetriever;
pub use vector_search::IVectorSearch;
