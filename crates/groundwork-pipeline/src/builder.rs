//! Explicit construction of a [`Pipeline`] from configuration and injected
//! capabilities.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use groundwork_compression::ContextCompressor;
use groundwork_core::config::GroundworkConfig;
use groundwork_core::errors::{ConfigError, GroundworkResult};
use groundwork_core::traits::{
    IEmbedder, IGenerator, IHallucinationHeuristic, ILexicalSearch, IQueryClassifier,
    IRelevanceScorer, IVectorSearch,
};
use groundwork_embeddings::{create_provider, EmbeddingEngine};
use groundwork_llm::ChatCompletionsGenerator;
use groundwork_observability::QueryLog;
use groundwork_retrieval::{
    CrossEncoderReranker, DenseRetriever, HybridRetriever, HydeRetriever, QueryRouter,
    RetrieverPool, SparseRetriever, TaskAdapter,
};
use groundwork_storage::DocumentStore;
use groundwork_validation::AnswerValidator;
use tracing::info;

use crate::pipeline::Pipeline;

fn missing(component: &str) -> ConfigError {
    ConfigError::MissingComponent {
        component: component.to_string(),
    }
}

/// Collects the four required capabilities plus optional overrides.
pub struct PipelineBuilder {
    config: GroundworkConfig,
    embedder: Option<Arc<dyn IEmbedder>>,
    vector_search: Option<Arc<dyn IVectorSearch>>,
    lexical_search: Option<Arc<dyn ILexicalSearch>>,
    generator: Option<Arc<dyn IGenerator>>,
    scorer: Option<Arc<dyn IRelevanceScorer>>,
    classifier: Option<Arc<dyn IQueryClassifier>>,
    heuristic: Option<Arc<dyn IHallucinationHeuristic>>,
}

impl PipelineBuilder {
    pub fn new(config: GroundworkConfig) -> Self {
        Self {
            config,
            embedder: None,
            vector_search: None,
            lexical_search: None,
            generator: None,
            scorer: None,
            classifier: None,
            heuristic: None,
        }
    }

    /// Wire the production capabilities: the SQLite store at
    /// `storage.db_path` for both searches, the configured embedding
    /// provider and the chat-completions generator.
    pub fn from_config(config: GroundworkConfig) -> GroundworkResult<Self> {
        let store = Arc::new(
            DocumentStore::open(Path::new(&config.storage.db_path))?
                .with_embedding_model(config.embedding.model.clone()),
        );
        let embedder = create_provider(&config.embedding, config.embedding_api_key())?;
        let api_key = config
            .generation_api_key()
            .ok_or_else(|| missing("generation API key"))?;
        let generator = Arc::new(ChatCompletionsGenerator::new(&config.generation, api_key)?);

        Ok(Self::new(config)
            .embedder(embedder)
            .vector_search(store.clone())
            .lexical_search(store)
            .generator(generator)
            .with_default_scorer())
    }

    #[cfg(feature = "reranker")]
    fn with_default_scorer(self) -> Self {
        match groundwork_retrieval::ranking::FastEmbedScorer::try_new() {
            Ok(scorer) => self.scorer(Arc::new(scorer)),
            Err(e) => {
                tracing::warn!(error = %e, "cross-encoder unavailable, ranking by similarity");
                self
            }
        }
    }

    #[cfg(not(feature = "reranker"))]
    fn with_default_scorer(self) -> Self {
        self
    }

    pub fn embedder(mut self, embedder: Arc<dyn IEmbedder>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    pub fn vector_search(mut self, search: Arc<dyn IVectorSearch>) -> Self {
        self.vector_search = Some(search);
        self
    }

    pub fn lexical_search(mut self, search: Arc<dyn ILexicalSearch>) -> Self {
        self.lexical_search = Some(search);
        self
    }

    pub fn generator(mut self, generator: Arc<dyn IGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Cross-encoder for the reranker. Without one, ranking is by similarity.
    pub fn scorer(mut self, scorer: Arc<dyn IRelevanceScorer>) -> Self {
        self.scorer = Some(scorer);
        self
    }

    pub fn classifier(mut self, classifier: Arc<dyn IQueryClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn heuristic(mut self, heuristic: Arc<dyn IHallucinationHeuristic>) -> Self {
        self.heuristic = Some(heuristic);
        self
    }

    pub fn build(self) -> GroundworkResult<Pipeline> {
        let config = self.config;
        config.validate()?;

        let embedder = self.embedder.ok_or_else(|| missing("embedder"))?;
        let vector_search = self.vector_search.ok_or_else(|| missing("vector search"))?;
        let lexical_search = self.lexical_search.ok_or_else(|| missing("lexical search"))?;
        let generator = self.generator.ok_or_else(|| missing("generator"))?;

        let search_timeout = Duration::from_millis(config.retrieval.search_timeout_ms);
        let judge_timeout = Duration::from_millis(config.generation.judge_timeout_ms);

        let engine = Arc::new(EmbeddingEngine::new(embedder, &config.embedding));
        let dense = Arc::new(DenseRetriever::new(engine, vector_search, search_timeout));
        let sparse = Arc::new(SparseRetriever::new(lexical_search, search_timeout));
        let hybrid = Arc::new(HybridRetriever::new(
            dense.clone(),
            sparse.clone(),
            &config.retrieval,
        ));
        let mut pool = RetrieverPool::new(dense.clone(), sparse, hybrid);
        if config.router.enable_hyde {
            pool = pool.with_hyde(Arc::new(HydeRetriever::new(
                dense,
                generator.clone(),
                judge_timeout,
            )));
        }

        let reranker = match self.scorer {
            Some(scorer) => CrossEncoderReranker::with_scorer(scorer),
            None => CrossEncoderReranker::new(),
        };

        let mut router = QueryRouter::new(config.router.clone(), &config.subject)
            .with_generator(generator.clone(), judge_timeout);
        if let Some(classifier) = self.classifier {
            router = router.with_classifier(classifier);
        }

        let compressor = ContextCompressor::new(config.compression.clone())
            .with_generator(generator.clone(), judge_timeout);

        let mut validator = AnswerValidator::new(
            generator.clone(),
            config.validation.clone(),
            &config.generation,
        );
        if let Some(heuristic) = self.heuristic {
            validator = validator.with_heuristic(heuristic);
        }

        let query_log = Arc::new(Mutex::new(QueryLog::with_capacity(
            config.observability.query_log_capacity,
        )));

        info!(
            subject = %config.subject.name,
            generator = generator.name(),
            routing = config.router.enable_routing,
            hyde = config.router.enable_hyde,
            multi_hop = config.router.enable_multi_hop,
            reranker = reranker.has_scorer(),
            validation = config.validation.enable_answer_validation,
            "pipeline built"
        );

        Ok(Pipeline {
            config,
            router,
            task_adapter: TaskAdapter,
            pool: Arc::new(pool),
            reranker,
            generator,
            compressor,
            validator,
            query_log,
        })
    }
}
