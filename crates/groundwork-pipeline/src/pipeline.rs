//! The request lifecycle: understand → retrieve → generate → validate.
//!
//! Every stage but the final generation degrades in place, so a run fails
//! only when the answer itself cannot be produced.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use futures::StreamExt;
use groundwork_compression::ContextCompressor;
use groundwork_core::config::GroundworkConfig;
use groundwork_core::errors::{ErrorCode, GenerationError, GroundworkResult};
use groundwork_core::models::{GroundingResult, QueryAnalysis, RetrievalRequest, TaskConfig};
use groundwork_core::traits::{IGenerator, IRetriever};
use groundwork_core::{Document, GenerationRequest, Message, QueryType, RetrievalStrategy};
use groundwork_observability::tracing_setup::events;
use groundwork_observability::{pipeline_span, retrieval_span, QueryLog, QueryLogEntry};
use groundwork_retrieval::router::filters::extract_filters;
use groundwork_retrieval::{
    CrossEncoderReranker, MultiHopRetriever, QueryRouter, RetrieverPool, TaskAdapter,
};
use groundwork_validation::{add_inline_citations, AnswerValidator};
use tokio::sync::mpsc;
use tracing::{debug, info, Instrument};

use crate::builder::PipelineBuilder;
use crate::prompts;
use crate::request::{PipelineEvent, RunRequest, RunResponse};
use crate::state::{GenerationOutcome, RequestState};

/// Capacity of the `run_stream` channel.
pub const STREAM_BUFFER: usize = 64;

pub struct Pipeline {
    pub(crate) config: GroundworkConfig,
    pub(crate) router: QueryRouter,
    pub(crate) task_adapter: TaskAdapter,
    pub(crate) pool: Arc<RetrieverPool>,
    pub(crate) reranker: CrossEncoderReranker,
    pub(crate) generator: Arc<dyn IGenerator>,
    pub(crate) compressor: ContextCompressor,
    pub(crate) validator: AnswerValidator,
    pub(crate) query_log: Arc<Mutex<QueryLog>>,
}

impl Pipeline {
    pub fn builder(config: GroundworkConfig) -> PipelineBuilder {
        PipelineBuilder::new(config)
    }

    pub fn config(&self) -> &GroundworkConfig {
        &self.config
    }

    pub fn query_log(&self) -> Arc<Mutex<QueryLog>> {
        Arc::clone(&self.query_log)
    }

    /// Answer one query. Only a failed answer generation is an error.
    pub async fn run(&self, request: RunRequest) -> GroundworkResult<RunResponse> {
        let span = pipeline_span!(request.session_id, request.user_id);
        self.execute(request, None).instrument(span).await
    }

    /// Answer one query on a spawned task, streaming progress and tokens.
    ///
    /// Dropping the receiver stops generation at the next token.
    pub fn run_stream(self: &Arc<Self>, request: RunRequest) -> mpsc::Receiver<PipelineEvent> {
        let (tx, rx) = mpsc::channel(STREAM_BUFFER);
        let pipeline = Arc::clone(self);
        let span = pipeline_span!(request.session_id, request.user_id);

        tokio::spawn(
            async move {
                let last = match pipeline.execute(request, Some(&tx)).await {
                    Ok(response) => PipelineEvent::Completed(response),
                    Err(e) => PipelineEvent::Failed {
                        code: e.code(),
                        message: e.to_string(),
                    },
                };
                // Nobody may be listening any more.
                let _ = tx.send(last).await;
            }
            .instrument(span),
        );
        rx
    }

    async fn execute(
        &self,
        request: RunRequest,
        sink: Option<&mpsc::Sender<PipelineEvent>>,
    ) -> GroundworkResult<RunResponse> {
        let history = request.conversation_history.as_slice();

        // Step 1: understand.
        let mut state = self.understand(&request, Instant::now()).await;
        emit(
            sink,
            PipelineEvent::QueryAnalyzed {
                query_type: state.analysis.query_type,
                strategy: state.strategy,
            },
        )
        .await;

        // Step 2: retrieve.
        if state.should_retrieve() {
            state.documents = self.retrieve(&state, history).await;
        }
        emit(
            sink,
            PipelineEvent::RetrievalCompleted {
                document_count: state.documents.len(),
            },
        )
        .await;

        // Step 3: generate.
        let outcome = match self.generate(&state, history, sink).await {
            Ok(outcome) => outcome,
            Err(e) => {
                events::generation_failed(e.code().as_str(), &e.to_string());
                self.record(&request, &state, None, Some(e.code()));
                return Err(e.into());
            }
        };

        // Step 4: validate.
        let (response, grounding_result) = if outcome.cancelled {
            (outcome.text.clone(), GroundingResult::fallback("stream cancelled"))
        } else {
            self.validate(&state, &outcome.text).await
        };
        state.outcome = Some(outcome);

        let confidence = grounding_result.validated().map(|v| v.confidence);
        self.record(&request, &state, confidence, None);

        info!(
            query_type = state.analysis.query_type.as_str(),
            strategy = state.strategy.as_str(),
            documents = state.documents.len(),
            grounded = grounding_result.is_grounded(),
            latency_ms = state.started.elapsed().as_millis() as u64,
            "request completed"
        );

        Ok(RunResponse {
            response,
            retrieved_docs_count: state.documents.len(),
            query_type: state.analysis.query_type,
            grounding_result,
        })
    }

    async fn understand(&self, request: &RunRequest, started: Instant) -> RequestState {
        let history = request.conversation_history.as_slice();
        let analysis = if self.config.router.enable_routing {
            self.router.analyze(&request.query, history).await
        } else {
            self.keyword_analysis(&request.query, history)
        };

        let task = self.task_adapter.adapt(analysis.query_type);
        let filters = match &request.metadata_filters {
            Some(filters) if !filters.is_empty() => filters.clone(),
            _ => analysis.metadata_filters.clone(),
        };
        let strategy = self.effective_strategy(&analysis, &task);

        RequestState {
            started,
            query: analysis.effective_query(&request.query).to_string(),
            analysis,
            task,
            filters,
            strategy,
            documents: Vec::new(),
            outcome: None,
        }
    }

    /// Classification without rewrite or expansion, for when routing is off.
    fn keyword_analysis(&self, query: &str, history: &[Message]) -> QueryAnalysis {
        let query_type = self.router.classify(query, history);
        let retrieval_strategy = if query_type.is_meta() {
            RetrievalStrategy::None
        } else {
            RetrievalStrategy::Dense
        };
        events::query_classified(query_type.as_str(), retrieval_strategy.as_str(), false);

        QueryAnalysis {
            query_type,
            retrieval_strategy,
            rewritten_query: None,
            metadata_filters: extract_filters(
                &query.trim().to_lowercase(),
                &self.config.router.filter_vocabulary,
            ),
            expanded_queries: vec![query.to_string()],
            requires_rewriting: false,
            requires_expansion: false,
        }
    }

    /// The router's HyDE and multi-hop choices stand; otherwise the task
    /// table picks the strategy.
    fn effective_strategy(&self, analysis: &QueryAnalysis, task: &TaskConfig) -> RetrievalStrategy {
        let router = &self.config.router;
        match analysis.retrieval_strategy {
            RetrievalStrategy::None => RetrievalStrategy::None,
            RetrievalStrategy::MultiHop
                if router.enable_multi_hop && analysis.query_type == QueryType::MultiHop =>
            {
                RetrievalStrategy::MultiHop
            }
            RetrievalStrategy::Hyde if router.enable_hyde => RetrievalStrategy::Hyde,
            _ => task.strategy,
        }
    }

    async fn retrieve(&self, state: &RequestState, history: &[Message]) -> Vec<Document> {
        let params = state.task.retrieval_params();
        let span = retrieval_span!(state.strategy.as_str(), params.top_k);
        self.retrieve_inner(state, history).instrument(span).await
    }

    async fn retrieve_inner(&self, state: &RequestState, history: &[Message]) -> Vec<Document> {
        let retrieval = &self.config.retrieval;
        let params = state.task.retrieval_params();
        let request = |top_k: usize| {
            RetrievalRequest::new(state.query.as_str(), top_k, retrieval.similarity_threshold)
                .with_filters(state.filters.clone())
        };

        let documents = match state.strategy {
            RetrievalStrategy::MultiHop => {
                MultiHopRetriever::new(Arc::clone(&self.pool), self.reranker.clone(), retrieval)
                    .with_generator(
                        Arc::clone(&self.generator),
                        Duration::from_millis(self.config.generation.judge_timeout_ms),
                    )
                    .with_filters(state.filters.clone())
                    .retrieve_iterative(
                        &state.query,
                        retrieval.multi_hop_max_hops,
                        history,
                        RetrievalStrategy::Hybrid,
                    )
                    .await
            }
            RetrievalStrategy::Hyde => {
                self.pool
                    .retrieve(RetrievalStrategy::Hyde, &request(params.top_k))
                    .await
            }
            strategy => {
                let rerank = params.rerank && retrieval.enable_reranking;
                let fetch_k = if rerank {
                    retrieval.rerank_top_k
                } else {
                    params.top_k
                };
                let candidates = self.pool.retrieve(strategy, &request(fetch_k)).await;
                if rerank && !candidates.is_empty() {
                    self.reranker
                        .rerank(&state.query, candidates, params.top_k)
                        .await
                } else {
                    candidates
                }
            }
        };

        // HyDE and sparse never run a plain dense search for the query itself.
        if documents.is_empty()
            && matches!(state.strategy, RetrievalStrategy::Hyde | RetrievalStrategy::Sparse)
        {
            events::degradation_triggered(
                state.strategy.as_str(),
                "no documents",
                "dense retrieval",
            );
            return self
                .pool
                .dense()
                .retrieve(&request(retrieval.default_top_k))
                .await;
        }

        debug!(documents = documents.len(), "retrieval stage finished");
        documents
    }

    async fn generate(
        &self,
        state: &RequestState,
        history: &[Message],
        sink: Option<&mpsc::Sender<PipelineEvent>>,
    ) -> Result<GenerationOutcome, GenerationError> {
        let query_type = state.analysis.query_type;
        let params = state.task.generation_params();

        let context = if query_type.is_meta() {
            None
        } else if state.documents.is_empty() {
            Some(prompts::no_information_block(&self.config.subject.name))
        } else {
            let compressed = self
                .compressor
                .compress(
                    &state.documents,
                    self.compressor.default_budget(),
                    params.compression,
                )
                .await;
            Some(prompts::context_block(&compressed))
        };

        let mut messages = history.to_vec();
        messages.push(Message::user(prompts::user_message(
            query_type,
            &state.query,
            context.as_deref(),
        )));
        let request = GenerationRequest::new(
            prompts::system_prompt(query_type, &self.config.subject),
            messages,
        )
        .with_temperature(params.temperature)
        .with_max_tokens(params.max_tokens);

        let timeout_ms = self.config.generation.timeout_ms;
        let deadline = tokio::time::Instant::now() + Duration::from_millis(timeout_ms);
        let timed_out = |_| GenerationError::Timeout { timeout_ms };

        let mut stream = tokio::time::timeout_at(deadline, self.generator.generate_stream(&request))
            .await
            .map_err(timed_out)??;

        let mut outcome = GenerationOutcome::default();
        while let Some(chunk) = tokio::time::timeout_at(deadline, stream.next())
            .await
            .map_err(timed_out)?
        {
            let text = chunk?;
            if text.is_empty() {
                continue;
            }
            outcome.text.push_str(&text);
            outcome.chunks += 1;
            if let Some(sink) = sink {
                if sink.send(PipelineEvent::Token { text }).await.is_err() {
                    debug!(chunks = outcome.chunks, "stream receiver dropped, stopping generation");
                    outcome.cancelled = true;
                    break;
                }
            }
        }
        Ok(outcome)
    }

    async fn validate(&self, state: &RequestState, answer: &str) -> (String, GroundingResult) {
        if !self.config.validation.enable_answer_validation {
            return (answer.to_string(), GroundingResult::fallback("validation disabled"));
        }
        if state.documents.is_empty() {
            return (answer.to_string(), GroundingResult::fallback("no documents retrieved"));
        }

        let validated = self
            .validator
            .validate_and_correct(&state.query, answer, &state.documents)
            .await;
        let response = add_inline_citations(&validated.answer, &validated.citations);
        (response, GroundingResult::Validated(validated))
    }

    /// Fire-and-forget query log write.
    fn record(
        &self,
        request: &RunRequest,
        state: &RequestState,
        confidence: Option<f64>,
        error: Option<ErrorCode>,
    ) {
        let mut entry = QueryLogEntry::new(
            request.session_id.clone(),
            request.query.clone(),
            state.analysis.query_type,
            state.strategy,
            state.started.elapsed(),
            state.documents.len(),
        )
        .with_confidence(confidence);
        if let Some(code) = error {
            entry = entry.with_error_code(code.as_str());
        }

        let log = Arc::clone(&self.query_log);
        tokio::spawn(async move {
            log.lock().unwrap_or_else(|e| e.into_inner()).record(entry);
        });
    }
}

async fn emit(sink: Option<&mpsc::Sender<PipelineEvent>>, event: PipelineEvent) {
    if let Some(sink) = sink {
        let _ = sink.send(event).await;
    }
}
