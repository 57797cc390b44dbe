//! Query performance logging: query type, strategy, latency, documents retrieved, confidence.

use std::collections::VecDeque;
use std::time::Duration;

use groundwork_core::query::{QueryType, RetrievalStrategy};
use serde::{Deserialize, Serialize};

/// A single query log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryLogEntry {
    pub session_id: String,
    pub query: String,
    pub query_type: QueryType,
    pub strategy: RetrievalStrategy,
    pub latency: Duration,
    pub retrieved: usize,
    /// Validator confidence, when validation ran.
    pub confidence: Option<f64>,
    /// Error code when the request failed.
    pub error_code: Option<String>,
    pub timestamp_epoch_ms: i64,
}

impl QueryLogEntry {
    /// Create a new entry with the timestamp set to now.
    pub fn new(
        session_id: impl Into<String>,
        query: impl Into<String>,
        query_type: QueryType,
        strategy: RetrievalStrategy,
        latency: Duration,
        retrieved: usize,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            query: query.into(),
            query_type,
            strategy,
            latency,
            retrieved,
            confidence: None,
            error_code: None,
            timestamp_epoch_ms: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn with_confidence(mut self, confidence: Option<f64>) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn with_error_code(mut self, code: impl Into<String>) -> Self {
        self.error_code = Some(code.into());
        self
    }
}

/// Aggregates over the retained entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryLogSummary {
    pub count: usize,
    pub failures: usize,
    /// Requests answered without any retrieved documents (meta queries excluded).
    pub empty_retrievals: usize,
    pub avg_latency_ms: u64,
    pub p95_latency_ms: u64,
}

/// Bounded query log for pipeline performance analysis.
#[derive(Debug, Clone)]
pub struct QueryLog {
    entries: VecDeque<QueryLogEntry>,
    /// Maximum entries to retain (ring buffer behavior).
    max_entries: usize,
}

impl Default for QueryLog {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryLog {
    pub fn new() -> Self {
        Self::with_capacity(10_000)
    }

    /// Create with a custom capacity.
    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries: max_entries.max(1),
        }
    }

    /// Record a query.
    pub fn record(&mut self, entry: QueryLogEntry) {
        tracing::debug!(
            event = "query_logged",
            session_id = %entry.session_id,
            query_type = %entry.query_type,
            strategy = %entry.strategy,
            latency_ms = entry.latency.as_millis() as u64,
            retrieved = entry.retrieved,
            confidence = ?entry.confidence,
            "query logged"
        );

        self.entries.push_back(entry);
        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }
    }

    /// All retained entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &QueryLogEntry> {
        self.entries.iter()
    }

    /// Total number of retained entries.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Average latency across all entries.
    pub fn avg_latency(&self) -> Duration {
        if self.entries.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.entries.iter().map(|e| e.latency).sum();
        total / self.entries.len() as u32
    }

    /// Latency at the given percentile (0.0–1.0).
    pub fn latency_percentile(&self, p: f64) -> Duration {
        if self.entries.is_empty() {
            return Duration::ZERO;
        }
        let mut latencies: Vec<Duration> = self.entries.iter().map(|e| e.latency).collect();
        latencies.sort();
        let idx = ((p.clamp(0.0, 1.0) * (latencies.len() - 1) as f64).round() as usize)
            .min(latencies.len() - 1);
        latencies[idx]
    }

    pub fn summary(&self) -> QueryLogSummary {
        QueryLogSummary {
            count: self.entries.len(),
            failures: self.entries.iter().filter(|e| e.error_code.is_some()).count(),
            empty_retrievals: self
                .entries
                .iter()
                .filter(|e| e.retrieved == 0 && !e.query_type.is_meta())
                .count(),
            avg_latency_ms: self.avg_latency().as_millis() as u64,
            p95_latency_ms: self.latency_percentile(0.95).as_millis() as u64,
        }
    }
}
