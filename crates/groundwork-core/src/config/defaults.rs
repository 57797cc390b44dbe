// Single source of truth for all default values.

// --- Subject ---
pub const DEFAULT_SUBJECT_NAME: &str = "the candidate";
/// Second- and third-person forms users address the subject with.
pub const DEFAULT_SUBJECT_TOKENS: &[&str] = &["your", "you", "his", "he", "him"];

// --- Router ---
pub const DEFAULT_ENABLE_ROUTING: bool = true;
pub const DEFAULT_ENABLE_HYDE: bool = false;
pub const DEFAULT_ENABLE_MULTI_HOP: bool = false;
pub const DEFAULT_REWRITE_HISTORY_MESSAGES: usize = 4;
pub const DEFAULT_REWRITE_MESSAGE_CHARS: usize = 100;
pub const DEFAULT_MAX_EXPANDED_QUERIES: usize = 3;

// --- Retrieval ---
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.15;
pub const DEFAULT_TOP_K: usize = 3;
pub const DEFAULT_RERANK_TOP_K: usize = 10;
pub const DEFAULT_DENSE_TOP_K: usize = 20;
pub const DEFAULT_SPARSE_TOP_K: usize = 20;
pub const DEFAULT_RRF_K: u32 = 60;
pub const DEFAULT_ENABLE_RERANKING: bool = true;
pub const DEFAULT_MULTI_HOP_MAX_HOPS: usize = 3;
pub const DEFAULT_MULTI_HOP_PER_HOP_K: usize = 10;
pub const DEFAULT_MULTI_HOP_FINAL_K: usize = 10;
pub const DEFAULT_SEARCH_TIMEOUT_MS: u64 = 5_000;

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_PROVIDER: &str = "api";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 1536;
pub const DEFAULT_EMBEDDING_CACHE_CAPACITY: u64 = 10_000;
pub const DEFAULT_EMBEDDING_CACHE_TTL_SECS: u64 = 3_600; // 1 hour
pub const DEFAULT_EMBEDDING_MAX_RETRIES: u32 = 3;
pub const DEFAULT_EMBEDDING_TIMEOUT_MS: u64 = 10_000;

// --- Generation ---
pub const DEFAULT_GENERATION_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 300;
pub const DEFAULT_GENERATION_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_JUDGE_TIMEOUT_MS: u64 = 15_000;

// --- Compression ---
pub const DEFAULT_CONTEXT_MAX_TOKENS: usize = 1_500;
pub const DEFAULT_AGGRESSIVE_INPUT_CHARS: usize = 8_000;
pub const DEFAULT_DEDUP_PREFIX_CHARS: usize = 100;

// --- Validation ---
pub const DEFAULT_ENABLE_ANSWER_VALIDATION: bool = true;
pub const DEFAULT_VALIDATION_CONTEXT_DOCS: usize = 3;
pub const DEFAULT_VALIDATION_DOC_CHARS: usize = 500;

// --- Storage ---
pub const DEFAULT_DB_PATH: &str = "groundwork.db";

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_QUERY_LOG_CAPACITY: usize = 10_000;

// --- Environment ---
pub const ENV_API_KEY: &str = "GROUNDWORK_API_KEY";
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
