// Single source of truth for all default values.

// --- Retrieval ---
pub const DEFAULT_CHUNK_SIZE: usize = 512; // words
pub const DEFAULT_CHUNK_OVERLAP: usize = 100; // words
pub const DEFAULT_RESULT_COUNT: usize = 5;
pub const DEFAULT_CANDIDATE_MULTIPLIER: usize = 2;
pub const DEFAULT_LEXICAL_WEIGHT: f64 = 0.6;
pub const DEFAULT_VECTOR_WEIGHT: f64 = 0.4;
pub const DEFAULT_OVERLAP_BONUS: f64 = 0.1;
pub const DEFAULT_BM25_K1: f64 = 1.2;
pub const DEFAULT_BM25_B: f64 = 0.75;
pub const DEFAULT_SUB_SEARCH_TIMEOUT_MS: u64 = 500;
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 384;
pub const DEFAULT_MAX_TOPICS: usize = 10;

// --- Gateway ---
pub const DEFAULT_QUOTE_TTL_SECS: u64 = 60;
pub const DEFAULT_NEWS_TTL_SECS: u64 = 900; // 15 minutes
pub const DEFAULT_FUNDAMENTALS_TTL_SECS: u64 = 86_400; // 24 hours
pub const DEFAULT_STALE_RETENTION_SECS: u64 = 86_400;
pub const DEFAULT_CACHE_CAPACITY: u64 = 10_000;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 2;
pub const DEFAULT_INITIAL_BACKOFF_MS: u64 = 100;
pub const DEFAULT_MAX_BACKOFF_MS: u64 = 2_000;
pub const DEFAULT_BACKOFF_MULTIPLIER: f64 = 2.0;
pub const DEFAULT_LATENCY_BUDGET_MS: u64 = 3_000;
pub const DEFAULT_BREAKER_FAILURE_THRESHOLD: u32 = 5;
pub const DEFAULT_BREAKER_COOLDOWN_SECS: u64 = 30;
pub const DEFAULT_FETCH_CONCURRENCY: usize = 4;
pub const DEFAULT_RATE_LIMIT_INTERVAL_MS: u64 = 100;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

// --- Compliance ---
pub const DEFAULT_JURISDICTION: &str = "US";
pub const DEFAULT_APPEND_FOOTER: bool = true;

// --- Orchestrator ---
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.1;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_HISTORY_WINDOW: usize = 10;

// --- Session ---
pub const DEFAULT_MAX_TURNS: usize = 50;
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 86_400; // 24 hours

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
pub const DEFAULT_ALERT_WINDOW_SECS: i64 = 3_600;
pub const DEFAULT_ALERT_THRESHOLD: usize = 3;
