use serde::{Deserialize, Serialize};

use super::defaults;

/// Retrieval subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Chunk window size in words.
    pub chunk_size: usize,
    /// Words shared between consecutive chunks. Must be smaller than `chunk_size`.
    pub chunk_overlap: usize,
    /// Result count used when a caller does not pass one.
    pub default_k: usize,
    /// Each sub-search returns `candidate_multiplier * k` candidates before fusion.
    pub candidate_multiplier: usize,
    /// Weight of the normalized lexical score in fusion.
    pub lexical_weight: f64,
    /// Weight of the normalized vector score in fusion.
    pub vector_weight: f64,
    /// Weight of the exact term/phrase overlap bonus in fusion.
    pub overlap_bonus: f64,
    /// BM25 term-frequency saturation.
    pub bm25_k1: f64,
    /// BM25 length normalization.
    pub bm25_b: f64,
    /// Per sub-search timeout.
    pub sub_search_timeout_ms: u64,
    /// Dimensionality of the default hashed embedding provider.
    pub embedding_dimensions: usize,
    /// Upper bound on auto-extracted topics per document.
    pub max_topics: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            chunk_size: defaults::DEFAULT_CHUNK_SIZE,
            chunk_overlap: defaults::DEFAULT_CHUNK_OVERLAP,
            default_k: defaults::DEFAULT_RESULT_COUNT,
            candidate_multiplier: defaults::DEFAULT_CANDIDATE_MULTIPLIER,
            lexical_weight: defaults::DEFAULT_LEXICAL_WEIGHT,
            vector_weight: defaults::DEFAULT_VECTOR_WEIGHT,
            overlap_bonus: defaults::DEFAULT_OVERLAP_BONUS,
            bm25_k1: defaults::DEFAULT_BM25_K1,
            bm25_b: defaults::DEFAULT_BM25_B,
            sub_search_timeout_ms: defaults::DEFAULT_SUB_SEARCH_TIMEOUT_MS,
            embedding_dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            max_topics: defaults::DEFAULT_MAX_TOPICS,
        }
    }
}
