//! HybridSearcher: lexical and vector search run concurrently on the
//! blocking pool, each under its own timeout, then fused.

pub mod lexical;
pub mod vector;

use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;

use advisor_core::config::RetrievalConfig;
use advisor_core::errors::RetrievalError;
use advisor_core::models::{Attribution, QueryOutcome, RetrievalResult};
use tracing::{debug, warn};

use crate::fusion::{self, FusionWeights};
use crate::index::IndexSnapshot;
use crate::text::{distinct_terms, normalized_phrase, tokenize};

/// A raw score for the chunk at `idx` in a snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredChunk {
    pub idx: usize,
    pub score: f64,
}

/// Sort by score descending then insertion order, keep the first `n`.
pub(crate) fn rank_top(
    snapshot: &IndexSnapshot,
    mut scored: Vec<ScoredChunk>,
    n: usize,
) -> Vec<ScoredChunk> {
    let seq = |idx: usize| snapshot.chunk(idx).map(|c| c.seq).unwrap_or(u64::MAX);
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| seq(a.idx).cmp(&seq(b.idx)))
    });
    scored.truncate(n);
    scored
}

/// Everything a search needs, resolved before any scoring starts.
#[derive(Debug, Clone)]
pub struct QueryPlan {
    /// Distinct query terms.
    pub terms: Vec<String>,
    /// Normalized query phrase for the overlap bonus.
    pub phrase: String,
    /// `None` when the query could not be embedded.
    pub embedding: Option<Vec<f32>>,
    /// Snapshot indices that passed the filter.
    pub candidates: Vec<usize>,
    pub k: usize,
}

impl QueryPlan {
    pub fn new(query: &str, embedding: Option<Vec<f32>>, candidates: Vec<usize>, k: usize) -> Self {
        let tokens = tokenize(query);
        Self {
            terms: distinct_terms(&tokens),
            phrase: normalized_phrase(&tokens),
            embedding,
            candidates,
            k,
        }
    }
}

/// Hybrid search over one index snapshot.
pub struct HybridSearcher {
    bm25: lexical::Bm25,
    weights: FusionWeights,
    candidate_multiplier: usize,
    sub_search_timeout: Duration,
}

impl HybridSearcher {
    pub fn new(config: &RetrievalConfig) -> Self {
        Self {
            bm25: lexical::Bm25 {
                k1: config.bm25_k1,
                b: config.bm25_b,
            },
            weights: FusionWeights::from_config(config),
            candidate_multiplier: config.candidate_multiplier.max(1),
            sub_search_timeout: Duration::from_millis(config.sub_search_timeout_ms),
        }
    }

    /// Run both searches, fuse, truncate to `k`, and attribute.
    pub async fn search(&self, snapshot: Arc<IndexSnapshot>, plan: QueryPlan) -> QueryOutcome {
        if plan.candidates.is_empty() {
            return QueryOutcome::empty();
        }
        if plan.k == 0 {
            return QueryOutcome::default();
        }

        let n = plan.k.saturating_mul(self.candidate_multiplier);
        let candidates = Arc::new(plan.candidates);

        let lex_future = {
            let snapshot = Arc::clone(&snapshot);
            let candidates = Arc::clone(&candidates);
            let terms = plan.terms.clone();
            let bm25 = self.bm25;
            self.bounded("lexical", move || {
                lexical::search(&snapshot, &candidates, &terms, bm25, n)
            })
        };
        let vec_future = {
            let snapshot = Arc::clone(&snapshot);
            let candidates = Arc::clone(&candidates);
            let embedding = plan.embedding.clone();
            async move {
                match embedding {
                    Some(e) => {
                        self.bounded("vector", move || {
                            vector::search(&snapshot, &candidates, &e, n)
                        })
                        .await
                    }
                    None => None,
                }
            }
        };

        let (lex, vec) = tokio::join!(lex_future, vec_future);
        let partial = lex.is_none() || vec.is_none();
        let lex = lex.unwrap_or_default();
        let vec = vec.unwrap_or_default();
        debug!(
            lexical_hits = lex.len(),
            vector_hits = vec.len(),
            partial,
            "sub-searches joined"
        );

        let fused = fusion::fuse(&snapshot, &lex, &vec, &plan.terms, &plan.phrase, self.weights);
        let results: Vec<RetrievalResult> = fused
            .into_iter()
            .filter(|c| c.fused > 0.0)
            .take(plan.k)
            .filter_map(|c| {
                let chunk = snapshot.chunk(c.idx)?;
                Some(RetrievalResult {
                    chunk_id: chunk.id.clone(),
                    text: chunk.text.clone(),
                    lexical_score: c.lexical,
                    vector_score: c.vector,
                    fused_score: c.fused,
                    seq: chunk.seq,
                    attribution: Attribution {
                        document_id: chunk.metadata.document_id.clone(),
                        title: chunk.metadata.title.clone(),
                        offset: chunk.offset,
                        chunk_id: chunk.id.clone(),
                        url: chunk.metadata.url.clone(),
                    },
                })
            })
            .collect();

        QueryOutcome {
            no_sources: results.is_empty(),
            partial,
            results,
        }
    }

    /// Run `f` on the blocking pool under the sub-search timeout. `None` on
    /// timeout or task failure.
    async fn bounded<F>(&self, search: &'static str, f: F) -> Option<Vec<ScoredChunk>>
    where
        F: FnOnce() -> Vec<ScoredChunk> + Send + 'static,
    {
        match tokio::time::timeout(self.sub_search_timeout, tokio::task::spawn_blocking(f)).await {
            Ok(Ok(list)) => Some(list),
            Ok(Err(e)) => {
                let err = RetrievalError::SearchFailed {
                    reason: e.to_string(),
                };
                warn!(search, error = %err, "sub-search failed, continuing with partial results");
                None
            }
            Err(_) => {
                let err = RetrievalError::SubSearchTimedOut {
                    search: search.to_string(),
                    timeout_ms: self.sub_search_timeout.as_millis() as u64,
                };
                warn!(search, error = %err, "sub-search timed out, continuing with partial results");
                None
            }
        }
    }
}
