//! BM25 over the filtered candidate set.

use crate::index::IndexSnapshot;

use super::{rank_top, ScoredChunk};

/// BM25 parameters.
#[derive(Debug, Clone, Copy)]
pub struct Bm25 {
    pub k1: f64,
    pub b: f64,
}

impl Bm25 {
    /// `ln(1 + (N - df + 0.5) / (df + 0.5))`, always positive.
    pub fn idf(&self, total_chunks: usize, doc_freq: usize) -> f64 {
        let n = total_chunks as f64;
        let df = doc_freq as f64;
        (1.0 + (n - df + 0.5) / (df + 0.5)).ln()
    }

    /// Score of one chunk for the given distinct query terms.
    pub fn score(
        &self,
        snapshot: &IndexSnapshot,
        idx: usize,
        terms: &[String],
        avg_length: f64,
    ) -> f64 {
        let Some(chunk) = snapshot.chunk(idx) else {
            return 0.0;
        };
        let len = chunk.postings.length as f64;
        let norm = if avg_length > 0.0 {
            1.0 - self.b + self.b * len / avg_length
        } else {
            1.0
        };

        terms
            .iter()
            .filter_map(|t| {
                let tf = *chunk.postings.term_freqs.get(t)? as f64;
                let idf = self.idf(snapshot.len(), snapshot.doc_freq(t));
                Some(idf * tf * (self.k1 + 1.0) / (tf + self.k1 * norm))
            })
            .sum()
    }
}

/// Top `n` candidates by BM25. Chunks scoring zero are dropped.
pub fn search(
    snapshot: &IndexSnapshot,
    candidates: &[usize],
    terms: &[String],
    params: Bm25,
    n: usize,
) -> Vec<ScoredChunk> {
    if terms.is_empty() || n == 0 {
        return Vec::new();
    }
    let avg = snapshot.avg_length();
    let scored = candidates
        .iter()
        .map(|&idx| ScoredChunk {
            idx,
            score: params.score(snapshot, idx, terms, avg),
        })
        .filter(|s| s.score > 0.0)
        .collect();
    rank_top(snapshot, scored, n)
}
