//! Cosine similarity over the filtered candidate set.

use crate::embedding::cosine_similarity;
use crate::index::IndexSnapshot;

use super::{rank_top, ScoredChunk};

/// Top `n` candidates by cosine similarity. Negative similarities clamp to
/// zero and are dropped along with exact zeros.
pub fn search(
    snapshot: &IndexSnapshot,
    candidates: &[usize],
    query_embedding: &[f32],
    n: usize,
) -> Vec<ScoredChunk> {
    if n == 0 || query_embedding.iter().all(|x| *x == 0.0) {
        return Vec::new();
    }
    let scored = candidates
        .iter()
        .filter_map(|&idx| {
            let chunk = snapshot.chunk(idx)?;
            let score = cosine_similarity(query_embedding, &chunk.embedding).max(0.0);
            (score > 0.0).then_some(ScoredChunk { idx, score })
        })
        .collect();
    rank_top(snapshot, scored, n)
}
