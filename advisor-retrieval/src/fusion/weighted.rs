//! Weighted hybrid fusion.
//!
//! `fused = clamp01((w_lex·lex + w_vec·vec + w_ov·overlap) / (w_lex + w_vec + w_ov))`
//!
//! All weights are non-negative, so the fused score is monotone
//! non-decreasing in each input.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use advisor_core::config::RetrievalConfig;
use advisor_core::models::IndexedChunk;

use crate::index::IndexSnapshot;
use crate::search::ScoredChunk;
use crate::text::tokenize;

use super::normalize::min_max;

/// Fusion weights taken from retrieval config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FusionWeights {
    pub lexical: f64,
    pub vector: f64,
    pub overlap: f64,
}

impl FusionWeights {
    pub fn from_config(config: &RetrievalConfig) -> Self {
        Self {
            lexical: config.lexical_weight.max(0.0),
            vector: config.vector_weight.max(0.0),
            overlap: config.overlap_bonus.max(0.0),
        }
    }

    fn total(&self) -> f64 {
        self.lexical + self.vector + self.overlap
    }

    /// Combine normalized inputs into one score in [0, 1].
    pub fn combine(&self, lexical: f64, vector: f64, overlap: f64) -> f64 {
        let total = self.total();
        if total <= f64::EPSILON {
            return 0.0;
        }
        let raw = self.lexical * lexical.clamp(0.0, 1.0)
            + self.vector * vector.clamp(0.0, 1.0)
            + self.overlap * overlap.clamp(0.0, 1.0);
        (raw / total).clamp(0.0, 1.0)
    }
}

impl Default for FusionWeights {
    fn default() -> Self {
        Self::from_config(&RetrievalConfig::default())
    }
}

/// A chunk with its normalized and fused scores.
#[derive(Debug, Clone)]
pub struct FusedCandidate {
    /// Index into the snapshot's chunk list.
    pub idx: usize,
    pub seq: u64,
    pub lexical: f64,
    pub vector: f64,
    pub overlap: f64,
    pub fused: f64,
}

/// Fraction of distinct query terms present in the chunk; 1.0 when the
/// whole normalized query phrase occurs in the chunk.
pub fn overlap_score(chunk: &IndexedChunk, terms: &[String], phrase: &str) -> f64 {
    if terms.is_empty() {
        return 0.0;
    }
    if terms.len() > 1 && !phrase.is_empty() {
        let chunk_phrase = format!(" {} ", tokenize(&chunk.text).join(" "));
        if chunk_phrase.contains(&format!(" {phrase} ")) {
            return 1.0;
        }
    }
    let present = terms
        .iter()
        .filter(|t| chunk.postings.term_freqs.contains_key(t.as_str()))
        .count();
    present as f64 / terms.len() as f64
}

/// Fuse two ranked lists over the same snapshot and order the result.
///
/// Ordering is fused score descending, then lexical score descending, then
/// insertion sequence ascending.
pub fn fuse(
    snapshot: &IndexSnapshot,
    lexical: &[ScoredChunk],
    vector: &[ScoredChunk],
    terms: &[String],
    phrase: &str,
    weights: FusionWeights,
) -> Vec<FusedCandidate> {
    let lex_norm = min_max(&lexical.iter().map(|s| s.score).collect::<Vec<_>>());
    let vec_norm = min_max(&vector.iter().map(|s| s.score).collect::<Vec<_>>());

    let lex_by_idx: HashMap<usize, f64> = lexical
        .iter()
        .zip(lex_norm)
        .map(|(s, n)| (s.idx, n))
        .collect();
    let vec_by_idx: HashMap<usize, f64> = vector
        .iter()
        .zip(vec_norm)
        .map(|(s, n)| (s.idx, n))
        .collect();

    let mut seen = HashSet::new();
    let mut fused: Vec<FusedCandidate> = lexical
        .iter()
        .chain(vector.iter())
        .filter(|s| seen.insert(s.idx))
        .filter_map(|s| {
            let chunk = snapshot.chunk(s.idx)?;
            let lex = lex_by_idx.get(&s.idx).copied().unwrap_or(0.0);
            let vec = vec_by_idx.get(&s.idx).copied().unwrap_or(0.0);
            let overlap = overlap_score(chunk, terms, phrase);
            Some(FusedCandidate {
                idx: s.idx,
                seq: chunk.seq,
                lexical: lex,
                vector: vec,
                overlap,
                fused: weights.combine(lex, vec, overlap),
            })
        })
        .collect();

    fused.sort_by(compare);
    fused
}

fn compare(a: &FusedCandidate, b: &FusedCandidate) -> Ordering {
    b.fused
        .partial_cmp(&a.fused)
        .unwrap_or(Ordering::Equal)
        .then_with(|| b.lexical.partial_cmp(&a.lexical).unwrap_or(Ordering::Equal))
        .then_with(|| a.seq.cmp(&b.seq))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combine_matches_formula() {
        let w = FusionWeights {
            lexical: 0.6,
            vector: 0.4,
            overlap: 0.1,
        };
        let expected = (0.6 * 0.5 + 0.4 * 1.0 + 0.1 * 0.0) / 1.1;
        assert!((w.combine(0.5, 1.0, 0.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn combine_is_monotone() {
        let w = FusionWeights::default();
        let base = w.combine(0.3, 0.3, 0.3);
        assert!(w.combine(0.4, 0.3, 0.3) >= base);
        assert!(w.combine(0.3, 0.4, 0.3) >= base);
        assert!(w.combine(0.3, 0.3, 0.4) >= base);
    }

    #[test]
    fn zero_weights_fuse_to_zero() {
        let w = FusionWeights {
            lexical: 0.0,
            vector: 0.0,
            overlap: 0.0,
        };
        assert_eq!(w.combine(1.0, 1.0, 1.0), 0.0);
    }

    fn chunk(text: &str) -> IndexedChunk {
        use crate::embedding::HashedTfIdfEmbedder;
        use advisor_core::models::Document;
        crate::ingest::prepare(
            &Document::new("d", text),
            &RetrievalConfig::default(),
            &HashedTfIdfEmbedder::new(8),
        )
        .unwrap()
        .chunks
        .remove(0)
    }

    #[test]
    fn overlap_counts_present_terms() {
        let c = chunk("Efficient markets price risk. The frontier moves.");
        let terms = vec!["efficient".to_string(), "frontier".to_string(), "capm".to_string()];
        let o = overlap_score(&c, &terms, "efficient frontier capm");
        assert!((o - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn whole_phrase_forces_full_overlap() {
        let c = chunk("Plot the efficient frontier, then add cash.");
        let terms = vec!["the".to_string(), "efficient".to_string(), "frontier".to_string()];
        assert_eq!(overlap_score(&c, &terms, "the efficient frontier"), 1.0);
        assert_eq!(overlap_score(&c, &[], ""), 0.0);
    }

    #[test]
    fn ties_break_on_lexical_then_seq() {
        let mk = |seq, lexical, fused| FusedCandidate {
            idx: seq as usize,
            seq,
            lexical,
            vector: 0.0,
            overlap: 0.0,
            fused,
        };
        let mut v = vec![mk(3, 0.2, 0.5), mk(1, 0.2, 0.5), mk(2, 0.9, 0.5), mk(0, 0.0, 0.9)];
        v.sort_by(compare);
        let order: Vec<u64> = v.iter().map(|c| c.seq).collect();
        assert_eq!(order, vec![0, 2, 1, 3]);
    }
}
