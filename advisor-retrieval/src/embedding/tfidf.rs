//! Hashed TF-IDF embedder.
//!
//! Generates fixed-dimension vectors by hashing terms into buckets and
//! weighting by term frequency. Deterministic and always available, so it is
//! the default when no model-backed provider is configured.

use advisor_core::errors::AdvisorResult;
use advisor_core::traits::IEmbeddingProvider;

use crate::text::{term_frequencies, tokenize};

/// Hashed TF-IDF embedding provider.
///
/// Not as semantically rich as neural embeddings, but texts sharing
/// vocabulary land close together, which is what hybrid fusion needs from
/// its vector side.
pub struct HashedTfIdfEmbedder {
    dimensions: usize,
}

impl HashedTfIdfEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    /// Hash a term into a bucket index using FNV-1a.
    fn hash_term(term: &str, dims: usize) -> usize {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in term.as_bytes() {
            h ^= *b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        (h as usize) % dims
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let tokens = tokenize(text);
        let mut vec = vec![0.0f32; self.dimensions];
        if tokens.is_empty() {
            return vec;
        }

        let total = tokens.len() as f32;
        for (term, count) in term_frequencies(&tokens) {
            let freq = count as f32 / total;
            // Longer terms are rarer; short ones are mostly function words.
            let idf = 1.0 + (term.len() as f32).ln();
            vec[Self::hash_term(&term, self.dimensions)] += freq * idf;
        }

        // L2 normalize.
        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vec {
                *v /= norm;
            }
        }
        vec
    }
}

impl IEmbeddingProvider for HashedTfIdfEmbedder {
    fn embed(&self, text: &str) -> AdvisorResult<Vec<f32>> {
        Ok(self.vectorize(text))
    }

    fn embed_batch(&self, texts: &[String]) -> AdvisorResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.vectorize(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hashed-tfidf"
    }
}
