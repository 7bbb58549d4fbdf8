//! Immutable index snapshots.
//!
//! Every ingest or removal builds a new `IndexSnapshot` from the previous
//! one and swaps it in. Queries hold an `Arc` to the snapshot they started
//! with, so they never observe a half-applied document.

use std::collections::HashMap;
use std::sync::Arc;

use advisor_core::models::{IndexedChunk, SearchFilter};

use crate::ingest::PreparedDocument;

/// A point-in-time view of the index.
#[derive(Debug, Clone, Default)]
pub struct IndexSnapshot {
    /// Chunks in insertion order.
    chunks: Vec<Arc<IndexedChunk>>,
    /// Number of chunks containing each term.
    doc_freqs: HashMap<String, usize>,
    /// Sum of chunk token lengths.
    total_length: usize,
    /// Document id → content hash.
    documents: HashMap<String, String>,
    next_seq: u64,
    /// Bumped on every successful mutation.
    version: u64,
}

impl IndexSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn chunks(&self) -> &[Arc<IndexedChunk>] {
        &self.chunks
    }

    pub fn chunk(&self, idx: usize) -> Option<&Arc<IndexedChunk>> {
        self.chunks.get(idx)
    }

    /// Chunks of one document, in order.
    pub fn chunks_for(&self, document_id: &str) -> Vec<IndexedChunk> {
        self.chunks
            .iter()
            .filter(|c| c.metadata.document_id == document_id)
            .map(|c| (**c).clone())
            .collect()
    }

    /// Whether the document is indexed with exactly this content.
    pub fn has_content(&self, document_id: &str, content_hash: &str) -> bool {
        self.documents
            .get(document_id)
            .map(|h| h == content_hash)
            .unwrap_or(false)
    }

    pub fn contains_document(&self, document_id: &str) -> bool {
        self.documents.contains_key(document_id)
    }

    pub fn avg_length(&self) -> f64 {
        if self.chunks.is_empty() {
            return 0.0;
        }
        self.total_length as f64 / self.chunks.len() as f64
    }

    pub fn doc_freq(&self, term: &str) -> usize {
        self.doc_freqs.get(term).copied().unwrap_or(0)
    }

    /// Indices of chunks eligible under `filter`, in insertion order.
    pub fn candidates(&self, filter: Option<&SearchFilter>) -> Vec<usize> {
        match filter {
            Some(f) if !f.is_empty() => self
                .chunks
                .iter()
                .enumerate()
                .filter(|(_, c)| f.matches(&c.metadata))
                .map(|(i, _)| i)
                .collect(),
            _ => (0..self.chunks.len()).collect(),
        }
    }

    /// New snapshot with `doc` replacing any previous version of it.
    pub fn with_document(&self, doc: PreparedDocument) -> (Self, Vec<IndexedChunk>) {
        let mut next = self.without_document(&doc.document_id);
        let mut inserted = Vec::with_capacity(doc.chunks.len());
        for mut chunk in doc.chunks {
            chunk.seq = next.next_seq;
            next.next_seq += 1;
            for term in chunk.postings.term_freqs.keys() {
                *next.doc_freqs.entry(term.clone()).or_default() += 1;
            }
            next.total_length += chunk.postings.length;
            inserted.push(chunk.clone());
            next.chunks.push(Arc::new(chunk));
        }
        next.documents
            .insert(doc.document_id, doc.content_hash);
        next.version = self.version + 1;
        (next, inserted)
    }

    /// New snapshot without any chunks of `document_id`.
    pub fn without_document(&self, document_id: &str) -> Self {
        let mut next = self.clone();
        if !self.documents.contains_key(document_id) {
            return next;
        }
        next.chunks.retain(|c| {
            if c.metadata.document_id != document_id {
                return true;
            }
            for term in c.postings.term_freqs.keys() {
                if let Some(df) = next.doc_freqs.get_mut(term) {
                    *df = df.saturating_sub(1);
                }
            }
            next.total_length = next.total_length.saturating_sub(c.postings.length);
            false
        });
        next.doc_freqs.retain(|_, df| *df > 0);
        next.documents.remove(document_id);
        next.version = self.version + 1;
        next
    }
}
