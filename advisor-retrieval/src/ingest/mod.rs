//! Document preparation: validate, enrich metadata, chunk, build postings,
//! embed. Runs entirely outside the index lock.

pub mod chunker;
pub mod metadata;

use advisor_core::config::RetrievalConfig;
use advisor_core::errors::IngestionError;
use advisor_core::models::{ChunkMetadata, Document, IndexedChunk, LexicalPostings};
use advisor_core::traits::IEmbeddingProvider;
use rayon::prelude::*;

use crate::text::{term_frequencies, tokenize};

/// A document turned into chunks, ready to be swapped into the index.
/// Chunk `seq` values are assigned at insertion.
#[derive(Debug, Clone)]
pub struct PreparedDocument {
    pub document_id: String,
    pub content_hash: String,
    pub chunks: Vec<IndexedChunk>,
}

/// blake3 hex digest of document text.
pub fn content_hash(text: &str) -> String {
    blake3::hash(text.as_bytes()).to_hex().to_string()
}

/// Validate a document before any work is done on it.
pub fn validate(doc: &Document, config: &RetrievalConfig) -> Result<(), IngestionError> {
    if doc.id.trim().is_empty() {
        return Err(IngestionError::EmptyDocumentId);
    }
    if doc.text.trim().is_empty() {
        return Err(IngestionError::EmptyText {
            document_id: doc.id.clone(),
        });
    }
    if config.chunk_size == 0 || config.chunk_overlap >= config.chunk_size {
        return Err(IngestionError::InvalidChunking {
            size: config.chunk_size,
            overlap: config.chunk_overlap,
        });
    }
    Ok(())
}

/// Build chunk metadata, filling in a title and topics when absent.
pub fn enrich_metadata(doc: &Document, max_topics: usize) -> ChunkMetadata {
    let title = doc
        .title
        .clone()
        .filter(|t| !t.trim().is_empty())
        .or_else(|| metadata::extract_title(&doc.text))
        .unwrap_or_else(|| doc.id.clone());
    let topics = if doc.topics.is_empty() {
        metadata::extract_topics(&doc.text, max_topics)
    } else {
        doc.topics.iter().take(max_topics).cloned().collect()
    };
    ChunkMetadata {
        document_id: doc.id.clone(),
        title,
        level: doc.level,
        topics,
        jurisdiction: doc.jurisdiction.clone(),
        url: doc.url.clone(),
    }
}

/// Turn a document into indexable chunks.
pub fn prepare(
    doc: &Document,
    config: &RetrievalConfig,
    embedder: &dyn IEmbeddingProvider,
) -> Result<PreparedDocument, IngestionError> {
    validate(doc, config)?;

    let meta = enrich_metadata(doc, config.max_topics);
    let hash = content_hash(&doc.text);
    let spans = chunker::chunk_text(&doc.text, config.chunk_size, config.chunk_overlap);

    let embeddings: Vec<Vec<f32>> = spans
        .par_iter()
        .map(|span| embedder.embed(span.slice(&doc.text)))
        .collect::<Result<_, _>>()
        .map_err(|e| IngestionError::EmbeddingFailed {
            document_id: doc.id.clone(),
            reason: e.to_string(),
        })?;

    let chunks = spans
        .iter()
        .zip(embeddings)
        .enumerate()
        .map(|(ordinal, (span, embedding))| {
            let text = span.slice(&doc.text).to_string();
            let tokens = tokenize(&text);
            IndexedChunk {
                id: format!("{}#{}", doc.id, ordinal),
                seq: 0,
                offset: span.offset,
                metadata: meta.clone(),
                content_hash: hash.clone(),
                postings: LexicalPostings {
                    term_freqs: term_frequencies(&tokens),
                    length: tokens.len(),
                },
                embedding,
                text,
            }
        })
        .collect();

    Ok(PreparedDocument {
        document_id: doc.id.clone(),
        content_hash: hash,
        chunks,
    })
}
