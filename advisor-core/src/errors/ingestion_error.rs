/// Per-document ingestion errors. The existing index is untouched when one
/// of these is returned.
#[derive(Debug, thiserror::Error)]
pub enum IngestionError {
    #[error("document id is empty")]
    EmptyDocumentId,

    #[error("document {document_id} has no text")]
    EmptyText { document_id: String },

    #[error("invalid chunking: size {size}, overlap {overlap}")]
    InvalidChunking { size: usize, overlap: usize },

    #[error("embedding failed for {document_id}: {reason}")]
    EmbeddingFailed { document_id: String, reason: String },
}
