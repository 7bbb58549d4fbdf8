//! # advisor-retrieval
//!
//! The content retrieval engine. Documents are chunked, tagged with source
//! metadata, and indexed lexically (BM25) and by embedding. Queries filter
//! first, run both searches concurrently, normalize, fuse, and attribute.
//!
//! ## Architecture
//!
//! ```text
//! RetrievalEngine
//! ├── Ingest
//! │   ├── Chunker (sentence-aware word windows with overlap)
//! │   └── Metadata (title + topic enrichment)
//! ├── IndexSnapshot (Arc-swapped, readers never see a partial ingest)
//! ├── HybridSearcher
//! │   ├── Lexical (BM25 over filtered candidates)
//! │   └── Vector (cosine over filtered candidates)
//! ├── Fusion
//! │   ├── Normalize (min-max per list)
//! │   └── Weighted (lexical + vector + overlap bonus, stable tie-breaks)
//! └── Embedding
//!     └── HashedTfIdfEmbedder (default, dependency-free)
//! ```

pub mod embedding;
pub mod engine;
pub mod fusion;
pub mod index;
pub mod ingest;
pub mod search;
pub mod text;

pub use embedding::HashedTfIdfEmbedder;
pub use engine::RetrievalEngine;
pub use index::IndexSnapshot;
pub use search::HybridSearcher;
