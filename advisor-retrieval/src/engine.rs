//! RetrievalEngine: owns the current index snapshot and runs the ingest and
//! query pipelines.
//!
//! Ingest: validate → enrich → chunk → embed (outside any lock) → build new
//! snapshot → swap.
//! Query: snapshot → filter → embed query → lexical ∥ vector → fuse → top-k.

use std::sync::{Arc, Mutex, RwLock};

use advisor_core::config::RetrievalConfig;
use advisor_core::errors::{AdvisorError, AdvisorResult, RetrievalError};
use advisor_core::models::{Document, IndexedChunk, QueryOutcome, SearchFilter};
use advisor_core::traits::IEmbeddingProvider;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::embedding::HashedTfIdfEmbedder;
use crate::index::IndexSnapshot;
use crate::ingest;
use crate::search::{HybridSearcher, QueryPlan};

/// Outcome of a batch ingest.
#[derive(Debug, Default)]
pub struct IngestReport {
    /// Document id → number of chunks now indexed for it.
    pub ingested: Vec<(String, usize)>,
    /// Document id → error message. Failed documents leave the index as it was.
    pub failed: Vec<(String, String)>,
}

/// Hybrid retrieval over snapshot-isolated chunk indexes.
pub struct RetrievalEngine {
    config: RetrievalConfig,
    embedder: Arc<dyn IEmbeddingProvider>,
    searcher: HybridSearcher,
    current: RwLock<Arc<IndexSnapshot>>,
    /// Serializes writers so each builds on the latest snapshot.
    ingest_lock: Mutex<()>,
}

impl RetrievalEngine {
    /// Engine with the default hashed embedder.
    pub fn new(config: RetrievalConfig) -> Self {
        let embedder = Arc::new(HashedTfIdfEmbedder::new(config.embedding_dimensions));
        Self::with_embedder(config, embedder)
    }

    pub fn with_embedder(config: RetrievalConfig, embedder: Arc<dyn IEmbeddingProvider>) -> Self {
        Self {
            searcher: HybridSearcher::new(&config),
            config,
            embedder,
            current: RwLock::new(Arc::new(IndexSnapshot::new())),
            ingest_lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    pub fn embedder_name(&self) -> &str {
        self.embedder.name()
    }

    /// The snapshot queries currently read from.
    pub fn snapshot(&self) -> AdvisorResult<Arc<IndexSnapshot>> {
        self.current
            .read()
            .map(|guard| Arc::clone(&*guard))
            .map_err(|_| poisoned("index snapshot"))
    }

    pub fn len(&self) -> usize {
        self.snapshot().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index a document and return its chunks.
    ///
    /// Re-ingesting identical content is a no-op returning the existing
    /// chunks; changed content replaces every chunk of the document at once.
    pub fn ingest(&self, doc: &Document) -> AdvisorResult<Vec<IndexedChunk>> {
        ingest::validate(doc, &self.config)?;

        let hash = ingest::content_hash(&doc.text);
        let current = self.snapshot()?;
        if current.has_content(&doc.id, &hash) {
            debug!(document_id = %doc.id, "content unchanged, skipping ingest");
            return Ok(current.chunks_for(&doc.id));
        }

        let prepared = ingest::prepare(doc, &self.config, self.embedder.as_ref())?;

        let _writer = self.ingest_lock.lock().map_err(|_| poisoned("ingest lock"))?;
        let base = self.snapshot()?;
        if base.has_content(&doc.id, &prepared.content_hash) {
            return Ok(base.chunks_for(&doc.id));
        }
        let replaced = base.contains_document(&doc.id);
        let (next, inserted) = base.with_document(prepared);
        self.swap(next)?;

        info!(
            document_id = %doc.id,
            chunks = inserted.len(),
            replaced,
            "document ingested"
        );
        Ok(inserted)
    }

    /// Ingest many documents. Each failure is isolated to its document.
    pub fn ingest_all<'a>(&self, docs: impl IntoIterator<Item = &'a Document>) -> IngestReport {
        let mut report = IngestReport::default();
        for doc in docs {
            match self.ingest(doc) {
                Ok(chunks) => report.ingested.push((doc.id.clone(), chunks.len())),
                Err(e) => {
                    warn!(document_id = %doc.id, error = %e, "document ingest failed");
                    report.failed.push((doc.id.clone(), e.to_string()));
                }
            }
        }
        report
    }

    /// Drop every chunk of a document. Returns whether it was indexed.
    pub fn remove(&self, document_id: &str) -> AdvisorResult<bool> {
        let _writer = self.ingest_lock.lock().map_err(|_| poisoned("ingest lock"))?;
        let base = self.snapshot()?;
        if !base.contains_document(document_id) {
            return Ok(false);
        }
        self.swap(base.without_document(document_id))?;
        info!(document_id, "document removed");
        Ok(true)
    }

    /// Hybrid query. An empty corpus or empty filtered set yields an empty
    /// outcome flagged `no_sources`, never an error.
    pub async fn query(
        &self,
        text: &str,
        filter: Option<&SearchFilter>,
        k: usize,
    ) -> AdvisorResult<QueryOutcome> {
        let snapshot = self.snapshot()?;
        let candidates = snapshot.candidates(filter);
        if candidates.is_empty() {
            debug!(corpus = snapshot.len(), "no candidates after filtering");
            return Ok(QueryOutcome::empty());
        }

        let embedding = match self.embedder.embed(text) {
            Ok(e) => Some(e),
            Err(e) => {
                warn!(
                    provider = self.embedder.name(),
                    error = %e,
                    "query embedding failed, lexical only"
                );
                None
            }
        };

        let plan = QueryPlan::new(text, embedding, candidates, k);
        let candidate_count = plan.candidates.len();
        let outcome = self.searcher.search(snapshot, plan).await;

        info!(
            candidates = candidate_count,
            results = outcome.results.len(),
            no_sources = outcome.no_sources,
            partial = outcome.partial,
            "retrieval complete"
        );
        Ok(outcome)
    }

    /// `query`, abandoned as soon as `cancel` fires.
    pub async fn query_with_cancel(
        &self,
        text: &str,
        filter: Option<&SearchFilter>,
        k: usize,
        cancel: &CancellationToken,
    ) -> AdvisorResult<QueryOutcome> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(RetrievalError::SearchFailed {
                reason: "query cancelled".to_string(),
            }
            .into()),
            outcome = self.query(text, filter, k) => outcome,
        }
    }

    fn swap(&self, next: IndexSnapshot) -> AdvisorResult<()> {
        let mut guard = self.current.write().map_err(|_| poisoned("index snapshot"))?;
        *guard = Arc::new(next);
        Ok(())
    }
}

fn poisoned(what: &str) -> AdvisorError {
    AdvisorError::FatalFault {
        reason: format!("{what} lock poisoned"),
    }
}
