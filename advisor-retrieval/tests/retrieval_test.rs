//! advisor-retrieval integration tests: ingest, hybrid query, filters,
//! ordering, snapshot isolation, and degraded sub-searches.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use advisor_core::config::RetrievalConfig;
use advisor_core::errors::{AdvisorError, AdvisorResult};
use advisor_core::models::{Document, KnowledgeLevel, SearchFilter};
use advisor_core::traits::IEmbeddingProvider;
use advisor_retrieval::{HashedTfIdfEmbedder, RetrievalEngine};
use tokio_util::sync::CancellationToken;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn engine() -> RetrievalEngine {
    RetrievalEngine::new(RetrievalConfig::default())
}

fn small_chunks() -> RetrievalConfig {
    RetrievalConfig {
        chunk_size: 12,
        chunk_overlap: 3,
        ..Default::default()
    }
}

/// Embedder that can be switched to fail after ingestion.
struct FlakyEmbedder {
    inner: HashedTfIdfEmbedder,
    failing: AtomicBool,
}

impl IEmbeddingProvider for FlakyEmbedder {
    fn embed(&self, text: &str) -> AdvisorResult<Vec<f32>> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AdvisorError::DegradedMode {
                component: "embedding".into(),
                fallback: "none".into(),
            });
        }
        self.inner.embed(text)
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }

    fn name(&self) -> &str {
        "flaky"
    }
}

// ── Empty corpus and filters ──

#[tokio::test]
async fn empty_corpus_returns_no_sources_not_error() {
    let outcome = engine().query("what is a bond", None, 5).await.unwrap();
    assert!(outcome.results.is_empty());
    assert!(outcome.no_sources);
    assert!(!outcome.partial);
}

#[tokio::test]
async fn empty_corpus_with_zero_k_still_reports_no_sources() {
    let outcome = engine().query("what is a bond", None, 0).await.unwrap();
    assert!(outcome.results.is_empty());
    assert!(outcome.no_sources);
}

#[tokio::test]
async fn empty_filtered_set_returns_no_sources() {
    let e = engine();
    e.ingest(&Document::new("b", "Bonds pay coupons.").with_level(KnowledgeLevel::Beginner))
        .unwrap();
    let filter = SearchFilter::new().level(KnowledgeLevel::Advanced);
    let outcome = e.query("bonds", Some(&filter), 5).await.unwrap();
    assert!(outcome.results.is_empty());
    assert!(outcome.no_sources);
}

#[tokio::test]
async fn filtered_out_chunks_never_appear() {
    let e = engine();
    e.ingest(
        &Document::new("intro", "Volatility measures how much prices swing.")
            .with_level(KnowledgeLevel::Beginner),
    )
    .unwrap();
    e.ingest(
        &Document::new("vega", "Vega measures option sensitivity to implied volatility.")
            .with_level(KnowledgeLevel::Advanced),
    )
    .unwrap();

    let filter = SearchFilter::new().level(KnowledgeLevel::Advanced);
    let outcome = e.query("volatility", Some(&filter), 5).await.unwrap();
    assert!(!outcome.results.is_empty());
    assert!(outcome
        .results
        .iter()
        .all(|r| r.attribution.document_id == "vega"));
}

#[tokio::test]
async fn topic_and_jurisdiction_filters_apply() {
    let e = engine();
    e.ingest(
        &Document::new("us", "Retirement accounts defer tax.")
            .with_topics(["retirement"])
            .with_jurisdiction("US"),
    )
    .unwrap();
    e.ingest(
        &Document::new("uk", "Pension accounts defer tax.")
            .with_topics(["retirement"])
            .with_jurisdiction("UK"),
    )
    .unwrap();

    let filter = SearchFilter::new().topic("Retirement").jurisdiction("uk");
    let outcome = e.query("defer tax", Some(&filter), 5).await.unwrap();
    assert_eq!(outcome.results.len(), 1);
    assert_eq!(outcome.results[0].attribution.document_id, "uk");
}

// ── Ranking ──

#[tokio::test]
async fn results_are_bounded_by_k_and_attributed() {
    let e = RetrievalEngine::new(small_chunks());
    let text = "Index funds hold many stocks. Index funds keep costs low. \
                Index funds track a benchmark. Index funds suit long horizons. \
                Index funds rebalance automatically. Index funds are diversified.";
    e.ingest(&Document::new("index-funds", text).with_title("Index Funds"))
        .unwrap();

    let outcome = e.query("index funds", None, 2).await.unwrap();
    assert_eq!(outcome.results.len(), 2);
    for r in &outcome.results {
        assert_eq!(r.attribution.document_id, "index-funds");
        assert_eq!(r.attribution.title, "Index Funds");
        assert_eq!(r.attribution.chunk_id, r.chunk_id);
        assert_eq!(&text[r.attribution.offset..r.attribution.offset + r.text.len()], r.text);
        assert!((0.0..=1.0).contains(&r.fused_score));
    }
    assert!(outcome.results[0].fused_score >= outcome.results[1].fused_score);
}

#[tokio::test]
async fn exact_ties_break_by_insertion_order() {
    let e = engine();
    let text = "Dollar cost averaging invests a fixed amount on a schedule.";
    e.ingest(&Document::new("first", text)).unwrap();
    e.ingest(&Document::new("second", text)).unwrap();

    let outcome = e.query("dollar cost averaging", None, 5).await.unwrap();
    assert_eq!(outcome.results.len(), 2);
    assert_eq!(outcome.results[0].fused_score, outcome.results[1].fused_score);
    assert_eq!(outcome.results[0].attribution.document_id, "first");
    assert!(outcome.results[0].seq < outcome.results[1].seq);
}

#[tokio::test]
async fn focused_chunk_outranks_scattered_terms() {
    let e = engine();
    e.ingest(&Document::new(
        "scattered",
        "Market returns vary. Efficient pricing is debated. The frontier of research moves.",
    ))
    .unwrap();
    e.ingest(&Document::new(
        "phrase",
        "The efficient frontier plots optimal portfolios.",
    ))
    .unwrap();

    let outcome = e.query("efficient frontier", None, 2).await.unwrap();
    assert_eq!(outcome.results[0].attribution.document_id, "phrase");
}

#[tokio::test]
async fn zero_k_returns_nothing() {
    let e = engine();
    e.ingest(&Document::new("d", "Bonds pay coupons.")).unwrap();
    let outcome = e.query("bonds", None, 0).await.unwrap();
    assert!(outcome.results.is_empty());
}

// ── Ingest lifecycle ──

#[test]
fn ingest_produces_tagged_chunks() {
    let e = RetrievalEngine::new(small_chunks());
    let text = "# Compound Interest\nCompound interest earns interest on interest. \
                Over decades it dominates returns. Starting early matters more than \
                contributing more later. Small differences in rate add up.";
    let chunks = e
        .ingest(&Document::new("compound", text).with_level(KnowledgeLevel::Beginner))
        .unwrap();
    assert!(chunks.len() > 1);
    for c in &chunks {
        assert_eq!(c.metadata.title, "Compound Interest");
        assert_eq!(c.metadata.level, Some(KnowledgeLevel::Beginner));
        assert_eq!(&text[c.offset..c.offset + c.text.len()], c.text);
    }
    assert_eq!(e.len(), chunks.len());
}

#[test]
fn reingesting_same_content_is_noop() {
    let e = engine();
    let doc = Document::new("d", "Bonds pay coupons.");
    let first = e.ingest(&doc).unwrap();
    let version = e.snapshot().unwrap().version();
    let second = e.ingest(&doc).unwrap();
    assert_eq!(
        first.iter().map(|c| (&c.id, c.seq)).collect::<Vec<_>>(),
        second.iter().map(|c| (&c.id, c.seq)).collect::<Vec<_>>()
    );
    assert_eq!(e.snapshot().unwrap().version(), version);
}

#[tokio::test]
async fn reingesting_changed_content_replaces_chunks() {
    let e = engine();
    e.ingest(&Document::new("d", "Treasury bills mature within a year."))
        .unwrap();
    e.ingest(&Document::new("d", "Municipal bonds may be tax exempt."))
        .unwrap();

    assert_eq!(e.snapshot().unwrap().document_count(), 1);
    let old = e.query("treasury bills", None, 5).await.unwrap();
    assert!(old.results.iter().all(|r| !r.text.contains("Treasury")));
    let new = e.query("municipal bonds", None, 5).await.unwrap();
    assert_eq!(new.results.len(), 1);
}

#[tokio::test]
async fn remove_drops_document() {
    let e = engine();
    e.ingest(&Document::new("d", "Annuities provide income.")).unwrap();
    assert!(e.remove("d").unwrap());
    assert!(!e.remove("d").unwrap());
    let outcome = e.query("annuities", None, 5).await.unwrap();
    assert!(outcome.no_sources);
}

#[test]
fn invalid_document_leaves_index_untouched() {
    let e = engine();
    e.ingest(&Document::new("ok", "Bonds pay coupons.")).unwrap();
    let before = e.snapshot().unwrap();

    assert!(matches!(
        e.ingest(&Document::new("empty", "   ")),
        Err(AdvisorError::Ingestion(_))
    ));
    let after = e.snapshot().unwrap();
    assert_eq!(before.version(), after.version());
    assert_eq!(after.len(), 1);
}

#[test]
fn ingest_all_isolates_failures() {
    let e = engine();
    let docs = vec![
        Document::new("a", "Stocks represent ownership."),
        Document::new("", "missing id"),
        Document::new("b", "Bonds represent debt."),
    ];
    let report = e.ingest_all(&docs);
    assert_eq!(report.ingested.len(), 2);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(e.snapshot().unwrap().document_count(), 2);
}

#[test]
fn held_snapshot_does_not_see_later_ingest() {
    let e = engine();
    e.ingest(&Document::new("a", "Stocks represent ownership.")).unwrap();
    let held = e.snapshot().unwrap();
    e.ingest(&Document::new("b", "Bonds represent debt.")).unwrap();
    assert_eq!(held.len(), 1);
    assert_eq!(e.snapshot().unwrap().len(), 2);
}

// ── Degradation and concurrency ──

#[tokio::test]
async fn failed_query_embedding_marks_partial() {
    let embedder = Arc::new(FlakyEmbedder {
        inner: HashedTfIdfEmbedder::new(64),
        failing: AtomicBool::new(false),
    });
    let e = RetrievalEngine::with_embedder(RetrievalConfig::default(), embedder.clone());
    e.ingest(&Document::new("d", "Exchange traded funds trade like stocks."))
        .unwrap();

    embedder.failing.store(true, Ordering::SeqCst);
    let outcome = e.query("exchange traded funds", None, 5).await.unwrap();
    assert!(outcome.partial);
    assert_eq!(outcome.results.len(), 1);
    assert_eq!(outcome.results[0].vector_score, 0.0);
}

#[tokio::test]
async fn cancelled_query_returns_error() {
    let e = engine();
    e.ingest(&Document::new("d", "Bonds pay coupons.")).unwrap();
    let token = CancellationToken::new();
    token.cancel();
    let res = e.query_with_cancel("bonds", None, 5, &token).await;
    assert!(matches!(res, Err(AdvisorError::Retrieval(_))));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_ingest_and_query() {
    let e = Arc::new(engine());
    e.ingest(&Document::new("seed", "Liquidity describes how easily assets trade."))
        .unwrap();

    let mut tasks = Vec::new();
    for i in 0..8 {
        let e = Arc::clone(&e);
        tasks.push(tokio::spawn(async move {
            if i % 2 == 0 {
                e.ingest(&Document::new(
                    format!("doc-{i}"),
                    format!("Liquidity note number {i} about markets."),
                ))
                .map(|_| ())
            } else {
                e.query("liquidity", None, 3).await.map(|o| {
                    assert!(!o.results.is_empty());
                })
            }
        }));
    }
    for t in tasks {
        t.await.unwrap().unwrap();
    }
    assert_eq!(e.snapshot().unwrap().document_count(), 5);
}
