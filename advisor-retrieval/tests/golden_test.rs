//! Golden retrieval tests over the finance corpus fixture.

use advisor_core::config::RetrievalConfig;
use advisor_retrieval::RetrievalEngine;
use test_fixtures::{finance_corpus, retrieval_cases};

fn seeded_engine() -> RetrievalEngine {
    let engine = RetrievalEngine::new(RetrievalConfig::default());
    let report = engine.ingest_all(&finance_corpus());
    assert!(report.failed.is_empty(), "corpus failed to ingest: {:?}", report.failed);
    engine
}

#[tokio::test]
async fn golden_queries_rank_expected_document_first() {
    let engine = seeded_engine();
    for case in retrieval_cases() {
        let outcome = engine
            .query(&case.query, case.filter.as_ref(), 5)
            .await
            .unwrap();
        assert!(!outcome.no_sources, "no sources for {:?}", case.query);

        if let Some(expected) = &case.expected_top {
            assert_eq!(
                &outcome.results[0].attribution.document_id, expected,
                "wrong top document for {:?}",
                case.query
            );
        }
        for r in &outcome.results {
            if !case.expected_only.is_empty() {
                assert!(
                    case.expected_only.contains(&r.attribution.document_id),
                    "{} not allowed for {:?}",
                    r.attribution.document_id,
                    case.query
                );
            }
        }
    }
}

#[tokio::test]
async fn corpus_results_carry_urls_when_present() {
    let engine = seeded_engine();
    let outcome = engine.query("diversification", None, 1).await.unwrap();
    assert_eq!(
        outcome.results[0].attribution.url.as_deref(),
        Some("https://example.org/learn/diversification")
    );
}
