use advisor_core::config::RetrievalConfig;
use advisor_core::models::{Document, KnowledgeLevel, SearchFilter};
use advisor_retrieval::fusion::FusionWeights;
use advisor_retrieval::ingest::chunker::{chunk_text, word_bounds};
use advisor_retrieval::RetrievalEngine;
use proptest::prelude::*;

const VOCAB: &[&str] = &[
    "risk", "return", "bond", "stock", "yield", "index", "fund", "beta", "alpha", "hedge",
    "option", "credit", "equity", "market", "cash",
];

fn sentence() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(VOCAB), 3..12).prop_map(|w| format!("{}.", w.join(" ")))
}

fn document_text() -> impl Strategy<Value = String> {
    prop::collection::vec(sentence(), 1..8).prop_map(|s| s.join(" "))
}

fn level() -> impl Strategy<Value = KnowledgeLevel> {
    prop::sample::select(KnowledgeLevel::ALL.to_vec())
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

fn small_config() -> RetrievalConfig {
    RetrievalConfig {
        chunk_size: 10,
        chunk_overlap: 3,
        ..Default::default()
    }
}

proptest! {
    #[test]
    fn fused_score_is_monotone(
        l in 0.0f64..1.0, v in 0.0f64..1.0, o in 0.0f64..1.0, bump in 0.0f64..1.0,
    ) {
        let w = FusionWeights::default();
        let base = w.combine(l, v, o);
        prop_assert!(w.combine((l + bump).min(1.0), v, o) >= base);
        prop_assert!(w.combine(l, (v + bump).min(1.0), o) >= base);
        prop_assert!(w.combine(l, v, (o + bump).min(1.0)) >= base);
        prop_assert!((0.0..=1.0).contains(&base));
    }

    #[test]
    fn chunks_cover_every_word_with_bounded_overlap(
        text in document_text(), size in 2usize..20, overlap_frac in 0.0f64..0.9,
    ) {
        let overlap = ((size as f64) * overlap_frac) as usize;
        prop_assume!(overlap < size);
        let words = word_bounds(&text).len();
        let spans = chunk_text(&text, size, overlap);

        prop_assert_eq!(spans.first().map(|s| s.first_word), Some(0));
        prop_assert_eq!(spans.last().map(|s| s.last_word), Some(words));
        for s in &spans {
            prop_assert!(s.word_count() >= 1 && s.word_count() <= size);
        }
        for pair in spans.windows(2) {
            prop_assert!(pair[1].first_word <= pair[0].last_word, "gap between chunks");
            prop_assert!(pair[0].last_word - pair[1].first_word <= overlap);
        }
    }

    #[test]
    fn results_bounded_sorted_and_attributed(
        docs in prop::collection::vec(document_text(), 1..6),
        query in prop::collection::vec(prop::sample::select(VOCAB), 1..4),
        k in 1usize..6,
    ) {
        let engine = RetrievalEngine::new(small_config());
        for (i, text) in docs.iter().enumerate() {
            engine.ingest(&Document::new(format!("doc-{i}"), text.clone())).unwrap();
        }
        let outcome = runtime().block_on(engine.query(&query.join(" "), None, k)).unwrap();

        prop_assert!(outcome.results.len() <= k);
        for pair in outcome.results.windows(2) {
            prop_assert!(pair[0].fused_score >= pair[1].fused_score);
        }
        for r in &outcome.results {
            prop_assert!(r.attribution.document_id.starts_with("doc-"));
            prop_assert_eq!(&r.attribution.chunk_id, &r.chunk_id);
        }
    }

    #[test]
    fn filtered_levels_never_leak(
        docs in prop::collection::vec((document_text(), level()), 1..6),
        wanted in level(),
        query in prop::sample::select(VOCAB),
    ) {
        let engine = RetrievalEngine::new(small_config());
        for (i, (text, lvl)) in docs.iter().enumerate() {
            engine
                .ingest(&Document::new(format!("doc-{i}"), text.clone()).with_level(*lvl))
                .unwrap();
        }
        let filter = SearchFilter::new().level(wanted);
        let outcome = runtime().block_on(engine.query(query, Some(&filter), 10)).unwrap();

        for r in &outcome.results {
            let idx: usize = r.attribution.document_id["doc-".len()..].parse().unwrap();
            prop_assert_eq!(docs[idx].1, wanted);
        }
        if docs.iter().all(|(_, l)| *l != wanted) {
            prop_assert!(outcome.no_sources);
        }
    }
}
