use advisor_core::config::RetrievalConfig;
use advisor_core::models::Document;
use advisor_retrieval::RetrievalEngine;
use criterion::{criterion_group, criterion_main, Criterion};

const TERMS: &[&str] = &[
    "risk", "return", "bond", "stock", "yield", "index", "fund", "beta", "alpha", "hedge",
    "option", "credit", "equity", "market", "cash", "duration", "coupon", "dividend",
];

fn synthetic_doc(i: usize) -> Document {
    let text = (0..400)
        .map(|j| TERMS[(i * 7 + j * 13) % TERMS.len()])
        .collect::<Vec<_>>()
        .chunks(12)
        .map(|s| format!("{}.", s.join(" ")))
        .collect::<Vec<_>>()
        .join(" ");
    Document::new(format!("doc-{i}"), text)
}

fn bench_ingest(c: &mut Criterion) {
    c.bench_function("ingest_100_docs", |b| {
        b.iter(|| {
            let engine = RetrievalEngine::new(RetrievalConfig::default());
            for i in 0..100 {
                engine.ingest(&synthetic_doc(i)).unwrap();
            }
        })
    });
}

fn bench_query(c: &mut Criterion) {
    let engine = RetrievalEngine::new(RetrievalConfig {
        chunk_size: 128,
        chunk_overlap: 32,
        ..Default::default()
    });
    for i in 0..200 {
        engine.ingest(&synthetic_doc(i)).unwrap();
    }
    let rt = tokio::runtime::Runtime::new().unwrap();
    c.bench_function("hybrid_query_200_docs", |b| {
        b.iter(|| rt.block_on(engine.query("bond yield duration", None, 5)).unwrap())
    });
}

criterion_group!(benches, bench_ingest, bench_query);
criterion_main!(benches);
