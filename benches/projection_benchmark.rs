//! Benchmarks for ocrtab merge and projection performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic per-page records shaped like order forms.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ocrtab::{
    merge_pages, project_value, MergeOptions, PageRecord, ProjectionOptions, StructuredRecord,
};
use serde_json::{json, Value};

/// Creates synthetic pages, each with a header block and `lines` line items.
fn create_test_pages(page_count: u32, lines: usize) -> Vec<PageRecord> {
    (1..=page_count)
        .map(|n| {
            let items: Vec<Value> = (0..lines)
                .map(|i| {
                    json!({
                        "Pièce / Désignation": format!("SOCO-COW002-{:04}", i),
                        "Qté": i,
                        "PUHT": format!("{}.59 €", i),
                        "Délai": "21/01/25"
                    })
                })
                .collect();
            let content = json!({
                "Votre Commande": "21854",
                "Client": {"name": "ACME", "city": "Lyon"},
                "Pièces / Désignations": items
            });
            PageRecord::new(n, format!("page_{:03}.jpeg", n))
                .unwrap()
                .with_data(StructuredRecord::new(format!("page_{:03}", n), content).unwrap())
        })
        .collect()
}

/// Benchmark merging at various page counts.
fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");

    for page_count in [1, 10, 50].iter() {
        let pages = create_test_pages(*page_count, 20);

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| merge_pages(black_box(&pages), &MergeOptions::default()));
        });
    }

    group.finish();
}

/// Benchmark projecting a merged document.
fn bench_projection(c: &mut Criterion) {
    let pages = create_test_pages(50, 20);
    let merged = Value::Object(merge_pages(&pages, &MergeOptions::default()));
    let options = ProjectionOptions::default();

    c.bench_function("project_50_pages", |b| {
        b.iter(|| project_value(black_box(&merged), &options));
    });
}

criterion_group!(benches, bench_merge, bench_projection);
criterion_main!(benches);
