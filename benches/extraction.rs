//! Benchmarks for the completeness walk and batch extraction.
//!
//! Run with: `cargo bench --bench extraction`

use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use transectwalk::{
    extract_all, polyline_length, walk_to_completeness, SurveyPath, Transect, TransectStore,
    UtmPoint,
};

/// Straight transect with 25 m legs
fn make_polyline(points: usize) -> Vec<UtmPoint> {
    (0..points)
        .map(|i| UtmPoint::new(395_000.0, 4_991_000.0 + i as f64 * 25.0))
        .collect()
}

fn make_paths(count: usize) -> Vec<SurveyPath> {
    (0..count)
        .map(|i| SurveyPath {
            id: format!("P-{i:04}"),
            transect_id: format!("TR-{:03}", i % 20),
            date: NaiveDate::from_ymd_opt(2024, 3, 17).unwrap(),
            completeness: Some((i % 100 + 1) as u8),
            observer: "bench".to_string(),
            institution: "bench".to_string(),
            category: "bench".to_string(),
        })
        .collect()
}

fn bench_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("completeness_walk");

    for points in [10, 100, 1000] {
        let polyline = make_polyline(points);
        let total = polyline_length(&polyline);

        for percent in [50u8, 100u8] {
            group.bench_with_input(
                BenchmarkId::new(format!("{points}pts"), percent),
                &percent,
                |b, &pct| {
                    b.iter(|| walk_to_completeness(&polyline, total, pct));
                },
            );
        }
    }

    group.finish();
}

fn bench_batch_extraction(c: &mut Criterion) {
    let mut store = TransectStore::new();
    for i in 0..20 {
        store.insert(Transect::new(
            &format!("TR-{i:03}"),
            "CN",
            vec![make_polyline(200)],
        ));
    }

    let mut group = c.benchmark_group("batch_extraction");

    for count in [100, 1000] {
        let paths = make_paths(count);
        group.bench_with_input(
            BenchmarkId::new("extract_all", count),
            &paths,
            |b, paths| {
                b.iter(|| extract_all(&store, paths));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_walk, bench_batch_extraction);
criterion_main!(benches);
