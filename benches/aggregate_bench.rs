//! Benchmarks for the dataset pipeline.
//!
//! Run with: `cargo bench --bench aggregate_bench`
//!
//! Covers table parsing, full single-dataset analysis and date aggregation.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use cmlre_ingest::app::services::aggregator::aggregate_by_date;
use cmlre_ingest::app::services::csv_table::{ColumnIndex, RawTable, extract_records};
use cmlre_ingest::{DatasetAnalyzer, ParameterRecord};

/// Synthetic cruise log: several casts per day over `days` days.
fn build_csv(rows: usize, days: usize) -> String {
    let mut csv = String::from("Latitude,Longitude,Sample Date,Water Temp (C),Salinity (PSU),Wind Speed\n");
    for i in 0..rows {
        let day = i % days;
        let month = 1 + (day / 28) % 12;
        let dom = 1 + day % 28;
        csv.push_str(&format!(
            "{:.4},{:.4},2025-{:02}-{:02} {:02}:00,{:.2},{:.2},{:.1}\n",
            8.0 + (i % 100) as f64 * 0.01,
            76.0 + (i % 50) as f64 * 0.02,
            month,
            dom,
            i % 24,
            26.0 + (i % 7) as f64 * 0.3,
            34.0 + (i % 5) as f64 * 0.1,
            (i % 11) as f64 * 0.5
        ));
    }
    csv
}

fn bench_parse_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_table");

    for rows in [1_000, 10_000, 50_000] {
        let csv = build_csv(rows, 200);
        group.bench_with_input(BenchmarkId::new("rows", rows), &csv, |b, csv| {
            b.iter(|| RawTable::parse(black_box(csv)));
        });
    }

    group.finish();
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    let analyzer = DatasetAnalyzer::default();

    for rows in [1_000, 10_000, 50_000] {
        let csv = build_csv(rows, 200);
        group.bench_with_input(BenchmarkId::new("rows", rows), &csv, |b, csv| {
            b.iter(|| analyzer.analyze(black_box(csv)));
        });
    }

    group.finish();
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate_by_date");

    for days in [50, 300] {
        let table = RawTable::parse(&build_csv(20_000, days));
        let index = ColumnIndex::infer(&table.headers);
        let records: Vec<ParameterRecord> = extract_records(&table, &index).parameters;

        group.bench_with_input(BenchmarkId::new("distinct_days", days), &records, |b, records| {
            b.iter(|| aggregate_by_date(black_box(records), 100));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse_table, bench_analyze, bench_aggregate);
criterion_main!(benches);
