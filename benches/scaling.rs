//! Benchmark suite for the preparation hot paths.
//!
//! Run with: `cargo bench`
//!
//! This benchmark measures:
//! - Min-max fit throughput over the full turbofan feature set
//! - Transform throughput (the per-record hot loop)
//! - RUL derivation and threshold labeling

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rul_dataprep::dataset::{Dataset, Record};
use rul_dataprep::labeling::{label_terminal, ThresholdClassifier};
use rul_dataprep::preprocessing::MinMaxScaler;
use rul_dataprep::schema::RecordSchema;

/// Build a synthetic run-to-failure dataset in the full turbofan layout.
fn create_dataset(units: u32, cycles_per_unit: u32) -> Dataset {
    let schema = RecordSchema::turbofan();
    let feature_count = schema.feature_count();
    let mut ds = Dataset::new(schema);

    for unit_id in 1..=units {
        for cycle in 1..=cycles_per_unit {
            // Deterministic drifting values, distinct per column
            let features = (0..feature_count)
                .map(|i| {
                    let base = 500.0 + i as f64 * 3.0;
                    base + unit_id as f64 * 0.5 + cycle as f64 * 0.01 * (i as f64 + 1.0)
                })
                .collect();
            ds.records.push(Record {
                unit_id,
                cycle,
                features,
            });
        }
    }
    ds
}

fn bench_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaler_fit");

    for &rows in &[1_000usize, 10_000, 50_000] {
        let units = (rows / 200).max(1) as u32;
        let ds = create_dataset(units, (rows as u32) / units);
        group.throughput(Throughput::Elements(ds.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &ds, |b, ds| {
            b.iter(|| {
                let fitted = MinMaxScaler::default().fit(black_box(ds)).unwrap();
                black_box(fitted);
            });
        });
    }

    group.finish();
}

fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaler_transform");

    for &rows in &[1_000usize, 10_000, 50_000] {
        let units = (rows / 200).max(1) as u32;
        let ds = create_dataset(units, (rows as u32) / units);
        let fitted = MinMaxScaler::default().fit(&ds).unwrap();
        group.throughput(Throughput::Elements(ds.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &ds, |b, ds| {
            b.iter_batched(
                || ds.clone(),
                |mut ds| {
                    fitted.transform(&mut ds).unwrap();
                    black_box(ds);
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_labeling(c: &mut Criterion) {
    let mut group = c.benchmark_group("labeling");
    let ds = create_dataset(100, 200);
    let classifier = ThresholdClassifier::new(30, 15).unwrap();

    group.throughput(Throughput::Elements(ds.len() as u64));
    group.bench_function("terminal_rul_and_thresholds", |b| {
        b.iter_batched(
            || ds.clone(),
            |mut ds| {
                label_terminal(&mut ds);
                classifier.apply(&mut ds).unwrap();
                black_box(ds);
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_fit, bench_transform, bench_labeling);
criterion_main!(benches);
