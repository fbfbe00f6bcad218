//! Benchmark for OrderedMap vs standard BTreeMap.
//!
//! Compares bstmap's OrderedMap against Rust's standard BTreeMap for common
//! operations, and measures the cost of degenerate (sorted) insertion.

use bstmap::ordered::{OrderedMap, combine, subtract};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use std::collections::BTreeMap;

/// Visits `0..size` in a scattered order so that the tree stays shallow.
fn scattered_keys(size: u32) -> impl Iterator<Item = String> {
    (0..size).map(move |index| format!("{:08}", (u64::from(index) * 7919) % u64::from(size)))
}

fn scattered_map(size: u32) -> OrderedMap {
    scattered_keys(size).map(|key| (key, 1.0)).collect()
}

// =============================================================================
// insert Benchmark
// =============================================================================

fn benchmark_insert(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("insert");

    for size in [100, 1000, 10000] {
        group.bench_with_input(
            BenchmarkId::new("OrderedMap", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut map = OrderedMap::new();
                    for key in scattered_keys(size) {
                        map.insert(black_box(key), black_box(1.0));
                    }
                    black_box(map)
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut map = BTreeMap::new();
                for key in scattered_keys(size) {
                    map.insert(black_box(key), black_box(1.0));
                }
                black_box(map)
            });
        });
    }

    group.finish();
}

// =============================================================================
// sorted insert Benchmark
// =============================================================================

fn benchmark_sorted_insert(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("sorted_insert");

    for size in [100_u32, 1000] {
        // Every key lands at the end of the right spine.
        group.bench_with_input(
            BenchmarkId::new("OrderedMap", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut map = OrderedMap::new();
                    for index in 0..size {
                        map.insert(black_box(index), black_box(index));
                    }
                    black_box(map)
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// get Benchmark
// =============================================================================

fn benchmark_get(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("get");

    for size in [100, 1000, 10000] {
        let ordered_map = scattered_map(size);
        let standard_map: BTreeMap<String, f64> =
            scattered_keys(size).map(|key| (key, 1.0)).collect();
        let keys: Vec<String> = scattered_keys(size).collect();

        group.bench_with_input(BenchmarkId::new("OrderedMap", size), &keys, |bencher, keys| {
            bencher.iter(|| {
                let mut sum = 0.0;
                for key in keys {
                    if let Some(&value) = ordered_map.get(black_box(key.as_str())) {
                        sum += value;
                    }
                }
                black_box(sum)
            });
        });

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &keys, |bencher, keys| {
            bencher.iter(|| {
                let mut sum = 0.0;
                for key in keys {
                    if let Some(&value) = standard_map.get(black_box(key.as_str())) {
                        sum += value;
                    }
                }
                black_box(sum)
            });
        });
    }

    group.finish();
}

// =============================================================================
// clone Benchmark
// =============================================================================

fn benchmark_clone(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("clone");

    for size in [100, 1000, 10000] {
        let ordered_map = scattered_map(size);
        group.bench_with_input(BenchmarkId::new("OrderedMap", size), &size, |bencher, _| {
            bencher.iter(|| black_box(ordered_map.clone()));
        });
    }

    group.finish();
}

// =============================================================================
// combine / subtract Benchmark
// =============================================================================

fn benchmark_setops(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("setops");

    for size in [100, 1000] {
        let first = scattered_map(size);
        let second: OrderedMap = scattered_keys(size)
            .step_by(2)
            .map(|key| (key, 2.0))
            .collect();

        group.bench_with_input(BenchmarkId::new("combine", size), &size, |bencher, _| {
            bencher.iter(|| black_box(combine(&first, &second)));
        });

        group.bench_with_input(BenchmarkId::new("subtract", size), &size, |bencher, _| {
            bencher.iter(|| black_box(subtract(&first, &second)));
        });
    }

    group.finish();
}

// =============================================================================
// Criterion Group and Main
// =============================================================================

criterion_group!(
    benches,
    benchmark_insert,
    benchmark_sorted_insert,
    benchmark_get,
    benchmark_clone,
    benchmark_setops
);

criterion_main!(benches);
