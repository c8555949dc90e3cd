use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::BTreeMap;
use wabi_window::{Median, OSBag, sliding_medians};

const N: usize = 10_000;
const WINDOWS: [usize; 3] = [3, 64, 1024];

// ─── Helper functions to generate streams ───────────────────────────────────

fn random_values(n: usize) -> Vec<i64> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut values = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        values.push((x >> 33) as i64);
    }
    values
}

fn few_distinct_values(n: usize) -> Vec<i64> {
    random_values(n).into_iter().map(|v| v % 8).collect()
}

/// Sorts a copy of every window. The obvious O(n·k·log k) baseline.
fn naive_medians(values: &[i64], k: usize) -> Vec<f64> {
    values
        .windows(k)
        .map(|window| {
            let mut sorted = window.to_vec();
            sorted.sort_unstable();
            if k % 2 == 1 {
                sorted[k / 2] as f64
            } else {
                (sorted[k / 2 - 1] as f64 + sorted[k / 2] as f64) / 2.0
            }
        })
        .collect()
}

// ─── Sliding Median Benchmarks ──────────────────────────────────────────────

fn bench_sliding_random(c: &mut Criterion) {
    let values = random_values(N);
    let mut group = c.benchmark_group("sliding_random");

    for k in WINDOWS {
        group.bench_function(BenchmarkId::new("MedianWindow", k), |b| {
            b.iter(|| sliding_medians(values.iter().copied(), k).map(|m| m.iter().map(Median::to_f64).sum::<f64>()));
        });

        group.bench_function(BenchmarkId::new("SortEachWindow", k), |b| {
            b.iter(|| naive_medians(&values, k).into_iter().sum::<f64>());
        });
    }

    group.finish();
}

fn bench_sliding_duplicates(c: &mut Criterion) {
    let values = few_distinct_values(N);
    let mut group = c.benchmark_group("sliding_duplicates");

    for k in WINDOWS {
        group.bench_function(BenchmarkId::new("MedianWindow", k), |b| {
            b.iter(|| sliding_medians(values.iter().copied(), k).map(|m| m.len()));
        });
    }

    group.finish();
}

// ─── Bag Benchmarks ─────────────────────────────────────────────────────────

fn bench_bag_insert_remove(c: &mut Criterion) {
    let values = random_values(N);
    let mut group = c.benchmark_group("bag_insert_remove");

    group.bench_function(BenchmarkId::new("OSBag", N), |b| {
        b.iter(|| {
            let mut bag = OSBag::new();
            for &v in &values {
                bag.insert(v);
            }
            for v in &values {
                bag.remove(v);
            }
            bag
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap<_, usize>", N), |b| {
        b.iter(|| {
            let mut map: BTreeMap<i64, usize> = BTreeMap::new();
            for &v in &values {
                *map.entry(v).or_default() += 1;
            }
            for v in &values {
                if let Some(count) = map.get_mut(v) {
                    *count -= 1;
                    if *count == 0 {
                        map.remove(v);
                    }
                }
            }
            map
        });
    });

    group.finish();
}

// ─── Criterion Groups ───────────────────────────────────────────────────────

criterion_group!(sliding_benches, bench_sliding_random, bench_sliding_duplicates,);

criterion_group!(bag_benches, bench_bag_insert_remove,);

criterion_main!(sliding_benches, bag_benches);
