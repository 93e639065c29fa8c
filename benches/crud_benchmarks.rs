use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ordkit::{RbTreeMap, SkipList};
use std::collections::BTreeMap;

const N: usize = 10_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

// ─── Map Benchmarks ─────────────────────────────────────────────────────────

fn bench_map_insert_ordered(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_insert_ordered");

    group.bench_function(BenchmarkId::new("RbTreeMap", N), |b| {
        b.iter(|| {
            let mut map = RbTreeMap::new();
            for i in 0..N as i64 {
                map.insert(i, i);
            }
            map
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut map = BTreeMap::new();
            for i in 0..N as i64 {
                map.insert(i, i);
            }
            map
        });
    });

    group.finish();
}

fn bench_map_insert_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_insert_random");
    let keys = random_keys(N);

    group.bench_function(BenchmarkId::new("RbTreeMap", N), |b| {
        b.iter(|| {
            let mut map = RbTreeMap::new();
            for &k in &keys {
                map.insert(k, k);
            }
            map
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut map = BTreeMap::new();
            for &k in &keys {
                map.insert(k, k);
            }
            map
        });
    });

    group.finish();
}

fn bench_map_get_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_get_random");
    let keys = random_keys(N);

    let mut rb_map = RbTreeMap::new();
    let mut btree_map = BTreeMap::new();
    for &k in &keys {
        rb_map.insert(k, k);
        btree_map.insert(k, k);
    }

    group.bench_function(BenchmarkId::new("RbTreeMap", N), |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for k in &keys {
                if rb_map.get(k).is_some() {
                    hits += 1;
                }
            }
            hits
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for k in &keys {
                if btree_map.get(k).is_some() {
                    hits += 1;
                }
            }
            hits
        });
    });

    group.finish();
}

fn bench_map_remove_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_remove_random");
    let keys = random_keys(N);

    group.bench_function(BenchmarkId::new("RbTreeMap", N), |b| {
        b.iter_batched(
            || {
                let mut map = RbTreeMap::new();
                for &k in &keys {
                    map.insert(k, k);
                }
                map
            },
            |mut map| {
                for k in &keys {
                    map.remove(k);
                }
                map
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter_batched(
            || {
                let mut map = BTreeMap::new();
                for &k in &keys {
                    map.insert(k, k);
                }
                map
            },
            |mut map| {
                for k in &keys {
                    map.remove(k);
                }
                map
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_map_bounds(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_floor_ceiling");
    let keys = ordered_keys(N);
    let probes = random_keys(N);

    let mut map = RbTreeMap::new();
    for &k in &keys {
        map.insert(k * 2, k);
    }

    group.bench_function(BenchmarkId::new("RbTreeMap", N), |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for p in &probes {
                if map.floor(p, true).is_some() {
                    hits += 1;
                }
                if map.ceiling(p, true).is_some() {
                    hits += 1;
                }
            }
            hits
        });
    });

    group.finish();
}

// ─── Skip List Benchmarks ───────────────────────────────────────────────────

fn bench_skip_list_insert_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("skip_list_insert_random");
    let keys = random_keys(N);

    group.bench_function(BenchmarkId::new("SkipList", N), |b| {
        b.iter(|| {
            let mut list = SkipList::new(16, 0.5);
            for &k in &keys {
                list.insert(k);
            }
            list
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_map_insert_ordered,
    bench_map_insert_random,
    bench_map_get_random,
    bench_map_remove_random,
    bench_map_bounds,
    bench_skip_list_insert_random,
);
criterion_main!(benches);
