//! Performance benchmarks for the transactional store.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use txkv::Store;

/// Store with `depth` open transactions, each writing `keys_per_layer` keys.
fn layered_store(depth: usize, keys_per_layer: usize) -> Store {
    let mut store = Store::default();
    for i in 0..keys_per_layer {
        store.set(format!("base{}", i), "v");
    }
    for layer in 0..depth {
        store.begin();
        for i in 0..keys_per_layer {
            store.set(format!("l{}k{}", layer, i), (i % 10).to_string());
        }
    }
    store
}

/// Benchmark lookups that fall through to the base layer
fn bench_get_through_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_through_chain");

    for depth in [1, 10, 100, 1000] {
        let store = layered_store(depth, 4);
        group.bench_with_input(BenchmarkId::new("depth", depth), &store, |b, store| {
            b.iter(|| black_box(store.get(black_box("base0"))));
        });
    }

    group.finish();
}

/// Benchmark count over every layer
fn bench_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("count");

    for depth in [1, 10, 100] {
        let store = layered_store(depth, 100);
        group.bench_with_input(BenchmarkId::new("depth", depth), &store, |b, store| {
            b.iter(|| black_box(store.count(black_box("3"))));
        });
    }

    group.finish();
}

/// Benchmark commit replay with varying log lengths
fn bench_commit_replay(c: &mut Criterion) {
    let mut group = c.benchmark_group("commit_replay");

    for operations in [10, 100, 1000] {
        group.bench_with_input(
            BenchmarkId::new("operations", operations),
            &operations,
            |b, &operations| {
                b.iter_batched(
                    || {
                        let mut store = Store::default();
                        store.begin();
                        for i in 0..operations {
                            store.set(format!("k{}", i % 50), i.to_string());
                        }
                        store
                    },
                    |mut store| black_box(store.commit()),
                    criterion::BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_get_through_chain, bench_count, bench_commit_replay);
criterion_main!(benches);
