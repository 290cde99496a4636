//! Throughput smoke benchmark for each eviction policy.
//!
//! Not comprehensive: exists to keep the O(1)-amortized claim on
//! `put`/`get`/eviction honest under regression.
//!
//! ```bash
//! cargo bench --bench cache_benchmark -- --noplot
//! ```

use cachekit_core::cache::{Cache, FifoCache, LfuCache, LruCache, RandomCache, SlruCache};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const CAPACITY: usize = 10_000;
const OPS: u64 = 50_000;

fn churn_lru(c: &mut Criterion) {
    c.bench_function(BenchmarkId::new("churn", "lru"), |b| {
        b.iter(|| {
            let mut cache = LruCache::new(CAPACITY).unwrap();
            for k in 0..OPS {
                black_box(cache.put(k));
                if k % 3 == 0 {
                    black_box(cache.get(&k));
                }
            }
        });
    });
}

fn churn_fifo(c: &mut Criterion) {
    c.bench_function(BenchmarkId::new("churn", "fifo"), |b| {
        b.iter(|| {
            let mut cache = FifoCache::new(CAPACITY).unwrap();
            for k in 0..OPS {
                black_box(cache.put(k));
            }
        });
    });
}

fn churn_slru(c: &mut Criterion) {
    c.bench_function(BenchmarkId::new("churn", "slru"), |b| {
        b.iter(|| {
            let mut cache = SlruCache::new(CAPACITY, 4).unwrap();
            for k in 0..OPS {
                black_box(cache.put(k));
                if k % 3 == 0 {
                    black_box(cache.get(&k));
                }
            }
        });
    });
}

fn churn_lfu(c: &mut Criterion) {
    c.bench_function(BenchmarkId::new("churn", "lfu"), |b| {
        b.iter(|| {
            let mut cache = LfuCache::new(CAPACITY).unwrap();
            for k in 0..OPS {
                black_box(cache.put(k));
            }
        });
    });
}

fn churn_random(c: &mut Criterion) {
    c.bench_function(BenchmarkId::new("churn", "random"), |b| {
        b.iter(|| {
            let mut cache = RandomCache::new(CAPACITY).unwrap();
            for k in 0..OPS {
                black_box(cache.put(k));
            }
        });
    });
}

criterion_group!(
    benches,
    churn_lru,
    churn_fifo,
    churn_slru,
    churn_lfu,
    churn_random
);
criterion_main!(benches);
