use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use memo_cache::policy::{
    ClearPolicy, FifoPolicy, LfuPolicy, LruPolicy, RandomPolicy, TtlPolicy,
};
use memo_cache::{memoize, memoize_with, BoxedPolicy, CompositeKey};
use std::time::Duration;

const CAPACITY: usize = 1_000;

type Key = CompositeKey<(u64,)>;

fn mix(n: u64) -> u64 {
    let mut x = n.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    x ^= x >> 29;
    x.wrapping_mul(0xBF58_476D_1CE4_E5B9)
}

// Helper to build a fresh instance of every policy
fn policies() -> Vec<(&'static str, BoxedPolicy<Key, u64>)> {
    let mut policies: Vec<(&'static str, BoxedPolicy<Key, u64>)> = Vec::new();
    policies.push(("FIFO", Box::new(FifoPolicy::new(CAPACITY))));
    policies.push(("LRU", Box::new(LruPolicy::new(CAPACITY))));
    policies.push(("LFU", Box::new(LfuPolicy::new(CAPACITY))));
    policies.push(("RR", Box::new(RandomPolicy::with_seed(CAPACITY, 42))));
    policies.push(("TTL", Box::new(TtlPolicy::new(Duration::from_secs(60)))));
    policies.push(("CLEAR", Box::new(ClearPolicy::new(CAPACITY))));
    policies
}

fn bench_hits(c: &mut Criterion) {
    let mut group = c.benchmark_group("hit");
    for (name, policy) in policies() {
        let memo = memoize_with(mix, policy);
        for n in 0..CAPACITY as u64 {
            memo.call((n,));
        }
        group.bench_function(BenchmarkId::from_parameter(name), |b| {
            let mut n = 0_u64;
            b.iter(|| {
                n = (n + 1) % CAPACITY as u64;
                black_box(memo.call(black_box((n,))))
            })
        });
    }
    group.finish();
}

fn bench_mixed(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed");
    for (name, policy) in policies() {
        let memo = memoize_with(mix, policy);
        group.bench_function(BenchmarkId::from_parameter(name), |b| {
            let mut n = 0_u64;
            b.iter(|| {
                // Key space twice the capacity: roughly half the calls miss
                n = mix(n) % (2 * CAPACITY as u64);
                black_box(memo.call(black_box((n,))))
            })
        });
    }
    group.finish();
}

fn bench_unbounded(c: &mut Criterion) {
    c.bench_function("unbounded hit", |b| {
        let memo = memoize(|a: u64, b: u64| mix(a) ^ mix(b));
        memo.call((1, 2));
        b.iter(|| black_box(memo.call(black_box((1, 2)))))
    });
}

criterion_group!(benches, bench_hits, bench_mixed, bench_unbounded);
criterion_main!(benches);
