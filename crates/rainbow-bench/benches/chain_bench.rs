//! Chain-walking benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rainbow_engine::walk;
use rainbow_hashes::WikiHash;

fn bench_walk_chain_lens(c: &mut Criterion) {
    let hash = WikiHash;
    let mut group = c.benchmark_group("chain_walk");

    for &chain_len in &[10u64, 100, 1000] {
        group.bench_with_input(
            BenchmarkId::new("chain_len", chain_len),
            &chain_len,
            |b, &len| {
                b.iter(|| black_box(walk(black_box(42), len, &hash)));
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_walk_chain_lens);
criterion_main!(benches);
