//! Reduction function benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rainbow_core::reduce;

fn bench_reduce_digest_lens(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduce");

    for &digest_len in &[4usize, 16, 32, 64] {
        let digest: Vec<u8> = (0..digest_len).map(|i| i as u8).collect();
        group.bench_with_input(
            BenchmarkId::new("digest_len", digest_len),
            &digest,
            |b, d| {
                b.iter(|| black_box(reduce(d, d.len(), black_box(7))));
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_reduce_digest_lens);
criterion_main!(benches);
