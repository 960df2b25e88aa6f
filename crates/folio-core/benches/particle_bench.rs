//! Benchmarks for particle field generation and per-frame uniforms.
//!
//! Run with: cargo bench -p folio-core

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use folio_core::config::ParticleConfig;
use folio_core::particles::{FieldAnimator, ParticleField, PointerOffset};
use std::hint::black_box;

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("particles/generate");

    for count in [256u32, 1800, 8192] {
        group.throughput(Throughput::Elements(u64::from(count)));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &n| {
            b.iter(|| black_box(ParticleField::generate(n, 15.0, 0x5EED)))
        });
    }

    group.finish();
}

fn bench_frame_uniforms(c: &mut Criterion) {
    let mut anim = FieldAnimator::new(ParticleConfig::default(), 16.0 / 9.0);
    anim.set_pointer(PointerOffset { x: 0.3, y: -0.4 });
    let mut now = 0.0f64;

    c.bench_function("particles/frame_uniforms", |b| {
        b.iter(|| {
            now += 16.7;
            black_box(anim.frame(black_box(now)))
        })
    });
}

criterion_group!(benches, bench_generate, bench_frame_uniforms);
criterion_main!(benches);
