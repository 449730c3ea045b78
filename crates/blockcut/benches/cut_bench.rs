//! Criterion benchmarks for the cut + canonicalisation pipeline.
//!
//! Cuts a seed cube with randomly oriented joint streams of varying length
//! and canonicalises every resulting block, to capture how the LP-backed
//! operations scale with fragment count.

use blockcut::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use nalgebra::Vector3;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_joints(count: usize, seed: u64) -> Vec<Joint> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut joints = Vec::with_capacity(count);
    for _ in 0..count {
        let mut n = Vector3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        while n.norm() < 1e-6 {
            n = Vector3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            );
        }
        n /= n.norm();
        let center = Vector3::new(
            rng.gen_range(0.1..0.9),
            rng.gen_range(0.1..0.9),
            rng.gen_range(0.1..0.9),
        );
        joints.push(Joint::new(n, center, 0.0, 0.0, 0.0, Vec::new()));
    }
    joints
}

fn fragment(joints: &[Joint]) -> Vec<Block> {
    let seed = Block::bounding_box(Vector3::zeros(), Vector3::new(1.0, 1.0, 1.0));
    let mut blocks = vec![seed];
    for j in joints {
        let mut next = Vec::with_capacity(blocks.len() * 2);
        for b in &blocks {
            next.extend(b.cut(j));
        }
        blocks = next;
    }
    blocks.iter().map(Block::canonical).collect()
}

fn bench_fragment(c: &mut Criterion) {
    let mut group = c.benchmark_group("cut_pipeline");
    for &count in &[1usize, 3, 5] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &m| {
            b.iter_batched(
                || random_joints(m, 99 + m as u64),
                |joints| {
                    let blocks = fragment(&joints);
                    black_box(blocks.len());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_fragment);
criterion_main!(benches);
