//! Benchmarks for the compile pipeline and field evaluation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use precision_field::fixtures;
use precision_field::prelude::*;

/// Union of `n` mirrored circle pairs
fn wide_scene(n: usize) -> FieldNode {
    let children = (0..n)
        .map(|i| {
            let x = (i as f32 / n as f32) * 2.0 - 1.0;
            FieldNode::op(format!("m{i}"), OpKind::Mirror)
                .with_params(|p| p.offset = Some(x))
                .with_children(vec![
                    FieldNode::circle(format!("c{i}"), Vec2::new(x, 0.2), 0.05),
                    FieldNode::rect(format!("b{i}"), Vec2::new(x, -0.2), Vec2::splat(0.04)),
                ])
        })
        .collect();
    FieldNode::op("root", OpKind::SmoothUnion)
        .with_blend(0.05)
        .with_children(children)
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let scene = fixtures::demo_scene();

    group.bench_function("compile", |b| b.iter(|| compile(black_box(Some(&scene)))));

    let ir = compile(Some(&scene));
    group.bench_function("serialize", |b| b.iter(|| serialize(black_box(&ir))));

    let text = serialize(&ir);
    group.bench_function("hash", |b| b.iter(|| hash(black_box(&text))));

    group.bench_function("generate", |b| b.iter(|| generate(black_box(Some(&scene)))));

    group.finish();
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling");

    for n in [8, 64, 256] {
        let scene = wide_scene(n);
        group.throughput(Throughput::Elements(scene.node_count() as u64));
        group.bench_with_input(BenchmarkId::new("fingerprint", n), &scene, |b, s| {
            b.iter(|| fingerprint(black_box(Some(s))))
        });
        group.bench_with_input(BenchmarkId::new("generate", n), &scene, |b, s| {
            b.iter(|| generate(black_box(Some(s))))
        });
    }

    group.finish();
}

fn bench_eval(c: &mut Criterion) {
    let mut group = c.benchmark_group("eval");
    let scene = fixtures::demo_scene();
    let points: Vec<Vec2> = (0..10_000)
        .map(|i| Vec2::new((i % 100) as f32 * 0.03 - 1.5, (i / 100) as f32 * 0.03 - 1.5))
        .collect();
    group.throughput(Throughput::Elements(points.len() as u64));

    group.bench_function("batch", |b| {
        b.iter(|| eval_batch(black_box(Some(&scene)), black_box(&points)))
    });
    group.bench_function("batch_parallel", |b| {
        b.iter(|| eval_batch_parallel(black_box(Some(&scene)), black_box(&points)))
    });

    group.finish();
}

criterion_group!(benches, bench_pipeline, bench_scaling, bench_eval);
criterion_main!(benches);
