//! Benchmarks for the per-frame CPU work.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec2;
use wisp::{FieldConfig, InstanceSurface, ParticleField, RecordingSurface, TickContext};

fn field(config: FieldConfig) -> ParticleField {
    let mut field = ParticleField::with_seed(config, 42).unwrap();
    field.initialize(1280.0, 720.0, None);
    field.on_pointer_move(640.0, 360.0);
    field
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    group.bench_function("default", |b| {
        let mut field = field(FieldConfig::default());
        let mut frame = 0;
        b.iter(|| {
            frame += 1;
            black_box(field.tick(&TickContext::manual(frame)))
        })
    });

    group.bench_function("clumped", |b| {
        let mut field = field(FieldConfig::default());
        let mut frame = 0;
        b.iter(|| {
            frame += 1;
            for p in &mut field.state_mut().particles {
                p.position = Vec2::new(640.0, 360.0);
            }
            black_box(field.tick(&TickContext::manual(frame)))
        })
    });

    for count in [40, 400, 4000] {
        group.bench_with_input(BenchmarkId::new("base_count", count), &count, |b, &count| {
            let config = FieldConfig::default()
                .with_base_count(count)
                .with_caps(count + 10, count + 20)
                .with_injection(count * 2, 8);
            let mut field = field(config);
            let mut frame = 0;
            b.iter(|| {
                frame += 1;
                black_box(field.tick(&TickContext::manual(frame)))
            })
        });
    }

    group.finish();
}

fn bench_draw(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw");
    let field = field(FieldConfig::default());

    group.bench_function("recording", |b| {
        let mut surface = RecordingSurface::new(1280.0, 720.0);
        b.iter(|| {
            field.draw(&mut surface);
            black_box(surface.take())
        })
    });

    group.bench_function("instances", |b| {
        let mut surface = InstanceSurface::new(1280.0, 720.0);
        b.iter(|| {
            field.draw(&mut surface);
            black_box(surface.as_bytes().len())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_tick, bench_draw);
criterion_main!(benches);
