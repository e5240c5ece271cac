use criterion::{criterion_group, criterion_main, Criterion, black_box};

use glowfield::core::types::{Mat4, Vec3};
use glowfield::grass::{GrassConfig, GrassField, RippleConfig, RippleField};
use glowfield::scene::{LoadedModel, SceneConfig, Simulation};
use glowfield::trail::{EmitterState, TrailConfig, TrailEmitter};

fn bench_grass_advance(c: &mut Criterion) {
    let config = GrassConfig::default();
    let radius = config.radius;
    let mut grass = GrassField::new(config, 7).unwrap();
    let ripples = RippleField::from_config(&RippleConfig::default(), 8.0, radius);

    c.bench_function("grass_advance_9000x8", |b| {
        let mut time = 0.0f32;
        b.iter(|| {
            time += 1.0 / 60.0;
            grass.advance(black_box(1.0 / 60.0), time, &ripples, 8.0);
        });
    });
}

fn bench_ripple_evaluate(c: &mut Criterion) {
    let ripples = RippleField::from_config(&RippleConfig::default(), 8.0, 12.0);

    c.bench_function("ripple_evaluate_grid_64", |b| {
        b.iter(|| {
            let frame = ripples.at(black_box(3.7));
            let mut sum = 0.0;
            for i in 0..64 {
                for j in 0..64 {
                    sum += frame.evaluate(i as f32 * 0.375 - 12.0, j as f32 * 0.375 - 12.0);
                }
            }
            sum
        });
    });
}

fn bench_trail_tick(c: &mut Criterion) {
    let mut trail = TrailEmitter::new(TrailConfig::default(), 7).unwrap();
    let emitter = EmitterState::new(Vec3::ZERO, Vec3::Z);

    // Fill the ring so every tick ages a full buffer
    let mut time = 0.0f32;
    for _ in 0..300 {
        time += 1.0 / 60.0;
        trail.tick(1.0 / 60.0, time, Some(&emitter));
    }

    c.bench_function("trail_tick_50k", |b| {
        b.iter(|| {
            time += 1.0 / 60.0;
            trail.tick(black_box(1.0 / 60.0), time, Some(&emitter))
        });
    });
}

fn bench_full_frame(c: &mut Criterion) {
    let mut sim = Simulation::new(SceneConfig::default()).unwrap();
    sim.attach_model(LoadedModel::new("deer", Mat4::IDENTITY));

    c.bench_function("simulation_frame", |b| {
        b.iter(|| sim.frame(black_box(1.0 / 60.0)));
    });
}

criterion_group!(
    benches,
    bench_grass_advance,
    bench_ripple_evaluate,
    bench_trail_tick,
    bench_full_frame,
);
criterion_main!(benches);
