use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use snakepit_core::brain::GreedyForager;
use snakepit_core::world_view::WorldView;
use snakepit_core::{create_session, step, ArenaConfig, Simulation};
use tessera::Direction;

fn bench_default_step(c: &mut Criterion) {
    // Full-size arena: 1 human, 99 bots, 300 food on a 200x200 grid
    let config = ArenaConfig::default().with_seed(42);
    let mut sim = Simulation::new(&config).unwrap();

    c.bench_function("step_default_arena", |b| {
        b.iter(|| {
            sim.step(black_box(Some(Direction::Left)));
        })
    });
}

fn bench_pure_step(c: &mut Criterion) {
    let config = ArenaConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let world = create_session(&config, &mut rng).unwrap();

    c.bench_function("pure_step_clone", |b| {
        b.iter(|| black_box(step(&world, None, &GreedyForager, &mut rng)))
    });
}

fn bench_world_view(c: &mut Criterion) {
    let config = ArenaConfig::default();
    let world = create_session(&config, &mut ChaCha8Rng::seed_from_u64(3)).unwrap();

    c.bench_function("world_view_build", |b| {
        b.iter(|| black_box(WorldView::new(black_box(&world)).occupancy().total()))
    });
}

fn bench_crowded_step(c: &mut Criterion) {
    // Small world with many bots: heavy on collisions and respawns
    let config = ArenaConfig::default()
        .with_world_size(60)
        .with_bots(300)
        .with_food(100)
        .with_seed(9);
    let mut sim = Simulation::new(&config).unwrap();

    c.bench_function("step_crowded_arena", |b| {
        b.iter(|| {
            sim.step(black_box(None));
        })
    });
}

criterion_group!(benches, bench_default_step, bench_pure_step, bench_world_view, bench_crowded_step);
criterion_main!(benches);
