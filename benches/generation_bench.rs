use criterion::{black_box, criterion_group, criterion_main, Criterion};

use ascent_core::constants::PLAYER_RADIUS;
use ascent_core::generation::catalog::NullCatalog;
use ascent_core::generation::{GenerationFrontier, GeneratorTuning, WorldGenerator, WorldSeed};
use ascent_core::physics::{self, PlayerState, RuleSet};
use ascent_core::pickups::PickupSet;
use ascent_core::registry::PlatformRegistry;
use bevy::math::Vec3;

fn populated_registry(bands: u32) -> PlatformRegistry {
    let mut registry = PlatformRegistry::new();
    let mut pickups = PickupSet::new();
    let mut frontier = GenerationFrontier::default();
    let mut generator = WorldGenerator::new(WorldSeed::default(), GeneratorTuning::default());
    for band in 0..bands {
        let start = band as f32 * 150.0;
        generator.generate(
            start,
            start + 150.0,
            &mut registry,
            &mut pickups,
            &mut NullCatalog,
            &mut frontier,
        );
    }
    registry
}

fn bench_band_generation(c: &mut Criterion) {
    c.bench_function("generate_band_150", |b| {
        b.iter(|| {
            let mut registry = PlatformRegistry::new();
            let mut pickups = PickupSet::new();
            let mut frontier = GenerationFrontier::default();
            let mut generator =
                WorldGenerator::new(WorldSeed { seed: black_box(42) }, GeneratorTuning::default());
            generator.generate(
                black_box(0.0),
                black_box(150.0),
                &mut registry,
                &mut pickups,
                &mut NullCatalog,
                &mut frontier,
            );
        })
    });
}

fn bench_collision_queries(c: &mut Criterion) {
    let registry = populated_registry(4);

    c.bench_function("query_candidates_linear_scan", |b| {
        b.iter(|| {
            registry
                .query_candidates(black_box(0.0), black_box(0.0), PLAYER_RADIUS)
                .count()
        })
    });

    c.bench_function("resolve_landing", |b| {
        b.iter(|| {
            let mut player = PlayerState::at_spawn(Vec3::new(0.0, black_box(100.0), 0.0));
            player.velocity.y = -5.0;
            physics::resolve_landing(&mut player, &registry, RuleSet::Extended)
        })
    });
}

fn bench_prune(c: &mut Criterion) {
    c.bench_function("prune_half_tower", |b| {
        b.iter_batched(
            || populated_registry(4),
            |mut registry| registry.prune(black_box(500.0)),
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_band_generation,
    bench_collision_queries,
    bench_prune
);
criterion_main!(benches);
