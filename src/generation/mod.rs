//! Height-banded procedural world generation.
//!
//! `generate(start, end)` walks a height cursor through the half-open band
//! `[start, end)`, choosing one platform archetype per step with
//! height-dependent weights and sprinkling stepping stones, coins, power-up
//! markers and checkpoint tori. Each band draws from a Xoshiro stream seeded
//! by a SHA3 hash of the world seed and the band bounds, so the same seed
//! always grows the same tower.

pub mod catalog;

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};

use crate::constants::{
    BOUNCE_PROB, CHECKPOINT_INTERVAL, COIN_PROB_BASE, COIN_PROB_MAX, MODEL_PROB_HIGH,
    MODEL_PROB_LOW, MODEL_RAMP_END, MODEL_RAMP_START, MOVING_PROB, PLAYER_HEIGHT, PLAY_RADIUS,
    POWER_UP_PROB, STEPPING_STONE_PROB, STEP_MAX, STEP_MIN,
};
use crate::pickups::{PickupId, PickupKind, PickupSet};
use crate::registry::{
    MovingBehavior, OscillationAxis, Platform, PlatformId, PlatformKind, PlatformRegistry,
};
use crate::tracker::PowerUpKind;
use self::catalog::ModelCatalog;

/// Smallest cursor advance honored, so malformed step bounds cannot stall
/// a band walk
const MIN_STEP: f32 = 0.1;

/// Root seed of all generation, hashed per band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldSeed {
    pub seed: u64,
}

impl Default for WorldSeed {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

impl WorldSeed {
    /// Deterministic RNG seed for the band `[start, end)`
    pub fn band_hash(&self, start: f32, end: f32) -> u64 {
        let mut hasher = Sha3_256::new();
        hasher.update(self.seed.to_le_bytes());
        hasher.update(start.to_bits().to_le_bytes());
        hasher.update(end.to_bits().to_le_bytes());
        let result = hasher.finalize();
        u64::from_le_bytes(result[0..8].try_into().unwrap())
    }
}

/// The single source of truth for how far up the world exists.
/// Strictly monotonic: it only ever advances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationFrontier {
    pub highest: f32,
}

impl GenerationFrontier {
    pub fn advance_to(&mut self, height: f32) {
        if height > self.highest {
            self.highest = height;
        }
    }
}

/// Probability and step tuning for band generation. Defaults mirror the
/// shipped constants; tests narrow them to pin down exact layouts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorTuning {
    /// Cursor advance bounds; equal bounds produce a fixed step
    pub step_min: f32,
    pub step_max: f32,
    pub stepping_stone_prob: f64,
    pub moving_prob: f64,
    pub bounce_prob: f64,
    pub power_up_prob: f64,
    pub coin_prob_base: f64,
    pub coin_prob_max: f64,
    pub model_prob_low: f64,
    pub model_prob_high: f64,
    pub model_ramp_start: f32,
    pub model_ramp_end: f32,
    pub checkpoint_interval: f32,
}

impl Default for GeneratorTuning {
    fn default() -> Self {
        Self {
            step_min: STEP_MIN,
            step_max: STEP_MAX,
            stepping_stone_prob: STEPPING_STONE_PROB,
            moving_prob: MOVING_PROB,
            bounce_prob: BOUNCE_PROB,
            power_up_prob: POWER_UP_PROB,
            coin_prob_base: COIN_PROB_BASE,
            coin_prob_max: COIN_PROB_MAX,
            model_prob_low: MODEL_PROB_LOW,
            model_prob_high: MODEL_PROB_HIGH,
            model_ramp_start: MODEL_RAMP_START,
            model_ramp_end: MODEL_RAMP_END,
            checkpoint_interval: CHECKPOINT_INTERVAL,
        }
    }
}

impl GeneratorTuning {
    /// All optional emissions disabled and a fixed step, for deterministic
    /// layouts in tests
    pub fn bare(step: f32) -> Self {
        Self {
            step_min: step,
            step_max: step,
            stepping_stone_prob: 0.0,
            moving_prob: 0.0,
            bounce_prob: 0.0,
            power_up_prob: 0.0,
            coin_prob_base: 0.0,
            coin_prob_max: 0.0,
            model_prob_low: 0.0,
            model_prob_high: 0.0,
            checkpoint_interval: f32::INFINITY,
            ..Self::default()
        }
    }

    /// Model-backed platform probability at `height`, ramping between the
    /// configured bounds
    fn model_prob(&self, height: f32) -> f64 {
        let span = self.model_ramp_end - self.model_ramp_start;
        if span <= 0.0 {
            return self.model_prob_high;
        }
        let t = ((height - self.model_ramp_start) / span).clamp(0.0, 1.0) as f64;
        self.model_prob_low + (self.model_prob_high - self.model_prob_low) * t
    }

    /// Coin probability rises with height, saturating at 300
    fn coin_prob(&self, height: f32) -> f64 {
        let t = (height / 300.0).clamp(0.0, 1.0) as f64;
        self.coin_prob_base + (self.coin_prob_max - self.coin_prob_base) * t
    }
}

/// `gen_bool` panics outside [0, 1]; tuning arriving from raw construction
/// has not necessarily passed config validation
fn chance(rng: &mut Xoshiro256StarStar, p: f64) -> bool {
    rng.gen_bool(p.clamp(0.0, 1.0))
}

/// What one generation call produced, for scene registration and logging
#[derive(Debug, Default, Clone)]
pub struct BandReport {
    pub platforms: Vec<PlatformId>,
    pub pickups: Vec<PickupId>,
    pub checkpoints: Vec<u32>,
    pub coins: u32,
}

/// Streaming world generator. Owns the seed, tuning and the lateral walk
/// state carried from band to band.
#[derive(Debug)]
pub struct WorldGenerator {
    pub seed: WorldSeed,
    pub tuning: GeneratorTuning,
    last_x: f32,
    last_z: f32,
    next_checkpoint_height: f32,
}

impl WorldGenerator {
    pub fn new(seed: WorldSeed, tuning: GeneratorTuning) -> Self {
        let first_checkpoint = tuning.checkpoint_interval;
        Self {
            seed,
            tuning,
            last_x: 0.0,
            last_z: 0.0,
            next_checkpoint_height: first_checkpoint,
        }
    }

    /// Populate the registry and pickup set for `[start, end)` and advance
    /// the frontier to `end`. A band with `end <= start` is a no-op with the
    /// frontier untouched.
    pub fn generate(
        &mut self,
        start: f32,
        end: f32,
        registry: &mut PlatformRegistry,
        pickups: &mut PickupSet,
        catalog: &mut dyn ModelCatalog,
        frontier: &mut GenerationFrontier,
    ) -> BandReport {
        let mut report = BandReport::default();
        if end <= start {
            tracing::warn!(start, end, "degenerate generation band ignored");
            return report;
        }

        let mut rng = Xoshiro256StarStar::seed_from_u64(self.seed.band_hash(start, end));
        let mut cursor = start;

        while cursor < end {
            let (x, z) = self.step_lateral(&mut rng);
            let (kind, half_x, half_z) = self.choose_kind(&mut rng, cursor, x, z, catalog);
            let id = registry.allocate_id();
            report.platforms.push(registry.insert(Platform::from_center(
                id, x, z, half_x, half_z, cursor, kind,
            )));

            if chance(&mut rng, self.tuning.stepping_stone_prob) {
                report
                    .platforms
                    .push(self.emit_stepping_stone(&mut rng, registry, x, z, cursor, start));
            }

            if chance(&mut rng, self.tuning.coin_prob(cursor)) {
                let id =
                    pickups.spawn_collectible(Vec3::new(x, cursor + 1.5, z), PickupKind::Coin);
                report.pickups.push(id);
                report.coins += 1;
            }

            if chance(&mut rng, self.tuning.power_up_prob) {
                let kinds = PowerUpKind::all();
                let kind = kinds[rng.gen_range(0..kinds.len())];
                let id = pickups
                    .spawn_collectible(Vec3::new(x, cursor + 1.5, z), PickupKind::PowerUp(kind));
                report.pickups.push(id);
            }

            while self.next_checkpoint_height <= cursor && self.next_checkpoint_height < end {
                let height = self.next_checkpoint_height;
                let cp = pickups
                    .spawn_checkpoint(Vec3::new(x, height + PLAYER_HEIGHT, z), height);
                report.checkpoints.push(cp);
                self.next_checkpoint_height += self.tuning.checkpoint_interval;
            }

            cursor += self.step_height(&mut rng);
        }

        frontier.advance_to(end);
        tracing::info!(
            start,
            end,
            platforms = report.platforms.len(),
            coins = report.coins,
            checkpoints = report.checkpoints.len(),
            "generated band"
        );
        report
    }

    fn step_height(&self, rng: &mut Xoshiro256StarStar) -> f32 {
        let step = if self.tuning.step_min >= self.tuning.step_max {
            self.tuning.step_min
        } else {
            rng.gen_range(self.tuning.step_min..self.tuning.step_max)
        };
        step.max(MIN_STEP)
    }

    /// Lateral random walk clamped to the play area
    fn step_lateral(&mut self, rng: &mut Xoshiro256StarStar) -> (f32, f32) {
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let dist = rng.gen_range(2.5..5.5);
        self.last_x = (self.last_x + angle.cos() * dist).clamp(-PLAY_RADIUS, PLAY_RADIUS);
        self.last_z = (self.last_z + angle.sin() * dist).clamp(-PLAY_RADIUS, PLAY_RADIUS);
        (self.last_x, self.last_z)
    }

    /// Pick the archetype for one step, returning the kind and the half
    /// extents of its top face
    fn choose_kind(
        &self,
        rng: &mut Xoshiro256StarStar,
        height: f32,
        x: f32,
        z: f32,
        catalog: &mut dyn ModelCatalog,
    ) -> (PlatformKind, f32, f32) {
        // Model-weighted choices fall back to plain boxes while the catalog
        // is loading; generation never blocks on assets.
        if catalog.is_ready()
            && catalog.model_count() > 0
            && chance(rng, self.tuning.model_prob(height))
        {
            let index = rng.gen_range(0..catalog.model_count());
            if let Some(volume) = catalog.instantiate(index) {
                return (
                    PlatformKind::ModelInstance { model: volume.name },
                    volume.half_x,
                    volume.half_z,
                );
            }
        }

        if chance(rng, self.tuning.moving_prob) {
            let axis = if rng.gen_bool(0.5) {
                OscillationAxis::X
            } else {
                OscillationAxis::Z
            };
            let behavior = MovingBehavior {
                origin_x: x,
                origin_z: z,
                axis,
                amplitude: rng.gen_range(2.0..4.0),
                angular_speed: rng.gen_range(0.8..1.6),
                phase: rng.gen_range(0.0..std::f32::consts::TAU),
            };
            return (PlatformKind::Moving(behavior), 2.0, 2.0);
        }

        if chance(rng, self.tuning.bounce_prob) {
            return (PlatformKind::BouncePad, 1.2, 1.2);
        }

        (
            PlatformKind::Static,
            rng.gen_range(1.5..3.0),
            rng.gen_range(1.5..3.0),
        )
    }

    /// Small helper platform beside the main one, clamped into the band
    fn emit_stepping_stone(
        &self,
        rng: &mut Xoshiro256StarStar,
        registry: &mut PlatformRegistry,
        x: f32,
        z: f32,
        cursor: f32,
        band_start: f32,
    ) -> PlatformId {
        let offset_angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let offset = rng.gen_range(2.0..3.5);
        let sx = (x + offset_angle.cos() * offset).clamp(-PLAY_RADIUS, PLAY_RADIUS);
        let sz = (z + offset_angle.sin() * offset).clamp(-PLAY_RADIUS, PLAY_RADIUS);
        let top_y = (cursor - rng.gen_range(0.5..1.5)).max(band_start);
        let id = registry.allocate_id();
        registry.insert(Platform::from_center(
            id,
            sx,
            sz,
            0.8,
            0.8,
            top_y,
            PlatformKind::SteppingStone,
        ))
    }
}
