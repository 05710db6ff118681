//! Simulation orchestration.
//!
//! One `SimulationContext` owns the whole per-session state and advances it
//! one variable-length tick at a time. All mutation happens on the caller's
//! thread between frames; pausing short-circuits the entire update while
//! the renderer keeps drawing the last frame.
//!
//! Per-tick order: pause toggle, clock, stamina, jump edge, moving
//! platforms, integration, landing, friction, height, frontier-triggered
//! generation, prune, pickup contacts and sweep, power-up countdown,
//! achievements, respawn.

pub mod config;
pub mod plugin;

use bevy::prelude::*;

use crate::achievements::AchievementBank;
use crate::constants::{PLAYER_HEIGHT, PRUNE_DISTANCE};
use crate::events::GameEvent;
use crate::generation::catalog::ModelCatalog;
use crate::generation::{GenerationFrontier, WorldGenerator, WorldSeed};
use crate::physics::{self, InputState, MovementFrame, PlayerState};
use crate::pickups::{Contact, PickupSet};
use crate::registry::{Platform, PlatformKind, PlatformRegistry};
use crate::scene::{SceneSink, VolumeHandle};
use crate::tracker::{ClimbTracker, SessionSnapshot};

pub use config::{ConfigError, SimConfig};

/// Half extent of the permanent origin floor
const ORIGIN_FLOOR_HALF: f32 = 12.0;

/// Everything one climb session owns. Components receive only the slices
/// they need: the resolver sees the registry and player, the generator sees
/// the registry, pickups and frontier.
pub struct SimulationContext {
    pub config: SimConfig,
    pub registry: PlatformRegistry,
    pub generator: WorldGenerator,
    pub pickups: PickupSet,
    pub player: PlayerState,
    pub tracker: ClimbTracker,
    pub achievements: AchievementBank,
    pub frontier: GenerationFrontier,
    pub paused: bool,
}

impl SimulationContext {
    pub fn new(config: SimConfig) -> Self {
        let spawn = Vec3::from_array(config.spawn);
        let mut registry = PlatformRegistry::new();
        let floor_id = registry.allocate_id();
        registry.insert(Platform::from_center(
            floor_id,
            0.0,
            0.0,
            ORIGIN_FLOOR_HALF,
            ORIGIN_FLOOR_HALF,
            0.0,
            PlatformKind::Static,
        ));

        let generator = WorldGenerator::new(WorldSeed { seed: config.seed }, config.tuning.clone());

        Self {
            registry,
            generator,
            pickups: PickupSet::new(),
            player: PlayerState::at_spawn(spawn),
            tracker: ClimbTracker::new(spawn),
            achievements: AchievementBank::new(),
            frontier: GenerationFrontier::default(),
            paused: false,
            config,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::capture(&self.tracker)
    }

    /// Advance the simulation by `dt` seconds, returning the events this
    /// tick produced
    pub fn tick(
        &mut self,
        dt: f32,
        input: &InputState,
        frame: &dyn MovementFrame,
        catalog: &mut dyn ModelCatalog,
        sink: &mut dyn SceneSink,
    ) -> Vec<GameEvent> {
        let mut events = Vec::new();

        if input.pause_pressed {
            self.paused = !self.paused;
            events.push(if self.paused {
                GameEvent::Paused
            } else {
                GameEvent::Resumed
            });
        }
        if self.paused {
            return events;
        }

        self.tracker.tick_clock(dt);

        let modifiers = self
            .tracker
            .modifiers(self.config.ruleset.sprint_needs_stamina());
        let sprinting = physics::is_sprinting(input, &modifiers);
        self.tracker.update_stamina(dt, sprinting);

        // Jump edge consults the previous tick's grounded state
        if input.jump_pressed {
            let _ = physics::try_jump(&mut self.player, modifiers.double_jump_available);
        }

        self.registry.advance_moving(dt);
        let was_grounded = self.player.grounded;
        physics::integrate(&mut self.player, input, frame, &modifiers, dt);
        if let Some(landing) =
            physics::resolve_landing(&mut self.player, &self.registry, self.config.ruleset)
        {
            // Support while already grounded is not a new landing
            if landing.bounced || !was_grounded {
                events.push(GameEvent::Landed {
                    platform: landing.platform,
                    bounced: landing.bounced,
                });
            }
        }
        physics::apply_friction(&mut self.player);

        self.tracker.update_height(self.player.position.y);

        // Generation ahead of the climb, then pruning behind it
        if self.tracker.current_height > self.frontier.highest - self.config.frontier_margin {
            let start = self.frontier.highest;
            let end = start + self.config.band_height;
            let report = self.generator.generate(
                start,
                end,
                &mut self.registry,
                &mut self.pickups,
                catalog,
                &mut self.frontier,
            );
            self.tracker.coins_spawned += report.coins;
            for id in &report.platforms {
                sink.add_volume(VolumeHandle::Platform(*id));
            }
            for id in &report.pickups {
                sink.add_volume(VolumeHandle::Pickup(*id));
            }
            for id in &report.checkpoints {
                sink.add_volume(VolumeHandle::Checkpoint(*id));
            }
            events.push(GameEvent::BandGenerated {
                start,
                end,
                platforms: report.platforms.len(),
            });
        }

        let removed = self.registry.prune(self.tracker.current_height);
        if !removed.is_empty() {
            for platform in &removed {
                sink.remove_volume(VolumeHandle::Platform(platform.id));
            }
            events.push(GameEvent::PlatformsPruned {
                count: removed.len(),
            });
        }

        for contact in self
            .pickups
            .contacts(self.player.position, self.tracker.current_height)
        {
            match contact {
                Contact::Coin(pickup) => {
                    self.tracker.collect_coin();
                    events.push(GameEvent::CoinCollected {
                        pickup,
                        total: self.tracker.coins_collected,
                    });
                }
                Contact::PowerUp(pickup, kind) => {
                    self.tracker.activate_power_up(kind);
                    events.push(GameEvent::PowerUpCollected { pickup, kind });
                }
                Contact::Checkpoint(checkpoint, position) => {
                    self.tracker.set_respawn(position);
                    events.push(GameEvent::CheckpointActivated {
                        checkpoint,
                        height: position.y - PLAYER_HEIGHT,
                    });
                }
            }
        }
        let swept = self
            .pickups
            .sweep(self.tracker.current_height - PRUNE_DISTANCE);
        for pickup in swept.pickups {
            sink.remove_volume(VolumeHandle::Pickup(pickup));
        }
        for checkpoint in swept.checkpoints {
            sink.remove_volume(VolumeHandle::Checkpoint(checkpoint));
        }

        if let Some(kind) = self.tracker.tick_power_up(dt) {
            events.push(GameEvent::PowerUpExpired { kind });
        }

        for achievement in self
            .achievements
            .check(self.tracker.max_height, self.tracker.coins_collected)
        {
            tracing::info!(name = achievement.name(), "achievement unlocked");
            events.push(GameEvent::AchievementUnlocked { achievement });
        }

        if input.respawn_pressed {
            self.player.respawn_at(self.tracker.respawn_point);
            events.push(GameEvent::Respawned);
        }

        events
    }
}
