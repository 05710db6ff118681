//! Core event stream.
//!
//! Everything the excluded presentation layers (UI, audio, particles) need
//! to react to is emitted as a `GameEvent` and drained once per tick. The
//! core never calls back into those layers directly.

use bevy::prelude::*;

use crate::achievements::Achievement;
use crate::pickups::PickupId;
use crate::registry::PlatformId;
use crate::tracker::PowerUpKind;

/// One observable state change produced by a simulation tick
#[derive(Event, Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// The resolver found support this tick
    Landed {
        platform: PlatformId,
        /// True when the support was a bounce pad and the super-jump
        /// impulse was applied instead of a ground snap
        bounced: bool,
    },
    CoinCollected {
        pickup: PickupId,
        total: u32,
    },
    PowerUpCollected {
        pickup: PickupId,
        kind: PowerUpKind,
    },
    PowerUpExpired {
        kind: PowerUpKind,
    },
    CheckpointActivated {
        checkpoint: u32,
        height: f32,
    },
    AchievementUnlocked {
        achievement: Achievement,
    },
    Respawned,
    Paused,
    Resumed,
    BandGenerated {
        start: f32,
        end: f32,
        platforms: usize,
    },
    PlatformsPruned {
        count: usize,
    },
}
