//! Coins, power-up markers and checkpoint tori.
//!
//! Pickups are created at generation time and flagged collected on contact;
//! the scene collaborator owns the visual removal. Checkpoints additionally
//! record the last safe respawn position once activated.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::{CHECKPOINT_RANGE, PICKUP_RANGE, PLAYER_HEIGHT};
use crate::tracker::PowerUpKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PickupId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    Coin,
    PowerUp(PowerUpKind),
}

/// Coin or power-up marker floating above a platform
#[derive(Debug, Clone)]
pub struct Collectible {
    pub id: PickupId,
    pub position: Vec3,
    pub kind: PickupKind,
    pub collected: bool,
}

/// Torus marker at a target height; becomes the respawn point on activation
#[derive(Debug, Clone)]
pub struct Checkpoint {
    pub id: u32,
    pub height: f32,
    pub position: Vec3,
    pub activated: bool,
}

/// What a contact pass found this tick
#[derive(Debug, Clone, PartialEq)]
pub enum Contact {
    Coin(PickupId),
    PowerUp(PickupId, PowerUpKind),
    Checkpoint(u32, Vec3),
}

/// Ids dropped by one sweep pass, so the caller can release their scene
/// volumes
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SweepReport {
    pub pickups: Vec<PickupId>,
    pub checkpoints: Vec<u32>,
}

/// All live pickups and checkpoints for the session
#[derive(Debug, Default)]
pub struct PickupSet {
    pub collectibles: Vec<Collectible>,
    pub checkpoints: Vec<Checkpoint>,
    next_id: u64,
    next_checkpoint_id: u32,
}

impl PickupSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn_collectible(&mut self, position: Vec3, kind: PickupKind) -> PickupId {
        let id = PickupId(self.next_id);
        self.next_id += 1;
        self.collectibles.push(Collectible {
            id,
            position,
            kind,
            collected: false,
        });
        id
    }

    pub fn spawn_checkpoint(&mut self, position: Vec3, height: f32) -> u32 {
        let id = self.next_checkpoint_id;
        self.next_checkpoint_id += 1;
        self.checkpoints.push(Checkpoint {
            id,
            height,
            position,
            activated: false,
        });
        id
    }

    pub fn live_collectibles(&self) -> usize {
        self.collectibles.iter().filter(|c| !c.collected).count()
    }

    /// Flag every un-collected pickup within range of the player and every
    /// reachable un-activated checkpoint, returning the contacts in order.
    /// Checkpoints require the player to have actually reached their height.
    pub fn contacts(&mut self, player_pos: Vec3, current_height: f32) -> Vec<Contact> {
        let mut found = Vec::new();

        for c in &mut self.collectibles {
            if c.collected {
                continue;
            }
            if c.position.distance(player_pos) <= PICKUP_RANGE {
                c.collected = true;
                found.push(match c.kind {
                    PickupKind::Coin => Contact::Coin(c.id),
                    PickupKind::PowerUp(kind) => Contact::PowerUp(c.id, kind),
                });
            }
        }

        for cp in &mut self.checkpoints {
            if cp.activated || current_height < cp.height - PLAYER_HEIGHT {
                continue;
            }
            if cp.position.distance(player_pos) <= CHECKPOINT_RANGE {
                cp.activated = true;
                found.push(Contact::Checkpoint(cp.id, cp.position));
            }
        }

        found
    }

    /// Drop collected pickups and checkpoints far below the prune cutoff,
    /// reporting every removed id. Activated checkpoints are kept; the last
    /// one is the respawn anchor.
    pub fn sweep(&mut self, cutoff: f32) -> SweepReport {
        let mut report = SweepReport::default();
        self.collectibles.retain(|c| {
            if c.collected || c.position.y < cutoff {
                report.pickups.push(c.id);
                false
            } else {
                true
            }
        });
        self.checkpoints.retain(|cp| {
            if cp.activated || cp.position.y >= cutoff {
                true
            } else {
                report.checkpoints.push(cp.id);
                false
            }
        });
        report
    }
}
