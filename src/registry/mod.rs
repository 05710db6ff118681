//! Platform registry: the mutable set of standable volumes.
//!
//! Platforms are axis-aligned boxes identified by the rectangle of their top
//! face plus a single `top_y` height; landing resolution only ever consults
//! `top_y`. The registry streams: the generator inserts ahead of the player
//! and `prune` drops everything that has fallen far enough below, except the
//! permanent origin area.

use serde::{Deserialize, Serialize};

use crate::constants::{ORIGIN_KEEP_HEIGHT, PRUNE_DISTANCE};

/// Stable handle for a platform, usable by scene sinks after removal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlatformId(pub u64);

/// Which way an oscillating platform travels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OscillationAxis {
    X,
    Z,
}

/// Behavior payload for `PlatformKind::Moving`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingBehavior {
    /// Center of oscillation on the X axis
    pub origin_x: f32,
    /// Center of oscillation on the Z axis
    pub origin_z: f32,
    pub axis: OscillationAxis,
    pub amplitude: f32,
    /// Radians per second fed into the phase accumulator
    pub angular_speed: f32,
    pub phase: f32,
}

/// Platform archetype. One case per kind, so invalid flag combinations
/// (a bouncing moving model) cannot be expressed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlatformKind {
    /// Plain box
    Static,
    /// Small traversal helper placed beside a main platform
    SteppingStone,
    /// Oscillates horizontally around an origin point
    Moving(MovingBehavior),
    /// Imparts a fixed super-jump impulse instead of zeroing fall velocity
    BouncePad,
    /// Volume backed by an external model; bounds come from its AABB
    ModelInstance {
        /// Catalog name of the instantiated model
        model: String,
    },
}

impl PlatformKind {
    pub fn is_bounce_pad(&self) -> bool {
        matches!(self, PlatformKind::BouncePad)
    }
}

/// A standable volume. `min_x < max_x` and `min_z < max_z` always hold;
/// `top_y` is the sole vertical reference used for landing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub id: PlatformId,
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
    pub top_y: f32,
    pub kind: PlatformKind,
}

impl Platform {
    /// Box platform from a center point and half extents
    pub fn from_center(
        id: PlatformId,
        x: f32,
        z: f32,
        half_x: f32,
        half_z: f32,
        top_y: f32,
        kind: PlatformKind,
    ) -> Self {
        Self {
            id,
            min_x: x - half_x,
            max_x: x + half_x,
            min_z: z - half_z,
            max_z: z + half_z,
            top_y,
            kind,
        }
    }

    pub fn center_x(&self) -> f32 {
        (self.min_x + self.max_x) * 0.5
    }

    pub fn center_z(&self) -> f32 {
        (self.min_z + self.max_z) * 0.5
    }

    /// True when `(x, z)` lies within the horizontal bounds expanded by
    /// `radius` on all sides
    pub fn contains_column(&self, x: f32, z: f32, radius: f32) -> bool {
        x >= self.min_x - radius
            && x <= self.max_x + radius
            && z >= self.min_z - radius
            && z <= self.max_z + radius
    }

    /// Permanent platforms (origin floor and walls) survive pruning
    pub fn is_permanent(&self) -> bool {
        self.top_y < ORIGIN_KEEP_HEIGHT
    }
}

/// The live platform set. Insertion is O(1); candidate queries are a linear
/// scan, which is the stated baseline at the hundreds-of-entries scale the
/// streaming window keeps live.
#[derive(Debug, Default)]
pub struct PlatformRegistry {
    platforms: Vec<Platform>,
    next_id: u64,
}

impl PlatformRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next platform handle
    pub fn allocate_id(&mut self) -> PlatformId {
        let id = PlatformId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn insert(&mut self, platform: Platform) -> PlatformId {
        debug_assert!(platform.min_x < platform.max_x);
        debug_assert!(platform.min_z < platform.max_z);
        let id = platform.id;
        self.platforms.push(platform);
        id
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    pub fn get(&self, id: PlatformId) -> Option<&Platform> {
        self.platforms.iter().find(|p| p.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Platform> {
        self.platforms.iter()
    }

    /// All platforms whose expanded horizontal bounds overlap the player's
    /// (x, z) column
    pub fn query_candidates(&self, x: f32, z: f32, radius: f32) -> impl Iterator<Item = &Platform> {
        self.platforms
            .iter()
            .filter(move |p| p.contains_column(x, z, radius))
    }

    /// Remove every platform whose top surface has dropped more than
    /// `PRUNE_DISTANCE` below `current_height`, keeping the origin area.
    /// Returns the removed platforms so the caller can release their scene
    /// volumes. Idempotent for a fixed `current_height`.
    pub fn prune(&mut self, current_height: f32) -> Vec<Platform> {
        let cutoff = current_height - PRUNE_DISTANCE;
        let mut removed = Vec::new();
        self.platforms.retain(|p| {
            if p.top_y < cutoff && !p.is_permanent() {
                removed.push(p.clone());
                false
            } else {
                true
            }
        });
        if !removed.is_empty() {
            tracing::debug!(
                removed = removed.len(),
                live = self.platforms.len(),
                cutoff,
                "pruned platforms below cutoff"
            );
        }
        removed
    }

    /// Advance oscillating platforms by `dt`. Bounds shift along the
    /// oscillation axis around the stored origin; width stays constant.
    pub fn advance_moving(&mut self, dt: f32) {
        for p in &mut self.platforms {
            if let PlatformKind::Moving(behavior) = &mut p.kind {
                behavior.phase += behavior.angular_speed * dt;
                let offset = behavior.amplitude * behavior.phase.sin();
                let half_x = (p.max_x - p.min_x) * 0.5;
                let half_z = (p.max_z - p.min_z) * 0.5;
                match behavior.axis {
                    OscillationAxis::X => {
                        p.min_x = behavior.origin_x - half_x + offset;
                        p.max_x = behavior.origin_x + half_x + offset;
                    }
                    OscillationAxis::Z => {
                        p.min_z = behavior.origin_z - half_z + offset;
                        p.max_z = behavior.origin_z + half_z + offset;
                    }
                }
            }
        }
    }
}
