//! Climb state tracker.
//!
//! Height/time/score bookkeeping plus the stamina and power-up state
//! machines whose modifiers feed back into the resolver. Elapsed time is an
//! accumulated-duration counter advanced only while unpaused, so resuming
//! from pause never produces a time jump.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_STAMINA, PLAYER_HEIGHT, STAMINA_DRAIN, STAMINA_REGEN};

/// Gameplay modifier granted by a power-up pickup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// One airborne jump charge per airborne cycle
    DoubleJump,
    /// Multiplies horizontal acceleration
    SpeedBoost,
    /// Scales gravity down
    LowGravity,
}

impl PowerUpKind {
    /// Seconds the modifier stays active after pickup
    pub fn duration_secs(&self) -> f32 {
        match self {
            Self::DoubleJump => 15.0,
            Self::SpeedBoost => 10.0,
            Self::LowGravity => 10.0,
        }
    }

    pub fn all() -> [PowerUpKind; 3] {
        [Self::DoubleJump, Self::SpeedBoost, Self::LowGravity]
    }
}

/// Currently running power-up and its countdown
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivePowerUp {
    pub kind: PowerUpKind,
    pub remaining_secs: f32,
}

/// Modifier bundle the resolver consumes each tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickModifiers {
    pub speed_mult: f32,
    pub gravity_mult: f32,
    pub double_jump_available: bool,
    pub sprint_allowed: bool,
}

/// Height/time/score bookkeeping for one climb session
#[derive(Debug, Clone)]
pub struct ClimbTracker {
    pub current_height: f32,
    pub max_height: f32,
    pub elapsed_secs: f32,
    pub coins_collected: u32,
    pub coins_spawned: u32,
    pub stamina: f32,
    pub active_power_up: Option<ActivePowerUp>,
    pub respawn_point: Vec3,
}

impl ClimbTracker {
    pub fn new(spawn: Vec3) -> Self {
        Self {
            current_height: 0.0,
            max_height: 0.0,
            elapsed_secs: 0.0,
            coins_collected: 0,
            coins_spawned: 0,
            stamina: MAX_STAMINA,
            active_power_up: None,
            respawn_point: spawn,
        }
    }

    /// Advance the session clock. Callers skip this while paused.
    pub fn tick_clock(&mut self, dt: f32) {
        self.elapsed_secs += dt;
    }

    /// Recompute current/max height from the player's eye Y
    pub fn update_height(&mut self, player_y: f32) {
        self.current_height = (player_y - PLAYER_HEIGHT).max(0.0);
        if self.current_height > self.max_height {
            self.max_height = self.current_height;
        }
    }

    /// Drain while sprinting, regenerate otherwise, clamp to [0, max]
    pub fn update_stamina(&mut self, dt: f32, sprinting: bool) {
        let rate = if sprinting {
            -STAMINA_DRAIN
        } else {
            STAMINA_REGEN
        };
        self.stamina = (self.stamina + rate * dt).clamp(0.0, MAX_STAMINA);
    }

    pub fn collect_coin(&mut self) {
        self.coins_collected += 1;
    }

    /// Picking up a new power-up replaces any running one
    pub fn activate_power_up(&mut self, kind: PowerUpKind) {
        self.active_power_up = Some(ActivePowerUp {
            kind,
            remaining_secs: kind.duration_secs(),
        });
    }

    /// Count down the active power-up; returns the kind that just expired,
    /// whose effect is revoked by dropping it from the modifier bundle
    pub fn tick_power_up(&mut self, dt: f32) -> Option<PowerUpKind> {
        let active = self.active_power_up.as_mut()?;
        active.remaining_secs -= dt;
        if active.remaining_secs <= 0.0 {
            let kind = active.kind;
            self.active_power_up = None;
            Some(kind)
        } else {
            None
        }
    }

    fn power_up_is(&self, kind: PowerUpKind) -> bool {
        self.active_power_up.map(|a| a.kind) == Some(kind)
    }

    /// Modifier bundle for the current tick. `needs_stamina` is true under
    /// the extended ruleset, where sprint requires a non-empty pool.
    pub fn modifiers(&self, needs_stamina: bool) -> TickModifiers {
        TickModifiers {
            speed_mult: if self.power_up_is(PowerUpKind::SpeedBoost) {
                1.5
            } else {
                1.0
            },
            gravity_mult: if self.power_up_is(PowerUpKind::LowGravity) {
                0.5
            } else {
                1.0
            },
            double_jump_available: self.power_up_is(PowerUpKind::DoubleJump),
            sprint_allowed: !needs_stamina || self.stamina > 0.0,
        }
    }

    pub fn set_respawn(&mut self, point: Vec3) {
        self.respawn_point = point;
    }
}

/// Serializable session summary (UI / end screen)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub current_height: f32,
    pub max_height: f32,
    pub elapsed_secs: f32,
    pub coins_collected: u32,
    pub coins_spawned: u32,
    pub stamina: f32,
    pub active_power_up: Option<ActivePowerUp>,
}

impl SessionSnapshot {
    pub fn capture(tracker: &ClimbTracker) -> Self {
        Self {
            current_height: tracker.current_height,
            max_height: tracker.max_height,
            elapsed_secs: tracker.elapsed_secs,
            coins_collected: tracker.coins_collected,
            coins_spawned: tracker.coins_spawned,
            stamina: tracker.stamina,
            active_power_up: tracker.active_power_up,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> ClimbTracker {
        ClimbTracker::new(Vec3::new(0.0, PLAYER_HEIGHT, 0.0))
    }

    #[test]
    fn test_height_is_clamped_and_max_is_running() {
        let mut t = tracker();
        t.update_height(0.5); // feet below zero
        assert_eq!(t.current_height, 0.0);
        t.update_height(50.0 + PLAYER_HEIGHT);
        assert!((t.current_height - 50.0).abs() < 1e-4);
        t.update_height(20.0 + PLAYER_HEIGHT);
        assert!((t.current_height - 20.0).abs() < 1e-4);
        assert!((t.max_height - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_stamina_drains_and_regenerates_clamped() {
        let mut t = tracker();
        t.update_stamina(2.0, true);
        assert!((t.stamina - (MAX_STAMINA - 2.0 * STAMINA_DRAIN)).abs() < 1e-3);
        t.update_stamina(100.0, false);
        assert_eq!(t.stamina, MAX_STAMINA);
        t.update_stamina(100.0, true);
        assert_eq!(t.stamina, 0.0);
    }

    #[test]
    fn test_power_up_expires_and_revokes_effect() {
        let mut t = tracker();
        t.activate_power_up(PowerUpKind::SpeedBoost);
        assert!((t.modifiers(false).speed_mult - 1.5).abs() < f32::EPSILON);

        assert_eq!(t.tick_power_up(5.0), None);
        let expired = t.tick_power_up(6.0);
        assert_eq!(expired, Some(PowerUpKind::SpeedBoost));
        assert!((t.modifiers(false).speed_mult - 1.0).abs() < f32::EPSILON);
        assert_eq!(t.tick_power_up(1.0), None);
    }

    #[test]
    fn test_double_jump_charge_requires_power_up() {
        let mut t = tracker();
        assert!(!t.modifiers(false).double_jump_available);
        t.activate_power_up(PowerUpKind::DoubleJump);
        assert!(t.modifiers(false).double_jump_available);
    }

    #[test]
    fn test_sprint_gating_by_ruleset() {
        let mut t = tracker();
        t.stamina = 0.0;
        assert!(t.modifiers(false).sprint_allowed, "basic ruleset ignores stamina");
        assert!(!t.modifiers(true).sprint_allowed, "extended ruleset requires stamina");
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let mut t = tracker();
        t.update_height(30.0 + PLAYER_HEIGHT);
        t.collect_coin();
        let json = SessionSnapshot::capture(&t).to_json();
        let back: SessionSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.coins_collected, 1);
        assert!((back.current_height - 30.0).abs() < 1e-4);
    }
}
