//! Centralized tuning constants for the ascent procedural core.
//!
//! Eliminates magic numbers duplicated across the resolver, generator and
//! engine tick. Per-module tables (achievement thresholds, power-up
//! durations) remain in their respective modules as the single source of
//! truth.

// =====================================================
// Player kinematics
// =====================================================

/// Downward acceleration applied every airborne tick (units/s^2)
pub const GRAVITY: f32 = 30.0;

/// Horizontal walk acceleration accumulated into velocity (units/s^2)
pub const WALK_SPEED: f32 = 80.0;

/// Horizontal sprint acceleration
pub const SPRINT_SPEED: f32 = 140.0;

/// Upward impulse for a grounded jump (units/s)
pub const JUMP_VELOCITY: f32 = 12.0;

/// Upward impulse for an airborne double jump
pub const DOUBLE_JUMP_VELOCITY: f32 = 10.0;

/// Upward impulse imparted by a bounce pad on landing
pub const BOUNCE_IMPULSE: f32 = 25.0;

/// Eye height above the player's feet; landing snaps to top_y + PLAYER_HEIGHT
pub const PLAYER_HEIGHT: f32 = 1.0;

/// Horizontal collision radius; platform bounds are expanded by this amount
pub const PLAYER_RADIUS: f32 = 0.5;

/// Per-tick isotropic damping applied to horizontal velocity
pub const FRICTION: f32 = 0.9;

// =====================================================
// World streaming
// =====================================================

/// Platforms more than this far below the player are pruned
pub const PRUNE_DISTANCE: f32 = 200.0;

/// Platforms below this height are never pruned (origin floor and walls)
pub const ORIGIN_KEEP_HEIGHT: f32 = 5.0;

/// Generation triggers once the player climbs within this margin of the frontier
pub const FRONTIER_MARGIN: f32 = 100.0;

/// Vertical extent of one generation band
pub const BAND_HEIGHT: f32 = 150.0;

// =====================================================
// Generation defaults (see GeneratorTuning for overrides)
// =====================================================

/// Height cursor advance per step, lower bound (inclusive)
pub const STEP_MIN: f32 = 2.0;

/// Height cursor advance per step, upper bound (exclusive)
pub const STEP_MAX: f32 = 4.0;

/// Chance of a stepping stone accompanying a main platform
pub const STEPPING_STONE_PROB: f64 = 0.8;

/// Chance of a power-up marker per generation step
pub const POWER_UP_PROB: f64 = 0.05;

/// Model-backed platform probability at the bottom of the ramp
pub const MODEL_PROB_LOW: f64 = 0.20;

/// Model-backed platform probability above the top of the ramp
pub const MODEL_PROB_HIGH: f64 = 0.45;

/// Height where the model probability ramp begins
pub const MODEL_RAMP_START: f32 = 50.0;

/// Height where the model probability ramp saturates
pub const MODEL_RAMP_END: f32 = 150.0;

/// Chance of an oscillating platform per step
pub const MOVING_PROB: f64 = 0.15;

/// Chance of a bounce pad per step
pub const BOUNCE_PROB: f64 = 0.10;

/// Coin probability at height zero
pub const COIN_PROB_BASE: f64 = 0.30;

/// Coin probability ceiling at high bands
pub const COIN_PROB_MAX: f64 = 0.60;

/// A checkpoint torus is emitted every this many units of height
pub const CHECKPOINT_INTERVAL: f32 = 50.0;

/// Horizontal clamp for generated platform centers
pub const PLAY_RADIUS: f32 = 30.0;

// =====================================================
// Pickups & stamina
// =====================================================

/// Distance within which coins and power-ups are collected
pub const PICKUP_RANGE: f32 = 2.0;

/// Distance within which a checkpoint activates
pub const CHECKPOINT_RANGE: f32 = 3.0;

/// Stamina pool ceiling
pub const MAX_STAMINA: f32 = 100.0;

/// Stamina drained per second while sprinting
pub const STAMINA_DRAIN: f32 = 25.0;

/// Stamina regenerated per second while not sprinting
pub const STAMINA_REGEN: f32 = 15.0;
