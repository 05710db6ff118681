//! Ascent - Procedural Core Library
//!
//! Deterministic game logic for a first-person vertical platformer:
//! - Platform registry (streaming AABB volume set with pruning)
//! - Height-banded procedural world generation (seed + band hash model)
//! - Velocity-integration physics with landing resolution
//! - Climb state tracking (height, coins, stamina, power-ups, checkpoints)
//! - Achievement milestones
//! - Simulation orchestration and Bevy plugin glue
//!
//! Rendering, asset loading, audio and UI are external collaborators
//! reached through the seams in `scene` and `generation::catalog`.

pub mod achievements;
pub mod constants;
pub mod engine;
pub mod events;
pub mod generation;
pub mod logging;
pub mod physics;
pub mod pickups;
pub mod registry;
pub mod scene;
pub mod tracker;
