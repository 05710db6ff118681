//! Velocity-integration movement and landing resolution.
//!
//! Grounded is derived, not stored independently: it is true iff the
//! previous tick's resolution found support. There is no continuous
//! collision detection, so a fast enough fall can tunnel through a thin
//! platform, which is a documented limitation of the movement model.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::{
    BOUNCE_IMPULSE, DOUBLE_JUMP_VELOCITY, FRICTION, GRAVITY, JUMP_VELOCITY, PLAYER_HEIGHT,
    PLAYER_RADIUS, SPRINT_SPEED, WALK_SPEED,
};
use crate::registry::{PlatformId, PlatformRegistry};
use crate::tracker::TickModifiers;

/// Boolean input intents, polled once per tick from the input collaborator
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub sprint: bool,
    /// Edge-triggered: true only on the tick the key went down
    pub jump_pressed: bool,
    pub respawn_pressed: bool,
    pub pause_pressed: bool,
}

impl InputState {
    /// Normalized movement intent in the camera frame: x is rightward,
    /// y is forward
    pub fn direction(&self) -> Vec2 {
        let dir = Vec2::new(
            (self.right as i32 - self.left as i32) as f32,
            (self.forward as i32 - self.backward as i32) as f32,
        );
        dir.normalize_or_zero()
    }
}

/// The tolerance/stamina ruleset variant in force
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RuleSet {
    /// Tight landing band, sprint ungated
    Basic,
    /// Wider landing band, sprint consumes stamina
    #[default]
    Extended,
}

impl RuleSet {
    /// Half-width of the foot-to-surface band that counts as a landing
    pub fn land_tolerance(&self) -> f32 {
        match self {
            Self::Basic => 0.5,
            Self::Extended => 1.0,
        }
    }

    pub fn sprint_needs_stamina(&self) -> bool {
        matches!(self, Self::Extended)
    }
}

/// Camera-relative movement primitive. The core owns velocity and feeds
/// camera-frame components through this seam to get world displacement.
pub trait MovementFrame {
    /// Horizontal world-space forward direction (unit length)
    fn forward(&self) -> Vec3;
    /// Horizontal world-space right direction (unit length)
    fn right(&self) -> Vec3;
}

/// World axes frame: forward is -Z, right is +X. Used headless and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct AxisFrame;

impl MovementFrame for AxisFrame {
    fn forward(&self) -> Vec3 {
        Vec3::NEG_Z
    }

    fn right(&self) -> Vec3 {
        Vec3::X
    }
}

/// Frame derived from a camera yaw angle (radians, 0 faces -Z)
#[derive(Debug, Clone, Copy, Default)]
pub struct YawFrame {
    pub yaw: f32,
}

impl MovementFrame for YawFrame {
    fn forward(&self) -> Vec3 {
        Vec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    fn right(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, -self.yaw.sin())
    }
}

/// Player kinematic state. Exactly one instance, mutated once per tick.
/// Velocity x/z are camera-frame components (rightward/forward).
#[derive(Debug, Clone, Copy)]
pub struct PlayerState {
    pub position: Vec3,
    pub velocity: Vec3,
    pub grounded: bool,
    pub double_jump_used: bool,
}

impl PlayerState {
    pub fn at_spawn(spawn: Vec3) -> Self {
        Self {
            position: spawn,
            velocity: Vec3::ZERO,
            grounded: false,
            double_jump_used: false,
        }
    }

    /// Foot height, the value compared against platform tops
    pub fn foot_y(&self) -> f32 {
        self.position.y - PLAYER_HEIGHT
    }

    /// Teleport to a respawn point with all motion cleared
    pub fn respawn_at(&mut self, point: Vec3) {
        self.position = point;
        self.velocity = Vec3::ZERO;
        self.grounded = false;
        self.double_jump_used = false;
    }
}

/// True when this tick's input sustains a sprint
pub fn is_sprinting(input: &InputState, modifiers: &TickModifiers) -> bool {
    input.forward && input.sprint && modifiers.sprint_allowed
}

/// Gravity, input acceleration and displacement for one tick.
/// Collision and friction follow in [`resolve_landing`] / [`apply_friction`].
pub fn integrate(
    player: &mut PlayerState,
    input: &InputState,
    frame: &dyn MovementFrame,
    modifiers: &TickModifiers,
    dt: f32,
) {
    player.velocity.y -= GRAVITY * modifiers.gravity_mult * dt;

    let dir = input.direction();
    let speed = if is_sprinting(input, modifiers) {
        SPRINT_SPEED
    } else {
        WALK_SPEED
    } * modifiers.speed_mult;
    player.velocity.x += dir.x * speed * dt;
    player.velocity.z += dir.y * speed * dt;

    let horizontal =
        frame.right() * player.velocity.x * dt + frame.forward() * player.velocity.z * dt;
    player.position += horizontal;
    player.position.y += player.velocity.y * dt;
}

/// What landing resolution found this tick. Bounce state is consumed from
/// this value immediately, never read back from shared state later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Landing {
    pub platform: PlatformId,
    pub bounced: bool,
}

/// Resolve support against the registry.
///
/// A platform qualifies when the player's column lies within its bounds
/// expanded by the player radius, the foot height is within the ruleset
/// tolerance of `top_y`, and the player is falling or stationary. The
/// highest qualifying top wins; the player is snapped onto it and never left
/// below a platform it rests on.
pub fn resolve_landing(
    player: &mut PlayerState,
    registry: &PlatformRegistry,
    ruleset: RuleSet,
) -> Option<Landing> {
    if player.velocity.y > 0.0 {
        player.grounded = false;
        return None;
    }

    let tolerance = ruleset.land_tolerance();
    let foot = player.foot_y();
    let support = registry
        .query_candidates(player.position.x, player.position.z, PLAYER_RADIUS)
        .filter(|p| (foot - p.top_y).abs() <= tolerance)
        .max_by(|a, b| a.top_y.total_cmp(&b.top_y));

    match support {
        Some(platform) => {
            player.position.y = platform.top_y + PLAYER_HEIGHT;
            let bounced = platform.kind.is_bounce_pad();
            if bounced {
                player.velocity.y = BOUNCE_IMPULSE;
                player.grounded = false;
            } else {
                player.velocity.y = 0.0;
                player.grounded = true;
            }
            player.double_jump_used = false;
            Some(Landing {
                platform: platform.id,
                bounced,
            })
        }
        None => {
            player.grounded = false;
            None
        }
    }
}

/// Isotropic horizontal damping. Framerate-independent exactness is not
/// guaranteed by the per-tick multiplier; see the movement model notes.
pub fn apply_friction(player: &mut PlayerState) {
    player.velocity.x *= FRICTION;
    player.velocity.z *= FRICTION;
}

/// Which jump an input edge produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    Ground,
    Double,
}

/// Apply a jump impulse on an input edge. Grounded jumps never consume the
/// double-jump charge; one airborne jump is allowed per airborne cycle while
/// the charge is available.
pub fn try_jump(player: &mut PlayerState, double_jump_available: bool) -> Option<JumpKind> {
    if player.grounded {
        player.velocity.y = JUMP_VELOCITY;
        player.grounded = false;
        Some(JumpKind::Ground)
    } else if double_jump_available && !player.double_jump_used {
        player.velocity.y = DOUBLE_JUMP_VELOCITY;
        player.double_jump_used = true;
        Some(JumpKind::Double)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Platform, PlatformKind};

    fn modifiers() -> TickModifiers {
        TickModifiers {
            speed_mult: 1.0,
            gravity_mult: 1.0,
            double_jump_available: false,
            sprint_allowed: true,
        }
    }

    fn registry_with(platforms: Vec<(f32, PlatformKind)>) -> PlatformRegistry {
        let mut registry = PlatformRegistry::new();
        for (top_y, kind) in platforms {
            let id = registry.allocate_id();
            registry.insert(Platform::from_center(id, 0.0, 0.0, 2.0, 2.0, top_y, kind));
        }
        registry
    }

    #[test]
    fn test_landing_snaps_and_zeroes_fall() {
        let registry = registry_with(vec![(2.0, PlatformKind::Static)]);
        let mut player = PlayerState::at_spawn(Vec3::new(0.0, 3.0, 0.0));
        player.velocity.y = -5.0;

        let landing = resolve_landing(&mut player, &registry, RuleSet::Basic).unwrap();
        assert!(!landing.bounced);
        assert_eq!(player.position.y, 2.0 + PLAYER_HEIGHT);
        assert_eq!(player.velocity.y, 0.0);
        assert!(player.grounded);
    }

    #[test]
    fn test_bounce_pad_overwrites_vertical_velocity() {
        let registry = registry_with(vec![(2.0, PlatformKind::BouncePad)]);
        let mut player = PlayerState::at_spawn(Vec3::new(0.0, 3.0, 0.0));
        player.velocity.y = -5.0;

        let landing = resolve_landing(&mut player, &registry, RuleSet::Basic).unwrap();
        assert!(landing.bounced);
        assert_eq!(player.velocity.y, BOUNCE_IMPULSE);
        assert!(!player.grounded, "bouncing is not a grounded state");
    }

    #[test]
    fn test_highest_qualifying_platform_wins() {
        let registry = registry_with(vec![
            (2.0, PlatformKind::Static),
            (2.4, PlatformKind::Static),
        ]);
        let mut player = PlayerState::at_spawn(Vec3::new(0.0, 3.0, 0.0));
        player.velocity.y = -1.0;

        resolve_landing(&mut player, &registry, RuleSet::Extended).unwrap();
        assert_eq!(player.position.y, 2.4 + PLAYER_HEIGHT);
    }

    #[test]
    fn test_no_landing_while_ascending() {
        let registry = registry_with(vec![(2.0, PlatformKind::Static)]);
        let mut player = PlayerState::at_spawn(Vec3::new(0.0, 3.0, 0.0));
        player.velocity.y = 4.0;

        assert!(resolve_landing(&mut player, &registry, RuleSet::Basic).is_none());
        assert!(!player.grounded);
        assert_eq!(player.velocity.y, 4.0);
    }

    #[test]
    fn test_no_support_is_normal_falling() {
        let registry = PlatformRegistry::new();
        let mut player = PlayerState::at_spawn(Vec3::new(0.0, 3.0, 0.0));
        player.velocity.y = -5.0;

        assert!(resolve_landing(&mut player, &registry, RuleSet::Extended).is_none());
        assert!(!player.grounded);
    }

    #[test]
    fn test_tolerance_band_differs_by_ruleset() {
        let registry = registry_with(vec![(2.0, PlatformKind::Static)]);
        // Foot at 2.8: outside the basic band, inside the extended one
        let mut player = PlayerState::at_spawn(Vec3::new(0.0, 3.8, 0.0));
        player.velocity.y = -1.0;
        assert!(resolve_landing(&mut player, &registry, RuleSet::Basic).is_none());

        let mut player = PlayerState::at_spawn(Vec3::new(0.0, 3.8, 0.0));
        player.velocity.y = -1.0;
        assert!(resolve_landing(&mut player, &registry, RuleSet::Extended).is_some());
    }

    #[test]
    fn test_friction_strictly_decreases_horizontal_speed() {
        let mut player = PlayerState::at_spawn(Vec3::ZERO);
        player.velocity = Vec3::new(4.0, 0.0, -3.0);
        let horizontal = |p: &PlayerState| Vec2::new(p.velocity.x, p.velocity.z).length();
        let mut last = horizontal(&player);
        for _ in 0..50 {
            apply_friction(&mut player);
            let mag = horizontal(&player);
            assert!(mag < last);
            last = mag;
        }
        assert!(last < 0.05, "negligible but never exactly zero: {last}");
        assert!(last > 0.0);
    }

    #[test]
    fn test_gravity_and_displacement() {
        let mut player = PlayerState::at_spawn(Vec3::new(0.0, 10.0, 0.0));
        let input = InputState::default();
        integrate(&mut player, &input, &AxisFrame, &modifiers(), 0.1);
        assert!((player.velocity.y + GRAVITY * 0.1).abs() < 1e-4);
        assert!(player.position.y < 10.0);
    }

    #[test]
    fn test_forward_input_moves_along_frame_forward() {
        let mut player = PlayerState::at_spawn(Vec3::ZERO);
        let input = InputState {
            forward: true,
            ..Default::default()
        };
        integrate(&mut player, &input, &AxisFrame, &modifiers(), 0.1);
        assert!(player.position.z < 0.0, "AxisFrame forward is -Z");
        assert_eq!(player.position.x, 0.0);
    }

    #[test]
    fn test_diagonal_input_is_normalized() {
        let input = InputState {
            forward: true,
            right: true,
            ..Default::default()
        };
        assert!((input.direction().length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_sprint_requires_forward_and_modifier() {
        let m = modifiers();
        let sprinting = InputState {
            forward: true,
            sprint: true,
            ..Default::default()
        };
        assert!(is_sprinting(&sprinting, &m));

        let strafing = InputState {
            right: true,
            sprint: true,
            ..Default::default()
        };
        assert!(!is_sprinting(&strafing, &m));

        let mut gated = m;
        gated.sprint_allowed = false;
        assert!(!is_sprinting(&sprinting, &gated));
    }

    #[test]
    fn test_double_jump_consumes_one_charge() {
        let mut player = PlayerState::at_spawn(Vec3::new(0.0, 3.0, 0.0));
        player.grounded = true;

        // Grounded jump consumes no charge
        assert_eq!(try_jump(&mut player, true), Some(JumpKind::Ground));
        assert!(!player.double_jump_used);

        // Airborne jump with an active charge
        assert_eq!(try_jump(&mut player, true), Some(JumpKind::Double));
        assert!(player.double_jump_used);

        // Refused before landing again
        assert_eq!(try_jump(&mut player, true), None);
    }

    #[test]
    fn test_double_jump_refused_without_power_up() {
        let mut player = PlayerState::at_spawn(Vec3::new(0.0, 3.0, 0.0));
        assert_eq!(try_jump(&mut player, false), None);
    }

    #[test]
    fn test_landing_resets_double_jump_charge() {
        let registry = registry_with(vec![(2.0, PlatformKind::Static)]);
        let mut player = PlayerState::at_spawn(Vec3::new(0.0, 3.0, 0.0));
        player.double_jump_used = true;
        player.velocity.y = -5.0;

        resolve_landing(&mut player, &registry, RuleSet::Basic).unwrap();
        assert!(!player.double_jump_used);
    }

    #[test]
    fn test_yaw_frame_quarter_turn() {
        let frame = YawFrame {
            yaw: std::f32::consts::FRAC_PI_2,
        };
        // Facing 90 degrees left of -Z is -X
        assert!((frame.forward() - Vec3::NEG_X).length() < 1e-6);
        assert!((frame.right() - Vec3::NEG_Z).length() < 1e-6);
    }
}
