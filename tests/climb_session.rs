//! End-to-end session flows through the public engine surface.

use ascent_core::constants::{BOUNCE_IMPULSE, PLAYER_HEIGHT};
use ascent_core::engine::{SimConfig, SimulationContext};
use ascent_core::events::GameEvent;
use ascent_core::generation::catalog::NullCatalog;
use ascent_core::physics::{AxisFrame, InputState};
use ascent_core::pickups::PickupKind;
use ascent_core::registry::{Platform, PlatformKind};
use ascent_core::scene::NullSink;
use ascent_core::tracker::PowerUpKind;
use bevy::math::Vec3;

const DT: f32 = 1.0 / 60.0;

fn tick(ctx: &mut SimulationContext, input: &InputState) -> Vec<GameEvent> {
    ctx.tick(DT, input, &AxisFrame, &mut NullCatalog, &mut NullSink)
}

fn settle(ctx: &mut SimulationContext) {
    let input = InputState::default();
    for _ in 0..60 {
        tick(ctx, &input);
        if ctx.player.grounded {
            break;
        }
    }
    assert!(ctx.player.grounded, "player failed to settle on the floor");
}

fn jump_input() -> InputState {
    InputState {
        jump_pressed: true,
        ..Default::default()
    }
}

#[test]
fn double_jump_needs_power_up_and_consumes_one_charge() {
    let mut ctx = SimulationContext::new(SimConfig::default());
    settle(&mut ctx);

    // Without the power-up, the airborne press is refused
    tick(&mut ctx, &jump_input());
    assert!(!ctx.player.grounded);
    let vy_before = ctx.player.velocity.y;
    tick(&mut ctx, &jump_input());
    assert!(
        ctx.player.velocity.y < vy_before,
        "second press without a charge must not re-impulse"
    );

    // Land again, grab the double-jump power-up
    settle(&mut ctx);
    ctx.tracker.activate_power_up(PowerUpKind::DoubleJump);

    // Ground jump consumes no charge
    tick(&mut ctx, &jump_input());
    assert!(!ctx.player.double_jump_used);

    // Airborne press consumes exactly one
    tick(&mut ctx, &jump_input());
    assert!(ctx.player.double_jump_used);
    let vy_after_double = ctx.player.velocity.y;
    assert!(vy_after_double > 0.0);

    // Third press before landing is refused
    tick(&mut ctx, &jump_input());
    assert!(ctx.player.velocity.y < vy_after_double);
}

#[test]
fn bounce_pad_fires_super_jump_impulse() {
    let mut ctx = SimulationContext::new(SimConfig::default());
    // Outside the generator's lateral clamp so no generated platform competes
    let id = ctx.registry.allocate_id();
    ctx.registry.insert(Platform::from_center(
        id,
        50.0,
        0.0,
        3.0,
        3.0,
        30.0,
        PlatformKind::BouncePad,
    ));
    ctx.player.position = Vec3::new(50.0, 30.0 + PLAYER_HEIGHT + 0.3, 0.0);
    ctx.player.velocity = Vec3::new(0.0, -4.0, 0.0);

    let events = tick(&mut ctx, &InputState::default());
    let bounced = events
        .iter()
        .find(|e| matches!(e, GameEvent::Landed { bounced: true, .. }));
    assert!(bounced.is_some(), "expected a bounce landing, got {events:?}");
    assert_eq!(ctx.player.velocity.y, BOUNCE_IMPULSE);
    assert!(!ctx.player.grounded);
}

#[test]
fn checkpoint_becomes_respawn_anchor() {
    let mut ctx = SimulationContext::new(SimConfig::default());
    settle(&mut ctx);

    // Simulate having climbed to a checkpoint at height 60
    let anchor = Vec3::new(2.0, 60.0 + PLAYER_HEIGHT, 1.0);
    let cp = ctx.pickups.spawn_checkpoint(anchor, 60.0);
    ctx.player.position = anchor;
    ctx.player.velocity = Vec3::ZERO;

    let events = tick(&mut ctx, &InputState::default());
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::CheckpointActivated { checkpoint, .. } if *checkpoint == cp)));

    // Fall off and respawn: back at the torus, motionless
    ctx.player.position = Vec3::new(25.0, 10.0, 25.0);
    ctx.player.velocity = Vec3::new(5.0, -20.0, 0.0);
    let respawn = InputState {
        respawn_pressed: true,
        ..Default::default()
    };
    let events = tick(&mut ctx, &respawn);
    assert!(events.contains(&GameEvent::Respawned));
    assert_eq!(ctx.player.position, anchor);
    assert_eq!(ctx.player.velocity, Vec3::ZERO);
}

#[test]
fn power_up_pickup_expires_and_revokes() {
    let mut ctx = SimulationContext::new(SimConfig::default());
    settle(&mut ctx);

    ctx.pickups.spawn_collectible(
        ctx.player.position,
        PickupKind::PowerUp(PowerUpKind::SpeedBoost),
    );
    let events = tick(&mut ctx, &InputState::default());
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::PowerUpCollected {
            kind: PowerUpKind::SpeedBoost,
            ..
        }
    )));
    assert!(ctx.tracker.active_power_up.is_some());

    // Run the countdown out
    let input = InputState::default();
    let mut expired = false;
    for _ in 0..(11.0 / DT) as usize {
        if tick(&mut ctx, &input)
            .iter()
            .any(|e| matches!(e, GameEvent::PowerUpExpired { .. }))
        {
            expired = true;
            break;
        }
    }
    assert!(expired);
    assert!(ctx.tracker.active_power_up.is_none());
}

#[test]
fn sprint_drains_stamina_under_extended_rules() {
    let mut ctx = SimulationContext::new(SimConfig::default());
    settle(&mut ctx);

    let sprint = InputState {
        forward: true,
        sprint: true,
        ..Default::default()
    };
    let full = ctx.tracker.stamina;
    for _ in 0..60 {
        tick(&mut ctx, &sprint);
    }
    assert!(ctx.tracker.stamina < full);

    let idle = InputState::default();
    let drained = ctx.tracker.stamina;
    for _ in 0..60 {
        tick(&mut ctx, &idle);
    }
    assert!(ctx.tracker.stamina > drained);
}

#[test]
fn session_clock_and_score_survive_snapshot() {
    let mut ctx = SimulationContext::new(SimConfig::default());
    settle(&mut ctx);
    ctx.pickups
        .spawn_collectible(ctx.player.position, PickupKind::Coin);
    tick(&mut ctx, &InputState::default());

    let json = ctx.snapshot().to_json();
    let snapshot: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(snapshot["coins_collected"], 1);
    assert!(snapshot["elapsed_secs"].as_f64().unwrap() > 0.0);
}
