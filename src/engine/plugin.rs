//! Bevy integration layer.
//!
//! Hosts the simulation context as a resource, polls keyboard intents once
//! per frame and re-emits core events as bevy events for whatever
//! presentation systems the app adds on top.

use bevy::prelude::*;

use crate::events::GameEvent;
use crate::generation::catalog::StaticCatalog;
use crate::physics::{InputState, YawFrame};
use crate::scene::NullSink;

use super::{SimConfig, SimulationContext};

pub struct AscentCorePlugin;

impl Plugin for AscentCorePlugin {
    fn build(&self, app: &mut App) {
        crate::logging::init_tracing_default();
        app.insert_resource(Simulation::new(SimConfig::default()))
            .insert_resource(InputState::default())
            .add_event::<GameEvent>()
            .add_systems(Update, (poll_keyboard, run_simulation).chain());
    }
}

/// The simulation plus the collaborators the demo app wires in
#[derive(Resource)]
pub struct Simulation {
    pub ctx: SimulationContext,
    pub catalog: StaticCatalog,
    pub frame: YawFrame,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Self {
        Self {
            ctx: SimulationContext::new(config),
            catalog: StaticCatalog::sample(),
            frame: YawFrame::default(),
        }
    }
}

fn poll_keyboard(keys: Res<ButtonInput<KeyCode>>, mut input: ResMut<InputState>) {
    input.forward = keys.pressed(KeyCode::KeyW);
    input.backward = keys.pressed(KeyCode::KeyS);
    input.left = keys.pressed(KeyCode::KeyA);
    input.right = keys.pressed(KeyCode::KeyD);
    input.sprint = keys.pressed(KeyCode::ShiftLeft);
    input.jump_pressed = keys.just_pressed(KeyCode::Space);
    input.respawn_pressed = keys.just_pressed(KeyCode::KeyR);
    input.pause_pressed = keys.just_pressed(KeyCode::Escape);
}

fn run_simulation(
    time: Res<Time>,
    mut simulation: ResMut<Simulation>,
    input: Res<InputState>,
    mut writer: EventWriter<GameEvent>,
) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }
    let Simulation {
        ctx,
        catalog,
        frame,
    } = &mut *simulation;
    let mut sink = NullSink;
    for event in ctx.tick(dt, &input, frame, catalog, &mut sink) {
        debug!(?event, "core event");
        writer.send(event);
    }
}
