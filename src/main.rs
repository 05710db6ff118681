use anyhow::Result;
use bevy::prelude::*;

use ascent_core::engine::plugin::AscentCorePlugin;

fn main() -> Result<()> {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Ascent - Procedural Core".into(),
                resolution: (1280., 720.).into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(AscentCorePlugin)
        .run();
    Ok(())
}
