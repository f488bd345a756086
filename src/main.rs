//! Rowbound - Entry Point
//!
//! A row-formation battle prototype. The battle runs itself: battlers act in
//! turn order, ranged weapons respect their row bounds, and status effects
//! stack their animations on the affected battler.

use bevy::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Rowbound".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))

        // Our game plugin
        .add_plugins(rowbound::RowboundPlugin)

        .run();
}
