//! Rowbound - a row-formation battle prototype in Bevy.
//!
//! Party members and enemies stand in discrete rows. Weapons and skills can
//! carry note-tag annotations that restrict which rows they may target, and
//! every status effect with an animation shows on its battler at the same
//! time, stacking as states come and go.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, battle capabilities
//! - **Data**: RON databases, note-tag parsing, definition registries
//! - **Battle**: Rows, battlers, target selection, turn flow
//! - **Vfx**: Per-battler state animation collections

pub mod battle;
pub mod core;
pub mod data;
pub mod vfx;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct RowboundPlugin;

impl Plugin for RowboundPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Databases and note-tag parsing
            .add_plugins(data::DataPlugin)

            // Battle systems
            .add_plugins(battle::BattlePlugin)

            // State animation systems
            .add_plugins(vfx::VfxPlugin);
    }
}
