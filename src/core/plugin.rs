//! Core plugin that sets up game states, events, and the capability set.

use bevy::prelude::*;

use super::capabilities::{load_capabilities, BattleCapabilities};
use super::events::*;
use super::states::GameState;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, InBattle, Victory, Defeat)
/// - Global events (ActionEvent, DamageEvent, state events)
/// - The battle capability set, resolved once at startup
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize game states
            .init_state::<GameState>()

            // Register global events
            .add_event::<ActionEvent>()
            .add_event::<DamageEvent>()
            .add_event::<StateAppliedEvent>()
            .add_event::<StateExpiredEvent>()
            .add_event::<BattlerDefeatedEvent>()

            // Capability set: defaults first, then the config file overrides
            .init_resource::<BattleCapabilities>()
            .add_systems(Startup, load_capabilities)

            // Databases load synchronously at Startup, so the first Loading
            // frame can move straight into the battle
            .add_systems(Update, begin_battle.run_if(in_state(GameState::Loading)));
    }
}

/// Transition from Loading into the battle.
fn begin_battle(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::InBattle);
}
