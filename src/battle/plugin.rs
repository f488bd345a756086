//! Battle plugin - turn flow, targeting rules, and the demo battle.

use bevy::prelude::*;

use crate::core::{load_capabilities, BattleCapabilities, GameState};

use super::spawning::{cleanup_battle, setup_battle};
use super::systems::{
    advance_turns, apply_damage, check_battle_end, resolve_actions, tick_turn_states, BattleSet,
    TurnClock, TurnEndedEvent,
};
use super::targeting::{TargetFilter, WeaponRangeRule, WEAPON_RANGE_PRIORITY};

/// Battle plugin - handles rows, turns, and target selection.
pub struct BattlePlugin;

impl Plugin for BattlePlugin {
    fn build(&self, app: &mut App) {
        app
            // Resources
            .init_resource::<TargetFilter>()
            .init_resource::<TurnClock>()

            // Events
            .add_event::<TurnEndedEvent>()

            // Rule registration happens once the capability set is resolved
            .add_systems(Startup, register_selection_rules.after(load_capabilities))

            // Battle lifecycle
            .add_systems(OnEnter(GameState::InBattle), setup_battle)
            .add_systems(OnExit(GameState::InBattle), cleanup_battle)

            // System ordering
            .configure_sets(
                Update,
                (BattleSet::Turn, BattleSet::Resolve, BattleSet::Upkeep)
                    .chain()
                    .run_if(in_state(GameState::InBattle)),
            )
            .add_systems(Update, advance_turns.in_set(BattleSet::Turn))
            .add_systems(
                Update,
                (resolve_actions, apply_damage).chain().in_set(BattleSet::Resolve),
            )
            .add_systems(
                Update,
                (tick_turn_states, check_battle_end).in_set(BattleSet::Upkeep),
            );
    }
}

/// Build the selection rule chain from the capability set.
///
/// The weapon range rule only makes sense when rows exist and custom
/// selection is allowed to override the default; without both capabilities
/// targeting stays on the built-in row rule alone.
fn register_selection_rules(caps: Res<BattleCapabilities>, mut filter: ResMut<TargetFilter>) {
    if caps.row_formation && caps.selection_control {
        filter.register(WEAPON_RANGE_PRIORITY, Box::new(WeaponRangeRule));
        info!("Selection rules registered: {} rule(s)", filter.rule_count());
    } else {
        info!("Selection control inactive, default row targeting only");
    }
}
