//! Vfx plugin - state animation reconciliation and playback.

use bevy::prelude::*;

use crate::battle::BattleSet;
use crate::core::{visual_state_fx_enabled, GameState};

use super::systems::{advance_state_effects, refresh_state_animations};

/// Vfx plugin - keeps state animations mirroring active states.
///
/// Inert unless the `visual_state_fx` capability is on: without it the
/// collections stay empty and nothing is ever attached.
pub struct VfxPlugin;

impl Plugin for VfxPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (refresh_state_animations, advance_state_effects)
                .chain()
                .after(BattleSet::Upkeep)
                .run_if(in_state(GameState::InBattle))
                .run_if(visual_state_fx_enabled),
        );
    }
}
