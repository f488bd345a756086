//! Data plugin - fills the definition registries at startup.

use bevy::prelude::*;

use super::definitions::{AnimationRegistry, SkillRegistry, StateRegistry, WeaponRegistry};
use super::loading::{
    load_animation_definitions, load_skill_definitions, load_state_definitions,
    load_weapon_definitions,
};

/// Data plugin - owns the definition registries.
pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WeaponRegistry>()
            .init_resource::<SkillRegistry>()
            .init_resource::<StateRegistry>()
            .init_resource::<AnimationRegistry>()
            .add_systems(
                Startup,
                (
                    load_weapon_definitions,
                    load_skill_definitions,
                    load_state_definitions,
                    load_animation_definitions,
                ),
            );
    }
}
