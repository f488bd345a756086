//! Battle module - rows, battlers, target selection, and turn flow.

mod components;
mod plugin;
mod spawning;
mod systems;
pub mod targeting;

pub use components::*;
pub use plugin::BattlePlugin;
pub use systems::BattleSet;
pub use targeting::{SelectionRule, TargetFilter, WeaponRangeRule};
