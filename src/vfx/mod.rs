//! Vfx module - stacked state animations on battler sprites.
//!
//! Every state with an animation shows on its battler simultaneously. Each
//! battler sprite owns a [`StateAnimationCollection`] mapping animation ids
//! to attached effect entities; the collection is reconciled against the
//! battler's active states whenever they change.

mod collection;
mod components;
mod plugin;
mod systems;

pub use collection::{EffectHost, StateAnimationCollection};
pub use components::StateEffectAnim;
pub use plugin::VfxPlugin;
