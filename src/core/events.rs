//! Global events used for cross-system communication.
//!
//! Events allow decoupled systems to communicate. For example, the turn
//! system sends ActionEvents, and the resolution system receives them to
//! apply damage and states. This keeps systems independent and testable.

use bevy::prelude::*;

use crate::data::{SkillId, StateId};

/// Sent when a battler takes its turn and commits to an action.
///
/// The resolution system listens for these and applies damage and any
/// inflicted state to the target.
#[derive(Event)]
pub struct ActionEvent {
    /// Acting battler
    pub user: Entity,
    /// Chosen target (already validated by the target filter)
    pub target: Entity,
    /// Skill being used
    pub skill: SkillId,
}

/// Sent when an entity takes damage.
#[derive(Event)]
pub struct DamageEvent {
    /// Entity receiving damage
    pub target: Entity,
    /// Entity that caused the damage
    pub source: Entity,
    /// Damage amount
    pub amount: i32,
}

/// Sent when a state is newly applied to a battler.
///
/// Systems can listen for this to trigger popups, sounds, etc. The state
/// animation refresh itself keys off `Changed<ActiveStates>` instead.
#[derive(Event)]
pub struct StateAppliedEvent {
    /// Affected battler
    pub battler: Entity,
    /// State that was applied
    pub state: StateId,
}

/// Sent when a state runs out and is removed from a battler.
#[derive(Event)]
pub struct StateExpiredEvent {
    /// Affected battler
    pub battler: Entity,
    /// State that expired
    pub state: StateId,
}

/// Sent when a battler's health reaches zero.
#[derive(Event)]
pub struct BattlerDefeatedEvent {
    /// Entity that was defeated
    pub battler: Entity,
    /// Entity that landed the final blow
    pub defeated_by: Entity,
}
