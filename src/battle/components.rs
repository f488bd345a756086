//! Battle-related components.

use bevy::prelude::*;

use crate::data::{SkillId, StateId, WeaponId};

/// Marker component for all battle participants.
#[derive(Component)]
pub struct Battler;

/// Which side of the battle a battler fights on.
#[derive(Component, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Side {
    /// Player party, left side of the field.
    Party,
    /// Enemy troop, right side of the field.
    Troop,
}

impl Side {
    pub fn opposing(self) -> Side {
        match self {
            Side::Party => Side::Troop,
            Side::Troop => Side::Party,
        }
    }
}

/// Discrete lane position within a formation. Row 0 is the front.
///
/// Rows are the unit of range measurement: a weapon's min/max range bounds
/// are compared against the target's row index.
#[derive(Component, Clone, Copy, PartialEq, Eq, Debug)]
pub struct Row(pub u32);

/// Equipped weapons, in slot order. Only party members carry equipment;
/// troop battlers attack with natural skills.
#[derive(Component, Clone, Debug, Default)]
pub struct Equipment {
    pub weapons: Vec<WeaponId>,
}

/// Skills a battler can use on its turn, in preference order.
#[derive(Component, Clone, Debug, Default)]
pub struct SkillSet {
    pub skills: Vec<SkillId>,
}

/// One status effect currently active on a battler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateInstance {
    pub state_id: StateId,
    /// Remaining duration in the owner's turns.
    pub turns_left: u32,
}

/// The set of states active on a battler, in application order.
///
/// Mutated through `Mut`, so `Changed<ActiveStates>` drives the state
/// animation refresh.
#[derive(Component, Clone, Debug, Default)]
pub struct ActiveStates {
    pub states: Vec<StateInstance>,
}

impl ActiveStates {
    /// Apply a state. Re-applying an active state refreshes its duration.
    /// Returns true if the state was newly applied.
    pub fn apply(&mut self, state_id: StateId, turns: u32) -> bool {
        if let Some(existing) = self.states.iter_mut().find(|s| s.state_id == state_id) {
            existing.turns_left = turns;
            false
        } else {
            self.states.push(StateInstance { state_id, turns_left: turns });
            true
        }
    }

    /// Count down every state by one turn, removing and returning the ones
    /// that ran out.
    pub fn tick(&mut self) -> Vec<StateId> {
        let mut expired = Vec::new();
        self.states.retain_mut(|s| {
            s.turns_left = s.turns_left.saturating_sub(1);
            if s.turns_left == 0 {
                expired.push(s.state_id);
                false
            } else {
                true
            }
        });
        expired
    }

    /// Ids of the active states, in application order.
    pub fn ids(&self) -> impl Iterator<Item = StateId> + '_ {
        self.states.iter().map(|s| s.state_id)
    }
}

/// Component for entities that can take damage.
#[derive(Component, Clone, Debug)]
pub struct Health {
    pub current: i32,
    pub maximum: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self {
            current: max,
            maximum: max,
        }
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.current = (self.current - amount).max(0);
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }
}

/// Display name, used in battle log output.
#[derive(Component, Clone, Debug)]
pub struct BattlerName(pub String);

/// Position in the acting order. Lower acts earlier in the round.
#[derive(Component, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct TurnOrder(pub u32);
