//! Definition records and their registries.
//!
//! Raw records deserialize from RON; the `#[serde(skip)]` fields are filled
//! by the note-tag pass at load time and never change afterwards.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;

use super::notetags::{RangeBounds, SelectionTag};

pub type WeaponId = u32;
pub type SkillId = u32;
pub type StateId = u32;
pub type AnimationId = u32;

/// Weapon definition loaded from a RON file.
#[derive(Deserialize, Clone, Debug)]
pub struct WeaponDef {
    pub id: WeaponId,
    pub name: String,
    /// Free-text annotation block, scanned for note tags at load time.
    #[serde(default)]
    pub notes: String,

    /// Row bounds derived from the notes. Undeclared means melee.
    #[serde(skip)]
    pub range: RangeBounds,
    /// Selection tags derived from the notes.
    #[serde(skip)]
    pub selection_tags: Vec<SelectionTag>,
}

/// Skill definition loaded from a RON file.
#[derive(Deserialize, Clone, Debug)]
pub struct SkillDef {
    pub id: SkillId,
    pub name: String,
    /// Base damage dealt to the target.
    pub power: i32,
    /// State inflicted on hit, if any.
    #[serde(default)]
    pub inflicts: Option<StateId>,
    /// Free-text annotation block, scanned for note tags at load time.
    #[serde(default)]
    pub notes: String,

    /// Selection tags derived from the notes. A skill tagged `WeaponRange`
    /// restricts its targets by the user's equipped weapon range.
    #[serde(skip)]
    pub selection_tags: Vec<SelectionTag>,
}

impl SkillDef {
    /// Whether targeting must consult the weapon range rule for this skill.
    pub fn is_ranged(&self) -> bool {
        self.selection_tags.contains(&SelectionTag::WeaponRange)
    }
}

fn default_duration() -> u32 {
    3
}

/// Status effect definition loaded from a RON file.
#[derive(Deserialize, Clone, Debug)]
pub struct StateDef {
    pub id: StateId,
    pub name: String,
    /// Animation shown on the battler while the state is active.
    /// States without one are purely mechanical.
    #[serde(default)]
    pub animation_id: Option<AnimationId>,
    /// How many of the owner's turns the state lasts.
    #[serde(default = "default_duration")]
    pub duration: u32,
}

fn default_frames() -> u32 {
    4
}

fn default_frame_rate() -> f32 {
    6.0
}

fn default_size() -> f32 {
    48.0
}

/// Visual effect definition loaded from a RON file.
///
/// Effects are self-contained looping sprites: a tinted quad cycling through
/// `frames` alpha steps at `frame_rate` frames per second.
#[derive(Deserialize, Clone, Debug)]
pub struct AnimationDef {
    pub id: AnimationId,
    pub name: String,
    /// Tint color as (r, g, b) in 0.0..=1.0.
    pub color: (f32, f32, f32),
    #[serde(default = "default_frames")]
    pub frames: u32,
    #[serde(default = "default_frame_rate")]
    pub frame_rate: f32,
    #[serde(default = "default_size")]
    pub size: f32,
}

/// Resource holding all loaded weapon definitions.
#[derive(Resource, Default)]
pub struct WeaponRegistry {
    pub weapons: HashMap<WeaponId, WeaponDef>,
}

impl WeaponRegistry {
    pub fn get(&self, id: WeaponId) -> Option<&WeaponDef> {
        self.weapons.get(&id)
    }
}

/// Resource holding all loaded skill definitions.
#[derive(Resource, Default)]
pub struct SkillRegistry {
    pub skills: HashMap<SkillId, SkillDef>,
}

impl SkillRegistry {
    pub fn get(&self, id: SkillId) -> Option<&SkillDef> {
        self.skills.get(&id)
    }
}

/// Resource holding all loaded state definitions.
#[derive(Resource, Default)]
pub struct StateRegistry {
    pub states: HashMap<StateId, StateDef>,
}

impl StateRegistry {
    pub fn get(&self, id: StateId) -> Option<&StateDef> {
        self.states.get(&id)
    }

    /// Animation implied by a state, if it has one.
    pub fn animation_for(&self, id: StateId) -> Option<AnimationId> {
        self.get(id).and_then(|def| def.animation_id)
    }
}

/// Resource holding all loaded animation definitions.
#[derive(Resource, Default)]
pub struct AnimationRegistry {
    pub animations: HashMap<AnimationId, AnimationDef>,
}

impl AnimationRegistry {
    pub fn get(&self, id: AnimationId) -> Option<&AnimationDef> {
        self.animations.get(&id)
    }
}
