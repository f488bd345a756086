//! Demo battle setup - spawns the two formations as colored sprite quads.

use bevy::prelude::*;

use crate::data::{SkillId, StateId, WeaponId};
use crate::vfx::StateAnimationCollection;

use super::components::*;

/// Marker for the battle camera so cleanup can find it.
#[derive(Component)]
pub struct BattleCamera;

/// Horizontal distance from center to a side's front row.
const FRONT_ROW_X: f32 = 180.0;
/// Horizontal spacing between rows.
const ROW_SPACING: f32 = 110.0;

/// World position for a battler standing in a given side and row.
fn battler_position(side: Side, row: u32) -> Vec3 {
    let depth = FRONT_ROW_X + row as f32 * ROW_SPACING;
    let x = match side {
        Side::Party => -depth,
        Side::Troop => depth,
    };
    // Back rows stand slightly higher for a bit of depth
    Vec3::new(x, row as f32 * 24.0 - 24.0, 0.0)
}

struct BattlerSpec {
    name: &'static str,
    side: Side,
    row: u32,
    turn_order: u32,
    health: i32,
    weapons: Vec<WeaponId>,
    skills: Vec<SkillId>,
    /// States already active when the battle starts: (state id, turns).
    initial_states: Vec<(StateId, u32)>,
}

fn spawn_battler(commands: &mut Commands, spec: BattlerSpec) {
    let color = match spec.side {
        Side::Party => Color::srgb(0.35, 0.62, 0.66),
        Side::Troop => Color::srgb(0.66, 0.38, 0.32),
    };

    let mut active = ActiveStates::default();
    for (state_id, turns) in spec.initial_states {
        active.apply(state_id, turns);
    }

    let mut entity = commands.spawn((
        Battler,
        BattlerName(spec.name.to_string()),
        spec.side,
        Row(spec.row),
        TurnOrder(spec.turn_order),
        Health::new(spec.health),
        SkillSet { skills: spec.skills },
        active,
        StateAnimationCollection::default(),
        Sprite::from_color(color, Vec2::new(52.0, 68.0)),
        Transform::from_translation(battler_position(spec.side, spec.row)),
    ));

    // Troop battlers fight with natural skills and carry no equipment
    if !spec.weapons.is_empty() {
        entity.insert(Equipment { weapons: spec.weapons });
    }
}

/// Spawn the camera and both formations when the battle starts.
///
/// The party shows off each targeting flavor: a melee sword, a shortbow
/// bounded at row 3, and a pike that can reach row 1 and nothing else.
pub fn setup_battle(mut commands: Commands) {
    commands.spawn((Camera2d, BattleCamera));

    let roster = [
        BattlerSpec {
            name: "Aldric",
            side: Side::Party,
            row: 0,
            turn_order: 0,
            health: 42,
            weapons: vec![1],
            skills: vec![1],
            initial_states: vec![],
        },
        BattlerSpec {
            name: "Brennan",
            side: Side::Party,
            row: 1,
            turn_order: 2,
            health: 38,
            weapons: vec![3],
            skills: vec![1],
            initial_states: vec![],
        },
        BattlerSpec {
            name: "Wren",
            side: Side::Party,
            row: 2,
            turn_order: 4,
            health: 30,
            // The cursed shortbow: ranged, and its bearer starts hexed
            weapons: vec![2],
            skills: vec![1],
            initial_states: vec![(3, 3), (2, 4)],
        },
        BattlerSpec {
            name: "Bog Rat",
            side: Side::Troop,
            row: 0,
            turn_order: 1,
            health: 26,
            weapons: vec![],
            skills: vec![2, 3],
            initial_states: vec![(1, 3)],
        },
        BattlerSpec {
            name: "Marsh Hag",
            side: Side::Troop,
            row: 1,
            turn_order: 3,
            health: 34,
            weapons: vec![],
            skills: vec![4],
            initial_states: vec![],
        },
        BattlerSpec {
            name: "Mire Wisp",
            side: Side::Troop,
            row: 2,
            turn_order: 5,
            health: 22,
            weapons: vec![],
            skills: vec![2],
            initial_states: vec![],
        },
    ];

    let count = roster.len();
    for spec in roster {
        spawn_battler(&mut commands, spec);
    }

    info!("Battle joined: {} battlers take the field", count);
}

/// Clean up battle entities when leaving the InBattle state.
pub fn cleanup_battle(
    mut commands: Commands,
    battlers: Query<Entity, With<Battler>>,
    camera: Query<Entity, With<BattleCamera>>,
) {
    for entity in battlers.iter() {
        commands.entity(entity).despawn_recursive();
    }
    for entity in camera.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
