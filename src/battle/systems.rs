//! Turn flow systems - acting order, target choice, resolution, battle end.

use bevy::prelude::*;
use rand::Rng;

use crate::core::{
    ActionEvent, BattleCapabilities, BattlerDefeatedEvent, DamageEvent, GameState,
    StateAppliedEvent, StateExpiredEvent,
};
use crate::data::{SkillRegistry, StateRegistry, WeaponRegistry};

use super::components::*;
use super::targeting::{BattlerView, TargetFilter, TargetingContext};

/// System set ordering for the battle loop.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum BattleSet {
    /// A battler takes its turn and commits to an action.
    Turn,
    /// Actions are resolved into damage and states.
    Resolve,
    /// End-of-turn bookkeeping: state durations, battle end.
    Upkeep,
}

/// Seconds between battler turns.
const TURN_INTERVAL: f32 = 1.2;

/// Drives the round-robin acting order.
#[derive(Resource)]
pub struct TurnClock {
    pub timer: Timer,
    pub cursor: u32,
}

impl Default for TurnClock {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(TURN_INTERVAL, TimerMode::Repeating),
            cursor: 0,
        }
    }
}

/// Sent when a battler's turn ends, whether or not it found a target.
/// State durations tick on the owner's turn end.
#[derive(Event)]
pub struct TurnEndedEvent {
    pub battler: Entity,
}

/// Let the next battler in the acting order take its turn.
///
/// The acting battler picks a skill, the target filter narrows the opposing
/// side down to the valid targets, and one of them is chosen at random.
pub fn advance_turns(
    time: Res<Time>,
    mut clock: ResMut<TurnClock>,
    battlers: Query<
        (
            Entity,
            &Side,
            &Row,
            &TurnOrder,
            &SkillSet,
            Option<&Equipment>,
            &BattlerName,
        ),
        With<Battler>,
    >,
    filter: Res<TargetFilter>,
    caps: Res<BattleCapabilities>,
    weapons: Res<WeaponRegistry>,
    skills: Res<SkillRegistry>,
    mut actions: EventWriter<ActionEvent>,
    mut turn_ends: EventWriter<TurnEndedEvent>,
) {
    clock.timer.tick(time.delta());
    if !clock.timer.just_finished() {
        return;
    }

    let mut order: Vec<_> = battlers.iter().collect();
    if order.is_empty() {
        return;
    }
    order.sort_by_key(|(_, _, _, turn_order, _, _, _)| **turn_order);

    let slot = (clock.cursor as usize) % order.len();
    clock.cursor = clock.cursor.wrapping_add(1);
    let (user, user_side, user_row, _, skill_set, user_equipment, user_name) = order[slot];

    // The turn ends regardless of whether an action lands
    turn_ends.send(TurnEndedEvent { battler: user });

    if skill_set.skills.is_empty() {
        return;
    }

    let mut rng = rand::thread_rng();
    let skill_id = skill_set.skills[rng.gen_range(0..skill_set.skills.len())];
    let Some(skill) = skills.get(skill_id) else {
        warn!("{} knows unknown skill {}", user_name.0, skill_id);
        return;
    };

    let candidates: Vec<_> = battlers
        .iter()
        .filter(|(_, side, ..)| **side == user_side.opposing())
        .collect();

    let ctx = TargetingContext {
        weapons: &weapons,
        row_formation: caps.row_formation,
        nearest_target_row: candidates.iter().map(|(_, _, row, ..)| row.0).min(),
    };
    let user_view = BattlerView {
        entity: user,
        side: *user_side,
        row: user_row.0,
        equipment: user_equipment,
    };

    let valid: Vec<Entity> = candidates
        .iter()
        .filter(|(entity, side, row, _, _, equipment, _)| {
            let target_view = BattlerView {
                entity: *entity,
                side: **side,
                row: row.0,
                equipment: *equipment,
            };
            filter.is_valid_target(skill, &user_view, &target_view, &ctx)
        })
        .map(|(entity, ..)| *entity)
        .collect();

    if valid.is_empty() {
        info!("{} readies {} but nothing is in reach", user_name.0, skill.name);
        return;
    }

    let target = valid[rng.gen_range(0..valid.len())];
    actions.send(ActionEvent {
        user,
        target,
        skill: skill_id,
    });
}

/// Turn committed actions into damage and inflicted states.
pub fn resolve_actions(
    mut actions: EventReader<ActionEvent>,
    skills: Res<SkillRegistry>,
    states: Res<StateRegistry>,
    names: Query<&BattlerName>,
    mut targets: Query<&mut ActiveStates>,
    mut damage: EventWriter<DamageEvent>,
    mut applied: EventWriter<StateAppliedEvent>,
) {
    let mut rng = rand::thread_rng();

    for event in actions.read() {
        let Some(skill) = skills.get(event.skill) else {
            continue;
        };
        let user_name = names.get(event.user).map(|n| n.0.as_str()).unwrap_or("???");
        let target_name = names
            .get(event.target)
            .map(|n| n.0.as_str())
            .unwrap_or("???");
        info!("{} uses {} on {}", user_name, skill.name, target_name);

        let amount = (skill.power + rng.gen_range(-2..=2)).max(1);
        damage.send(DamageEvent {
            target: event.target,
            source: event.user,
            amount,
        });

        if let Some(state_id) = skill.inflicts {
            let Some(state) = states.get(state_id) else {
                warn!("{} inflicts unknown state {}", skill.name, state_id);
                continue;
            };
            if let Ok(mut target_states) = targets.get_mut(event.target) {
                if target_states.apply(state_id, state.duration) {
                    info!("{} is afflicted by {}", target_name, state.name);
                    applied.send(StateAppliedEvent {
                        battler: event.target,
                        state: state_id,
                    });
                }
            }
        }
    }
}

/// Apply damage to battlers and despawn the defeated.
///
/// The recursive despawn also tears down every state effect handle attached
/// under the battler sprite.
pub fn apply_damage(
    mut commands: Commands,
    mut damage_events: EventReader<DamageEvent>,
    mut query: Query<(&mut Health, &BattlerName)>,
    mut defeated: EventWriter<BattlerDefeatedEvent>,
) {
    for event in damage_events.read() {
        let Ok((mut health, name)) = query.get_mut(event.target) else {
            continue;
        };
        if health.is_dead() {
            continue;
        }

        health.take_damage(event.amount);
        info!(
            "{} takes {} damage ({}/{})",
            name.0, event.amount, health.current, health.maximum
        );

        if health.is_dead() {
            info!("{} falls!", name.0);
            defeated.send(BattlerDefeatedEvent {
                battler: event.target,
                defeated_by: event.source,
            });
            commands.entity(event.target).despawn_recursive();
        }
    }
}

/// Count down state durations at the end of the owner's turn.
pub fn tick_turn_states(
    mut turn_ends: EventReader<TurnEndedEvent>,
    states: Res<StateRegistry>,
    mut query: Query<(&mut ActiveStates, &BattlerName)>,
    mut expirations: EventWriter<StateExpiredEvent>,
) {
    for event in turn_ends.read() {
        let Ok((mut active, name)) = query.get_mut(event.battler) else {
            continue;
        };
        // Untouched battlers must not trip change detection
        if active.states.is_empty() {
            continue;
        }

        for state_id in active.tick() {
            let state_name = states
                .get(state_id)
                .map(|s| s.name.as_str())
                .unwrap_or("a state");
            info!("{} recovers from {}", name.0, state_name);
            expirations.send(StateExpiredEvent {
                battler: event.battler,
                state: state_id,
            });
        }
    }
}

/// End the battle once a side is wiped out.
pub fn check_battle_end(
    battlers: Query<&Side, With<Battler>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let mut party = 0;
    let mut troop = 0;
    for side in battlers.iter() {
        match side {
            Side::Party => party += 1,
            Side::Troop => troop += 1,
        }
    }

    if troop == 0 {
        info!("The troop is routed. Victory!");
        next_state.set(GameState::Victory);
    } else if party == 0 {
        info!("The party has fallen...");
        next_state.set(GameState::Defeat);
    }
}
