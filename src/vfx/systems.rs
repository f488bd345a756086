//! Systems that keep state animations in sync with active states.

use bevy::prelude::*;

use crate::battle::ActiveStates;
use crate::data::{AnimationDef, AnimationId, AnimationRegistry, StateRegistry};

use super::collection::{EffectHost, StateAnimationCollection};
use super::components::StateEffectAnim;

/// Vertical offset of effect quads above the battler sprite's center.
const EFFECT_OFFSET_Y: f32 = 48.0;

/// Production [`EffectHost`]: attaches effects as child entities under the
/// battler sprite. Detaching despawns the child, which unlinks it from the
/// parent before the entity is dropped, so no orphaned render-tree nodes
/// survive a remove.
pub struct SpawnEffectHost<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    parent: Entity,
}

impl<'a, 'w, 's> SpawnEffectHost<'a, 'w, 's> {
    pub fn new(commands: &'a mut Commands<'w, 's>, parent: Entity) -> Self {
        Self { commands, parent }
    }
}

impl EffectHost for SpawnEffectHost<'_, '_, '_> {
    fn attach(&mut self, def: &AnimationDef) -> Entity {
        let color = Color::srgb(def.color.0, def.color.1, def.color.2);
        let handle = self
            .commands
            .spawn((
                StateEffectAnim::new(def),
                Sprite::from_color(color, Vec2::splat(def.size)),
                Transform::from_xyz(0.0, EFFECT_OFFSET_Y, 1.0),
            ))
            .id();
        self.commands.entity(self.parent).add_child(handle);
        handle
    }

    fn detach(&mut self, handle: Entity) {
        self.commands.entity(handle).despawn_recursive();
    }
}

/// Reconcile every changed battler's effect collection against its active
/// states.
///
/// Callers of `ActiveStates` always mutate the full component, so change
/// detection hands us the complete current state list; the collection is
/// brought to exactly the implied animation ids each time.
pub fn refresh_state_animations(
    mut commands: Commands,
    states: Res<StateRegistry>,
    animations: Res<AnimationRegistry>,
    mut query: Query<(Entity, &ActiveStates, &mut StateAnimationCollection), Changed<ActiveStates>>,
) {
    for (battler, active, mut collection) in query.iter_mut() {
        // States without an animation contribute nothing
        let desired: Vec<AnimationId> = active
            .ids()
            .filter_map(|state_id| states.animation_for(state_id))
            .collect();

        let mut host = SpawnEffectHost::new(&mut commands, battler);
        collection.setup(&desired, &mut host, &animations);
    }
}

/// Advance every live effect once per frame.
pub fn advance_state_effects(
    time: Res<Time>,
    mut query: Query<(&mut StateEffectAnim, &mut Sprite)>,
) {
    for (mut anim, mut sprite) in query.iter_mut() {
        anim.tick(time.delta());
        sprite.color.set_alpha(anim.alpha());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::StateDef;

    fn test_app() -> App {
        let mut app = App::new();
        app.add_systems(Update, refresh_state_animations);

        let mut states = StateRegistry::default();
        states.states.insert(
            1,
            StateDef {
                id: 1,
                name: "Poison".to_string(),
                animation_id: Some(11),
                duration: 3,
            },
        );
        states.states.insert(
            2,
            StateDef {
                id: 2,
                name: "Focus".to_string(),
                animation_id: None,
                duration: 3,
            },
        );
        app.insert_resource(states);

        let mut animations = AnimationRegistry::default();
        animations.animations.insert(
            11,
            AnimationDef {
                id: 11,
                name: "Poison Haze".to_string(),
                color: (0.35, 0.85, 0.4),
                frames: 4,
                frame_rate: 6.0,
                size: 48.0,
            },
        );
        app.insert_resource(animations);

        app
    }

    #[test]
    fn refresh_attaches_and_detaches_child_effects() {
        let mut app = test_app();
        let battler = app
            .world_mut()
            .spawn((ActiveStates::default(), StateAnimationCollection::default()))
            .id();

        {
            let mut active = app.world_mut().get_mut::<ActiveStates>(battler).unwrap();
            active.apply(1, 3);
        }
        app.update();

        let collection = app.world().get::<StateAnimationCollection>(battler).unwrap();
        let handle = collection.handle(11).unwrap();
        assert!(app.world().get::<StateEffectAnim>(handle).is_some());
        assert_eq!(app.world().get::<Parent>(handle).unwrap().get(), battler);

        {
            let mut active = app.world_mut().get_mut::<ActiveStates>(battler).unwrap();
            active.states.clear();
        }
        app.update();

        let collection = app.world().get::<StateAnimationCollection>(battler).unwrap();
        assert!(collection.is_empty());
        // The handle is gone from the world, not just from the map
        assert!(app.world().get::<StateEffectAnim>(handle).is_none());
    }

    #[test]
    fn states_without_animations_attach_nothing() {
        let mut app = test_app();
        let battler = app
            .world_mut()
            .spawn((ActiveStates::default(), StateAnimationCollection::default()))
            .id();

        {
            let mut active = app.world_mut().get_mut::<ActiveStates>(battler).unwrap();
            active.apply(2, 3);
        }
        app.update();

        let collection = app.world().get::<StateAnimationCollection>(battler).unwrap();
        assert!(collection.is_empty());
    }
}
