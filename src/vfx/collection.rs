//! Owned registry of state effect handles for one battler sprite.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::data::{AnimationDef, AnimationId, AnimationRegistry};

/// Where effect handles are acquired and released.
///
/// The collection decides *which* handles exist; the host decides *how* one
/// is attached to and detached from the render tree. In the game the host
/// spawns child entities under the battler sprite; tests substitute a
/// counting mock.
pub trait EffectHost {
    /// Attach a new effect for the given animation, returning its handle.
    fn attach(&mut self, def: &AnimationDef) -> Entity;

    /// Detach a previously attached handle from the render tree. The handle
    /// must not be reused afterwards.
    fn detach(&mut self, handle: Entity);
}

/// Mapping from animation id to the attached effect handle, one per id.
///
/// The collection exclusively owns the attachment of every handle it
/// creates: a handle enters the map in `add` and leaves it only through
/// `remove`, which detaches before dropping the reference. After any
/// `setup`, the key set equals the desired id set.
#[derive(Component, Default, Debug)]
pub struct StateAnimationCollection {
    handles: HashMap<AnimationId, Entity>,
}

impl StateAnimationCollection {
    /// Reconcile the collection to exactly the desired animation ids:
    /// acquire every missing id, then release every stale handle.
    pub fn setup(
        &mut self,
        desired: &[AnimationId],
        host: &mut dyn EffectHost,
        animations: &AnimationRegistry,
    ) {
        for &id in desired {
            self.add(id, host, animations);
        }

        let stale: Vec<AnimationId> = self
            .handles
            .keys()
            .copied()
            .filter(|id| !desired.contains(id))
            .collect();
        for id in stale {
            self.remove(id, host);
        }
    }

    /// Attach an effect for an animation id. No-op for id 0, for an id that
    /// is already showing, and for an id with no animation definition.
    pub fn add(&mut self, id: AnimationId, host: &mut dyn EffectHost, animations: &AnimationRegistry) {
        if id == 0 || self.handles.contains_key(&id) {
            return;
        }
        let Some(def) = animations.get(id) else {
            warn!("State references unknown animation {}", id);
            return;
        };
        let handle = host.attach(def);
        self.handles.insert(id, handle);
    }

    /// Detach and drop the effect for an animation id. No-op for id 0 and
    /// for ids that aren't showing.
    pub fn remove(&mut self, id: AnimationId, host: &mut dyn EffectHost) {
        if id == 0 {
            return;
        }
        if let Some(handle) = self.handles.remove(&id) {
            host.detach(handle);
        }
    }

    /// Handle currently showing for an animation id, if any.
    pub fn handle(&self, id: AnimationId) -> Option<Entity> {
        self.handles.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}
