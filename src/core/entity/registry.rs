//=========================================================================
// Entity Registry
//=========================================================================
//
// Object-id index of game entities for a multiplayer collaborator.
//
// The registry maps the entity's `object_id` to its node. An entity is a
// member only while its current object id maps back to it.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::scene::{NodeId, Scene};
use crate::error::SceneResult;

//=== EntityRegistry ======================================================

#[derive(Debug, Default, Clone)]
pub struct EntityRegistry {
    objects: HashMap<u64, NodeId>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `entity`, first assigning `object_id` when it is positive.
    ///
    /// Returns `Ok(false)` if the id is already taken, by this entity or
    /// another one. A rejected call leaves the entity's object id as it was.
    pub fn store(
        &mut self,
        scene: &mut Scene,
        entity: NodeId,
        object_id: u64,
    ) -> SceneResult<bool> {
        let motion = scene.motion_mut(entity)?;
        let key = if object_id > 0 {
            object_id
        } else {
            motion.object_id()
        };
        if self.objects.contains_key(&key) {
            return Ok(false);
        }

        motion.object_id = key;
        self.objects.insert(key, entity);
        debug!("Registered entity {} as object {}", entity, key);
        Ok(true)
    }

    /// Unregisters `entity`. Returns `false` if it was not a member.
    pub fn ignore(&mut self, scene: &Scene, entity: NodeId) -> SceneResult<bool> {
        if !self.contains(scene, entity)? {
            return Ok(false);
        }
        let key = scene.motion(entity)?.object_id();
        self.objects.remove(&key);
        debug!("Unregistered object {}", key);
        Ok(true)
    }

    pub fn contains(&self, scene: &Scene, entity: NodeId) -> SceneResult<bool> {
        let key = scene.motion(entity)?.object_id();
        Ok(self.objects.get(&key) == Some(&entity))
    }

    pub fn get(&self, object_id: u64) -> Option<NodeId> {
        self.objects.get(&object_id).copied()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

//=========================================================================
// Tests
//=========================================================================
