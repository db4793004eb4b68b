//! Live entities and their group memberships
//!
//! Entities are keyed by a monotonically increasing [`EntityId`], so every
//! pass iterates in spawn order. Groups hold ids only; membership is decided
//! once from the entity kind when it is inserted.

use std::collections::{BTreeMap, BTreeSet};

use glam::Vec2;
use thiserror::Error;

use super::entity::{Character, Entity, GameObject, Projectile};

/// Handle to an entity in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub u32);

/// Named membership sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    Players,
    Enemies,
    PlayerProjectiles,
    EnemyProjectiles,
    AllProjectiles,
    /// Everything that is updated and drawn each frame
    AllActive,
}

impl Group {
    pub const ALL: [Group; 6] = [
        Group::Players,
        Group::Enemies,
        Group::PlayerProjectiles,
        Group::EnemyProjectiles,
        Group::AllProjectiles,
        Group::AllActive,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// An enemy's target handle no longer resolves to a live character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("enemy {enemy:?} targets {target:?}, which is no longer alive")]
pub struct StaleTargetError {
    pub enemy: EntityId,
    pub target: EntityId,
}

#[derive(Debug, Clone)]
pub struct EntityRegistry {
    entities: BTreeMap<EntityId, Entity>,
    groups: [BTreeSet<EntityId>; 6],
    next_id: u32,
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self {
            entities: BTreeMap::new(),
            groups: Default::default(),
            next_id: 1,
        }
    }

    /// Add an entity and register it in every group its kind belongs to
    pub fn insert(&mut self, entity: impl Into<Entity>) -> EntityId {
        let entity = entity.into();
        let id = EntityId(self.next_id);
        self.next_id += 1;

        for group in entity.kind().groups() {
            self.groups[group.index()].insert(id);
        }
        self.entities.insert(id, entity);
        id
    }

    /// Remove an entity from the registry and from all groups
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let entity = self.entities.remove(&id)?;
        for set in &mut self.groups {
            set.remove(&id);
        }
        Some(entity)
    }

    /// Remove every entity flagged dead; returns their ids in order
    pub fn sweep_dead(&mut self) -> Vec<EntityId> {
        let dead: Vec<EntityId> = self
            .entities
            .iter()
            .filter(|(_, e)| !e.is_alive())
            .map(|(id, _)| *id)
            .collect();
        for id in &dead {
            self.remove(*id);
        }
        dead
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    pub fn character(&self, id: EntityId) -> Option<&Character> {
        self.get(id).and_then(Entity::as_character)
    }

    pub fn character_mut(&mut self, id: EntityId) -> Option<&mut Character> {
        self.get_mut(id).and_then(Entity::as_character_mut)
    }

    pub fn projectile(&self, id: EntityId) -> Option<&Projectile> {
        self.get(id).and_then(Entity::as_projectile)
    }

    pub fn projectile_mut(&mut self, id: EntityId) -> Option<&mut Projectile> {
        self.get_mut(id).and_then(Entity::as_projectile_mut)
    }

    /// True if the entity is still registered and not flagged dead
    pub fn is_alive(&self, id: EntityId) -> bool {
        self.get(id).is_some_and(|e| e.is_alive())
    }

    pub fn contains(&self, group: Group, id: EntityId) -> bool {
        self.groups[group.index()].contains(&id)
    }

    /// Snapshot of a group's ids, safe to hold across mutation
    pub fn members(&self, group: Group) -> Vec<EntityId> {
        self.groups[group.index()].iter().copied().collect()
    }

    pub fn len(&self, group: Group) -> usize {
        self.groups[group.index()].len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Live entities of a group in id order
    pub fn iter_group(&self, group: Group) -> impl Iterator<Item = (EntityId, &Entity)> + '_ {
        self.groups[group.index()]
            .iter()
            .filter_map(|id| self.entities.get(id).map(|e| (*id, e)))
    }

    /// Position of `target` on behalf of `enemy`, if the target is still alive
    pub fn target_position(
        &self,
        enemy: EntityId,
        target: EntityId,
    ) -> Result<Vec2, StaleTargetError> {
        self.character(target)
            .filter(|c| c.is_alive())
            .map(|c| c.body.position)
            .ok_or(StaleTargetError { enemy, target })
    }
}
