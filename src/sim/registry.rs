//! Entity registry
//!
//! Owns the live projectiles and hostiles. Ids are handed out monotonically
//! and entities are kept in insertion order, so iteration is always by id.

use super::state::{EntityId, Hostile, Projectile};

#[derive(Debug, Clone)]
pub struct EntityRegistry {
    projectiles: Vec<Projectile>,
    hostiles: Vec<Hostile>,
    next_id: EntityId,
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self {
            projectiles: Vec::new(),
            hostiles: Vec::new(),
            next_id: 1,
        }
    }

    fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Register a projectile, returning its new id
    pub fn add_projectile(&mut self, mut projectile: Projectile) -> EntityId {
        projectile.id = self.next_entity_id();
        let id = projectile.id;
        self.projectiles.push(projectile);
        id
    }

    /// Register a hostile, returning its new id
    pub fn add_hostile(&mut self, mut hostile: Hostile) -> EntityId {
        hostile.id = self.next_entity_id();
        let id = hostile.id;
        self.hostiles.push(hostile);
        id
    }

    /// Remove by id. Removing an unknown or already removed id is a no-op.
    pub fn remove_projectile(&mut self, id: EntityId) -> Option<Projectile> {
        let idx = self.projectiles.iter().position(|p| p.id == id)?;
        Some(self.projectiles.remove(idx))
    }

    /// Remove by id. Removing an unknown or already removed id is a no-op.
    pub fn remove_hostile(&mut self, id: EntityId) -> Option<Hostile> {
        let idx = self.hostiles.iter().position(|h| h.id == id)?;
        Some(self.hostiles.remove(idx))
    }

    pub fn projectiles(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.iter()
    }

    pub fn hostiles(&self) -> impl Iterator<Item = &Hostile> {
        self.hostiles.iter()
    }

    pub fn projectiles_mut(&mut self) -> impl Iterator<Item = &mut Projectile> {
        self.projectiles.iter_mut()
    }

    pub fn hostiles_mut(&mut self) -> impl Iterator<Item = &mut Hostile> {
        self.hostiles.iter_mut()
    }

    pub fn projectile(&self, id: EntityId) -> Option<&Projectile> {
        self.projectiles.iter().find(|p| p.id == id)
    }

    pub fn hostile(&self, id: EntityId) -> Option<&Hostile> {
        self.hostiles.iter().find(|h| h.id == id)
    }

    pub fn hostile_mut(&mut self, id: EntityId) -> Option<&mut Hostile> {
        self.hostiles.iter_mut().find(|h| h.id == id)
    }

    /// Stable snapshot of live projectile ids, safe to walk while removing
    pub fn projectile_ids(&self) -> Vec<EntityId> {
        self.projectiles.iter().map(|p| p.id).collect()
    }

    /// Stable snapshot of live hostile ids, safe to walk while removing
    pub fn hostile_ids(&self) -> Vec<EntityId> {
        self.hostiles.iter().map(|h| h.id).collect()
    }

    pub fn retain_projectiles(&mut self, keep: impl FnMut(&Projectile) -> bool) {
        self.projectiles.retain(keep);
    }

    pub fn retain_hostiles(&mut self, keep: impl FnMut(&Hostile) -> bool) {
        self.hostiles.retain(keep);
    }

    pub fn projectile_count(&self) -> usize {
        self.projectiles.len()
    }

    pub fn hostile_count(&self) -> usize {
        self.hostiles.len()
    }

    /// Drop every entity (session teardown)
    pub fn clear(&mut self) {
        self.projectiles.clear();
        self.hostiles.clear();
    }
}
