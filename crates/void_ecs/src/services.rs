//! Registry of well-known entities
//!
//! Components reach the player, the quest manager and the UI through this
//! registry rather than by hard-coded entity names, so tests can wire in
//! whatever entity they like.

use crate::entity::EntityId;
use std::collections::HashMap;

/// Roles a single entity can be registered for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    Player,
    QuestManager,
    Ui,
    LevelUpSpawner,
    Camera,
}

#[derive(Debug, Default, Clone)]
pub struct ServiceRegistry {
    entries: HashMap<Service, EntityId>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity for a role, returning the previous holder
    pub fn register(&mut self, service: Service, entity: EntityId) -> Option<EntityId> {
        self.entries.insert(service, entity)
    }

    pub fn unregister(&mut self, service: Service) -> Option<EntityId> {
        self.entries.remove(&service)
    }

    pub fn get(&self, service: Service) -> Option<EntityId> {
        self.entries.get(&service).copied()
    }

    pub fn is(&self, service: Service, entity: EntityId) -> bool {
        self.get(service) == Some(entity)
    }

    /// Drop every role held by an entity
    pub(crate) fn forget(&mut self, entity: EntityId) {
        self.entries.retain(|_, held| *held != entity);
    }
}
