//! EntityManager - owner of every live entity
//!
//! Dispatch works by taking a component out of its slot while it runs and
//! putting it back afterwards. That lets a running component reach its
//! siblings and other entities through a `&mut EntityManager` without any
//! aliasing. A message addressed to a component that is currently out of
//! its slot is queued on the slot and delivered as soon as the component
//! is returned, still inside the same dispatch.

use crate::completion::{CompletionQueue, CompletionSender};
use crate::component::{Capability, Component};
use crate::context::Context;
use crate::entity::{Entity, EntityId, EntityRecord, EntityView};
use crate::error::{EcsError, Result};
use crate::message::Message;
use crate::resources::Resources;
use crate::services::{Service, ServiceRegistry};
use crate::topics;
use core::any::Any;
use std::collections::HashMap;
use void_core::NameGenerator;
use void_math::{Quat, Transform, Vec3};
use void_structures::{Deferred, SlotMap};

/// Component callback run by `run_slot`
#[derive(Clone, Copy)]
enum Hook<'m> {
    Init,
    Message(&'m Message),
    Update(f32),
    Detach,
}

/// Mutations postponed to the end of the running tick or dispatch
#[derive(Debug, Clone, Copy)]
enum PendingOp {
    Remove(EntityId),
    SetActive(EntityId, bool),
}

pub struct EntityManager {
    entities: SlotMap<EntityRecord>,
    names: HashMap<String, EntityId>,
    /// Registration order, which is also update order
    order: Vec<EntityId>,
    name_gen: NameGenerator,
    resources: Resources,
    services: ServiceRegistry,
    pending: Deferred<PendingOp>,
    completions: CompletionQueue,
}

impl EntityManager {
    pub fn new() -> Self {
        Self {
            entities: SlotMap::new(),
            names: HashMap::new(),
            order: Vec::new(),
            name_gen: NameGenerator::new(),
            resources: Resources::new(),
            services: ServiceRegistry::new(),
            pending: Deferred::new(),
            completions: CompletionQueue::new(),
        }
    }

    // ========== Registration ==========

    /// Register an entity, generating a name when none is given.
    ///
    /// Fails if the name is taken or a component's required sibling
    /// capability is missing. On success every component receives `init`,
    /// in attachment order.
    pub fn add(&mut self, entity: Entity, name: Option<&str>) -> Result<EntityId> {
        let name = match name {
            Some(name) if self.names.contains_key(name) => {
                return Err(EcsError::DuplicateName(name.to_string()));
            }
            Some(name) => name.to_string(),
            None => loop {
                let candidate = self.name_gen.next_name();
                if !self.names.contains_key(&candidate) {
                    break candidate;
                }
            },
        };

        if let Some((component, missing)) = entity.unmet_requirement() {
            return Err(EcsError::MissingCapability { entity: name, component, missing });
        }

        let slot_count = entity.components.len();
        let id = EntityId(self.entities.insert(EntityRecord::new(name.clone(), entity)));
        self.names.insert(name.clone(), id);
        self.order.push(id);
        log::debug!("registered entity '{}' ({}) with {} components", name, id, slot_count);

        self.pending.enter();
        for slot in 0..slot_count {
            self.run_slot(id, slot, Hook::Init);
        }
        self.end_scope();

        Ok(id)
    }

    /// Attach a component to a live entity and initialise it immediately
    pub fn attach<C: Component>(&mut self, id: EntityId, component: C) -> Result<()> {
        let record = self.entities.get_mut(id.0).ok_or(EcsError::EntityNotFound(id))?;
        let capability = component.capability();
        if record.capabilities.contains_key(&capability) {
            log::error!("capability '{}' attached twice to '{}'", capability, record.name);
            return Err(EcsError::DuplicateCapability(capability));
        }
        if let Some(missing) = component
            .requires()
            .iter()
            .find(|req| !record.capabilities.contains_key(*req))
        {
            return Err(EcsError::MissingCapability {
                entity: record.name.clone(),
                component: capability,
                missing: *missing,
            });
        }

        let slot = record.push_slot(Box::new(component));
        self.pending.enter();
        self.run_slot(id, slot, Hook::Init);
        self.end_scope();
        Ok(())
    }

    /// Remove an entity, detaching all its components.
    ///
    /// While a tick or dispatch is running the removal is staged and applied
    /// at its end, so handlers already scheduled still see the entity.
    pub fn remove(&mut self, id: EntityId) -> bool {
        if !self.entities.contains_key(id.0) {
            return false;
        }
        if self.pending.is_deferring() {
            self.pending.stage(PendingOp::Remove(id));
        } else {
            self.remove_now(id);
        }
        true
    }

    /// Include or exclude an entity from updates and spatial queries
    pub fn set_active(&mut self, id: EntityId, active: bool) -> bool {
        if !self.entities.contains_key(id.0) {
            return false;
        }
        if self.pending.is_deferring() {
            self.pending.stage(PendingOp::SetActive(id, active));
        } else if let Some(record) = self.entities.get_mut(id.0) {
            record.active = active;
        }
        true
    }

    // ========== Lookup ==========

    pub fn get(&self, name: &str) -> Option<EntityId> {
        self.names.get(name).copied()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(id.0)
    }

    pub fn name(&self, id: EntityId) -> Option<&str> {
        self.entities.get(id.0).map(|r| r.name.as_str())
    }

    pub fn is_active(&self, id: EntityId) -> bool {
        self.entities.get(id.0).map(|r| r.active).unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Live entities in registration order
    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.order.iter().copied()
    }

    pub fn view(&self, id: EntityId) -> Option<EntityView<'_>> {
        self.entities.get(id.0).map(|record| EntityView { id, record })
    }

    /// Entities matching a predicate, evaluated now over the live set
    pub fn filter(&self, mut predicate: impl FnMut(&EntityView<'_>) -> bool) -> Vec<EntityId> {
        self.order
            .iter()
            .filter_map(|id| self.view(*id))
            .filter(|view| predicate(view))
            .map(|view| view.id)
            .collect()
    }

    pub fn has_capability(&self, id: EntityId, capability: Capability) -> bool {
        self.entities
            .get(id.0)
            .map(|r| r.capabilities.contains_key(&capability))
            .unwrap_or(false)
    }

    /// Typed component access. `None` while that component is running.
    pub fn component<C: Component>(&self, id: EntityId) -> Option<&C> {
        self.entities.get(id.0)?.find::<C>()
    }

    pub fn component_mut<C: Component>(&mut self, id: EntityId) -> Option<&mut C> {
        self.entities.get_mut(id.0)?.find_mut::<C>()
    }

    // ========== Transform ==========

    pub fn transform(&self, id: EntityId) -> Option<Transform> {
        self.entities.get(id.0).map(|r| r.transform)
    }

    pub fn position(&self, id: EntityId) -> Option<Vec3> {
        self.transform(id).map(|t| t.position)
    }

    pub fn rotation(&self, id: EntityId) -> Option<Quat> {
        self.transform(id).map(|t| t.rotation)
    }

    /// Move an entity and notify its components before returning
    pub fn set_position(&mut self, id: EntityId, position: Vec3) {
        let Some(record) = self.entities.get_mut(id.0) else {
            return;
        };
        record.transform.position = position;
        self.dispatch(id, &Message::new(topics::UPDATE_POSITION, position));
    }

    /// Rotate an entity and notify its components before returning
    pub fn set_rotation(&mut self, id: EntityId, rotation: Quat) {
        let Some(record) = self.entities.get_mut(id.0) else {
            return;
        };
        record.transform.rotation = rotation;
        self.dispatch(id, &Message::new(topics::UPDATE_ROTATION, rotation));
    }

    // ========== Messaging ==========

    /// Deliver a message to every handler on `target` subscribed to its topic.
    /// Returns false when the entity does not exist.
    pub fn send(&mut self, target: EntityId, message: Message) -> bool {
        if !self.contains(target) {
            log::debug!("dropping '{}' for missing entity {}", message.topic(), target);
            return false;
        }
        self.dispatch(target, &message);
        true
    }

    pub(crate) fn dispatch(&mut self, id: EntityId, message: &Message) {
        let targets = match self.entities.get(id.0).and_then(|r| r.handlers.get(&message.topic())) {
            Some(slots) => slots.clone(),
            None => return,
        };

        self.pending.enter();
        for slot in targets {
            self.deliver(id, slot, message);
        }
        self.end_scope();
    }

    fn deliver(&mut self, id: EntityId, slot: usize, message: &Message) {
        let Some(entry) = self.entities.get_mut(id.0).and_then(|r| r.slots.get_mut(slot)) else {
            return;
        };
        if entry.component.is_none() {
            entry.inbox.push_back(message.clone());
            return;
        }
        self.run_slot(id, slot, Hook::Message(message));
    }

    pub(crate) fn subscribe(&mut self, id: EntityId, slot: usize, topic: crate::message::Topic) {
        if let Some(record) = self.entities.get_mut(id.0) {
            record.subscribe(topic, slot);
        }
    }

    // ========== Per-frame update ==========

    /// Advance every active entity by `dt`, in registration order.
    ///
    /// Completions posted since the previous tick are delivered first.
    /// Removals and activation changes requested during the tick are
    /// applied once every entity has been updated.
    pub fn update(&mut self, dt: f32) {
        self.deliver_completions();

        self.pending.enter();
        let order = self.order.clone();
        for id in order {
            let Some(record) = self.entities.get(id.0) else {
                continue;
            };
            if !record.active {
                continue;
            }
            let updatable: Vec<usize> = record
                .slots
                .iter()
                .enumerate()
                .filter(|(_, slot)| slot.wants_update)
                .map(|(index, _)| index)
                .collect();
            for slot in updatable {
                self.run_slot(id, slot, Hook::Update(dt));
            }
        }
        self.end_scope();
    }

    fn deliver_completions(&mut self) {
        for completion in self.completions.drain() {
            if !self.contains(completion.target) {
                log::debug!(
                    "dropping '{}' completion for removed entity {}",
                    completion.topic,
                    completion.target
                );
                continue;
            }
            let message = Message::from_boxed(completion.topic, completion.payload);
            self.dispatch(completion.target, &message);
        }
    }

    pub fn completion_sender(&self) -> CompletionSender {
        self.completions.sender()
    }

    // ========== Resources & services ==========

    pub fn insert_resource<R: Any>(&mut self, resource: R) {
        self.resources.insert(resource);
    }

    pub fn resource<R: Any>(&self) -> Option<&R> {
        self.resources.get::<R>()
    }

    pub fn resource_mut<R: Any>(&mut self) -> Option<&mut R> {
        self.resources.get_mut::<R>()
    }

    pub fn services(&self) -> &ServiceRegistry {
        &self.services
    }

    pub fn services_mut(&mut self) -> &mut ServiceRegistry {
        &mut self.services
    }

    pub fn service(&self, service: Service) -> Option<EntityId> {
        self.services.get(service)
    }

    // ========== Internals ==========

    /// Run one component callback with the component taken out of its slot,
    /// then drain whatever was queued for it meanwhile
    fn run_slot(&mut self, id: EntityId, slot: usize, hook: Hook<'_>) {
        let Some(mut component) = self
            .entities
            .get_mut(id.0)
            .and_then(|r| r.slots.get_mut(slot))
            .and_then(|s| s.component.take())
        else {
            return;
        };

        {
            let mut ctx = Context::new(self, id, slot);
            match hook {
                Hook::Init => component.init(&mut ctx),
                Hook::Message(message) => component.on_message(message, &mut ctx),
                Hook::Update(dt) => component.update(dt, &mut ctx),
                Hook::Detach => component.on_detach(&mut ctx),
            }
        }

        match self.entities.get_mut(id.0).and_then(|r| r.slots.get_mut(slot)) {
            Some(entry) => entry.component = Some(component),
            None => {
                log::debug!("entity {} vanished while its component was running", id);
                return;
            }
        }

        // Messages that arrived while the component was busy
        while let Some(message) = self
            .entities
            .get_mut(id.0)
            .and_then(|r| r.slots.get_mut(slot))
            .and_then(|s| s.inbox.pop_front())
        {
            self.run_slot(id, slot, Hook::Message(&message));
        }
    }

    fn end_scope(&mut self) {
        if let Some(ops) = self.pending.exit() {
            for op in ops {
                match op {
                    PendingOp::Remove(id) => self.remove_now(id),
                    PendingOp::SetActive(id, active) => {
                        if let Some(record) = self.entities.get_mut(id.0) {
                            record.active = active;
                        }
                    }
                }
            }
        }
    }

    fn remove_now(&mut self, id: EntityId) {
        let Some(record) = self.entities.get(id.0) else {
            return;
        };
        let slot_count = record.slots.len();

        self.pending.enter();
        for slot in 0..slot_count {
            self.run_slot(id, slot, Hook::Detach);
        }
        if let Some(record) = self.entities.remove(id.0) {
            self.names.remove(&record.name);
            self.order.retain(|other| *other != id);
            self.services.forget(id);
            log::debug!("removed entity '{}' ({})", record.name, id);
        }
        self.end_scope();
    }
}

impl Default for EntityManager {
    fn default() -> Self {
        Self::new()
    }
}
