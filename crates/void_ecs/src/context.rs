//! Per-call view of the world handed to a running component

use crate::completion::CompletionSender;
use crate::component::{Capability, Component};
use crate::entity::{EntityId, EntityView};
use crate::manager::EntityManager;
use crate::message::{Message, Topic};
use crate::services::Service;
use core::any::Any;
use void_math::{Quat, Transform, Vec3};

/// Gives a component access to its owning entity, its siblings and the
/// rest of the world for the duration of one callback
pub struct Context<'a> {
    manager: &'a mut EntityManager,
    entity: EntityId,
    slot: usize,
}

impl<'a> Context<'a> {
    pub(crate) fn new(manager: &'a mut EntityManager, entity: EntityId, slot: usize) -> Self {
        Self { manager, entity, slot }
    }

    /// The entity this component is attached to
    pub fn entity(&self) -> EntityId {
        self.entity
    }

    pub fn name(&self) -> &str {
        self.manager.name(self.entity).unwrap_or_default()
    }

    pub fn manager(&self) -> &EntityManager {
        &*self.manager
    }

    pub fn manager_mut(&mut self) -> &mut EntityManager {
        &mut *self.manager
    }

    /// Route messages on `topic` sent to this entity to the running component
    pub fn subscribe(&mut self, topic: Topic) {
        self.manager.subscribe(self.entity, self.slot, topic);
    }

    // ========== Own transform ==========

    pub fn transform(&self) -> Transform {
        self.manager.transform(self.entity).unwrap_or_default()
    }

    pub fn position(&self) -> Vec3 {
        self.transform().position
    }

    pub fn rotation(&self) -> Quat {
        self.transform().rotation
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.manager.set_position(self.entity, position);
    }

    pub fn set_rotation(&mut self, rotation: Quat) {
        self.manager.set_rotation(self.entity, rotation);
    }

    // ========== Messaging ==========

    /// Deliver to the handlers on this entity only
    pub fn broadcast(&mut self, message: Message) {
        self.manager.send(self.entity, message);
    }

    pub fn send(&mut self, target: EntityId, message: Message) -> bool {
        self.manager.send(target, message)
    }

    /// Send to the entity registered for a service. Returns false, with a
    /// debug log, when no entity holds the role.
    pub fn send_to_service(&mut self, service: Service, message: Message) -> bool {
        match self.manager.service(service) {
            Some(target) => self.manager.send(target, message),
            None => {
                log::debug!("no {:?} registered; '{}' dropped", service, message.topic());
                false
            }
        }
    }

    pub fn service(&self, service: Service) -> Option<EntityId> {
        self.manager.service(service)
    }

    /// Whether this entity is registered for `service`
    pub fn is_service(&self, service: Service) -> bool {
        self.manager.services().is(service, self.entity)
    }

    // ========== Lookup ==========

    pub fn find_entity(&self, name: &str) -> Option<EntityId> {
        self.manager.get(name)
    }

    pub fn filter(&self, predicate: impl FnMut(&EntityView<'_>) -> bool) -> Vec<EntityId> {
        self.manager.filter(predicate)
    }

    pub fn is_active(&self, id: EntityId) -> bool {
        self.manager.is_active(id)
    }

    pub fn has_capability(&self, id: EntityId, capability: Capability) -> bool {
        self.manager.has_capability(id, capability)
    }

    /// A sibling component on the same entity.
    ///
    /// `None` for any component of this entity that is itself mid-call
    /// further up the stack, e.g. the sibling whose handler sent the
    /// message being handled. Reach such a sibling with a message instead:
    /// it is queued and delivered once that handler returns.
    pub fn sibling<C: Component>(&self) -> Option<&C> {
        self.manager.component::<C>(self.entity)
    }

    /// Mutable [`sibling`](Self::sibling), with the same caveat
    pub fn sibling_mut<C: Component>(&mut self) -> Option<&mut C> {
        self.manager.component_mut::<C>(self.entity)
    }

    pub fn component<C: Component>(&self, id: EntityId) -> Option<&C> {
        self.manager.component::<C>(id)
    }

    pub fn component_mut<C: Component>(&mut self, id: EntityId) -> Option<&mut C> {
        self.manager.component_mut::<C>(id)
    }

    pub fn position_of(&self, id: EntityId) -> Option<Vec3> {
        self.manager.position(id)
    }

    pub fn resource<R: Any>(&self) -> Option<&R> {
        self.manager.resource::<R>()
    }

    pub fn resource_mut<R: Any>(&mut self) -> Option<&mut R> {
        self.manager.resource_mut::<R>()
    }

    pub fn completions(&self) -> CompletionSender {
        self.manager.completion_sender()
    }
}
