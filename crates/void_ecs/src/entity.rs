//! Entity handles and records

use crate::component::{Capability, Component};
use crate::error::{EcsError, Result};
use crate::message::{Message, Topic};
use core::fmt;
use std::collections::{HashMap, VecDeque};
use void_math::{Quat, Transform, Vec3};
use void_structures::SlotKey;

/// Handle to a registered entity. Stale handles resolve to nothing.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub(crate) SlotKey<EntityRecord>);

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An entity under construction, before it is registered
///
/// Components attached here receive `init` only once the entity is added
/// to a manager, in attachment order.
#[derive(Default)]
pub struct Entity {
    pub(crate) transform: Transform,
    pub(crate) components: Vec<Box<dyn Component>>,
}

impl Entity {
    pub fn new() -> Self {
        Self::default()
    }

    /// A new entity at a position
    pub fn at(position: Vec3) -> Self {
        Self {
            transform: Transform::from_position(position),
            components: Vec::new(),
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.transform.rotation = rotation;
        self
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
    }

    pub fn set_rotation(&mut self, rotation: Quat) {
        self.transform.rotation = rotation;
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Attach a component. Fails if the capability is already taken.
    pub fn add_component<C: Component>(&mut self, component: C) -> Result<()> {
        let capability = component.capability();
        if self.has_capability(capability) {
            log::error!("capability '{}' attached twice", capability);
            return Err(EcsError::DuplicateCapability(capability));
        }
        self.components.push(Box::new(component));
        Ok(())
    }

    /// Builder form of [`Entity::add_component`]
    pub fn with_component<C: Component>(mut self, component: C) -> Result<Self> {
        self.add_component(component)?;
        Ok(self)
    }

    pub fn has_capability(&self, capability: Capability) -> bool {
        self.components.iter().any(|c| c.capability() == capability)
    }

    pub fn component<C: Component>(&self) -> Option<&C> {
        self.components
            .iter()
            .find_map(|c| (**c).as_any().downcast_ref::<C>())
    }

    /// First requirement not met by the attached set, as (component, missing)
    pub(crate) fn unmet_requirement(&self) -> Option<(Capability, Capability)> {
        self.components.iter().find_map(|c| {
            c.requires()
                .iter()
                .find(|req| !self.has_capability(**req))
                .map(|missing| (c.capability(), *missing))
        })
    }
}

/// Storage for one attached component
pub(crate) struct ComponentSlot {
    pub(crate) capability: Capability,
    /// `None` while the component is running
    pub(crate) component: Option<Box<dyn Component>>,
    pub(crate) wants_update: bool,
    /// Messages that arrived while the component was running
    pub(crate) inbox: VecDeque<Message>,
}

impl ComponentSlot {
    pub(crate) fn new(component: Box<dyn Component>) -> Self {
        Self {
            capability: component.capability(),
            wants_update: component.has_update(),
            component: Some(component),
            inbox: VecDeque::new(),
        }
    }
}

/// A live entity as stored by the manager
pub(crate) struct EntityRecord {
    pub(crate) name: String,
    pub(crate) transform: Transform,
    pub(crate) active: bool,
    pub(crate) slots: Vec<ComponentSlot>,
    pub(crate) capabilities: HashMap<Capability, usize>,
    pub(crate) handlers: HashMap<Topic, Vec<usize>>,
}

impl EntityRecord {
    pub(crate) fn new(name: String, entity: Entity) -> Self {
        let slots: Vec<ComponentSlot> = entity.components.into_iter().map(ComponentSlot::new).collect();
        let capabilities = slots
            .iter()
            .enumerate()
            .map(|(index, slot)| (slot.capability, index))
            .collect();
        Self {
            name,
            transform: entity.transform,
            active: true,
            slots,
            capabilities,
            handlers: HashMap::new(),
        }
    }

    pub(crate) fn push_slot(&mut self, component: Box<dyn Component>) -> usize {
        let index = self.slots.len();
        let slot = ComponentSlot::new(component);
        self.capabilities.insert(slot.capability, index);
        self.slots.push(slot);
        index
    }

    pub(crate) fn subscribe(&mut self, topic: Topic, slot: usize) {
        let handlers = self.handlers.entry(topic).or_default();
        if !handlers.contains(&slot) {
            handlers.push(slot);
        }
    }

    pub(crate) fn find<C: Component>(&self) -> Option<&C> {
        self.slots
            .iter()
            .find_map(|s| s.component.as_deref().and_then(|c| c.as_any().downcast_ref::<C>()))
    }

    pub(crate) fn find_mut<C: Component>(&mut self) -> Option<&mut C> {
        self.slots
            .iter_mut()
            .find_map(|s| s.component.as_deref_mut().and_then(|c| c.as_any_mut().downcast_mut::<C>()))
    }
}

/// Read-only view of a live entity, handed to filter predicates
#[derive(Clone, Copy)]
pub struct EntityView<'a> {
    pub(crate) id: EntityId,
    pub(crate) record: &'a EntityRecord,
}

impl<'a> EntityView<'a> {
    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &'a str {
        &self.record.name
    }

    pub fn position(&self) -> Vec3 {
        self.record.transform.position
    }

    pub fn rotation(&self) -> Quat {
        self.record.transform.rotation
    }

    pub fn is_active(&self) -> bool {
        self.record.active
    }

    pub fn has_capability(&self, capability: Capability) -> bool {
        self.record.capabilities.contains_key(&capability)
    }

    /// Typed component access. `None` while that component is running.
    pub fn component<C: Component>(&self) -> Option<&'a C> {
        self.record.find::<C>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Marker;
    impl Component for Marker {
        fn capability(&self) -> Capability {
            Capability::Pickable
        }
    }

    struct NeedsMarker;
    impl Component for NeedsMarker {
        fn capability(&self) -> Capability {
            Capability::Interactable
        }
        fn requires(&self) -> &'static [Capability] {
            &[Capability::Pickable]
        }
    }

    #[test]
    fn test_duplicate_capability_rejected() {
        let mut entity = Entity::new();
        assert!(entity.add_component(Marker).is_ok());
        let err = entity.add_component(Marker).unwrap_err();
        assert!(matches!(err, EcsError::DuplicateCapability(Capability::Pickable)));
    }

    #[test]
    fn test_unmet_requirement() {
        let entity = Entity::new().with_component(NeedsMarker).unwrap();
        assert_eq!(
            entity.unmet_requirement(),
            Some((Capability::Interactable, Capability::Pickable))
        );

        let entity = entity.with_component(Marker).unwrap();
        assert_eq!(entity.unmet_requirement(), None);
        assert!(entity.component::<Marker>().is_some());
    }
}
