//! Component contract
//!
//! A component is a unit of behaviour attached to exactly one entity. It
//! never holds a reference to its owner: every callback receives a
//! [`Context`] that resolves the owning entity, its siblings and the rest of
//! the world through handles.

use crate::context::Context;
use crate::message::Message;
use core::any::Any;
use core::fmt;

/// Behavioural role a component fulfils. One per entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Spatial,
    Health,
    Attack,
    Inventory,
    InventoryItem,
    EquipWeapon,
    QuestGiver,
    QuestManager,
    Pickable,
    Interactable,
    CharacterInput,
    CharacterController,
    Sitting,
    Camera,
    Ui,
    LevelUpSpawner,
    Environment,
    Model,
    /// Escape hatch for capabilities defined outside this crate
    Custom(&'static str),
}

impl Capability {
    pub fn name(&self) -> &'static str {
        match self {
            Capability::Spatial => "spatial",
            Capability::Health => "health",
            Capability::Attack => "attack",
            Capability::Inventory => "inventory",
            Capability::InventoryItem => "inventory-item",
            Capability::EquipWeapon => "equip-weapon",
            Capability::QuestGiver => "quest-giver",
            Capability::QuestManager => "quest-manager",
            Capability::Pickable => "pickable",
            Capability::Interactable => "interactable",
            Capability::CharacterInput => "character-input",
            Capability::CharacterController => "character-controller",
            Capability::Sitting => "sitting",
            Capability::Camera => "camera",
            Capability::Ui => "ui",
            Capability::LevelUpSpawner => "level-up-spawner",
            Capability::Environment => "environment",
            Capability::Model => "model",
            Capability::Custom(name) => name,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Upcast to `Any` for typed sibling lookup. Implemented for every `'static` type.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Behaviour attached to an entity
pub trait Component: AsAny {
    /// The role this component fills
    fn capability(&self) -> Capability;

    /// Sibling capabilities that must be present when the entity is registered
    fn requires(&self) -> &'static [Capability] {
        &[]
    }

    /// Called once when the owning entity goes live. Subscribe to topics here.
    fn init(&mut self, _ctx: &mut Context<'_>) {}

    /// Called for every message on a subscribed topic
    fn on_message(&mut self, _message: &Message, _ctx: &mut Context<'_>) {}

    /// Whether `update` should be called every tick
    fn has_update(&self) -> bool {
        false
    }

    fn update(&mut self, _dt: f32, _ctx: &mut Context<'_>) {}

    /// Called when the owning entity is removed
    fn on_detach(&mut self, _ctx: &mut Context<'_>) {}
}
