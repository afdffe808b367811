//! Inventory component

use crate::error::InventoryError;
use crate::item::InventoryItem;
use void_ecs::prelude::*;

/// Slots in a default inventory
pub const DEFAULT_CAPACITY: usize = 24;

/// Inventory events, drained by the UI collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryEvent {
    ItemAdded { slot: usize, name: String },
    Full { name: String },
}

/// An occupied slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventorySlot {
    pub name: String,
    pub item: EntityId,
}

/// Holds references to item entities by name. Handles `inventory.add`.
#[derive(Debug, Clone)]
pub struct InventoryController {
    slots: Vec<Option<InventorySlot>>,
    events: Vec<InventoryEvent>,
}

impl InventoryController {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
            events: Vec::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The item entity held under `name`
    pub fn item(&self, name: &str) -> Option<EntityId> {
        self.slots
            .iter()
            .flatten()
            .find(|slot| slot.name == name)
            .map(|slot| slot.item)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.item(name).is_some()
    }

    /// Occupied slots with their index
    pub fn items(&self) -> impl Iterator<Item = (usize, &InventorySlot)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|s| (i, s)))
    }

    pub fn drain_events(&mut self) -> Vec<InventoryEvent> {
        std::mem::take(&mut self.events)
    }

    /// Put the item entity called `name` in the first free slot.
    /// Adding an item already held returns its existing slot.
    pub fn add_item(&mut self, name: &str, ctx: &Context<'_>) -> Result<usize, InventoryError> {
        if let Some((slot, _)) = self.items().find(|(_, s)| s.name == name) {
            return Ok(slot);
        }
        let item = ctx
            .find_entity(name)
            .filter(|id| ctx.has_capability(*id, Capability::InventoryItem))
            .ok_or_else(|| InventoryError::UnknownItem(name.to_string()))?;

        let Some(free) = self.slots.iter().position(Option::is_none) else {
            self.events.push(InventoryEvent::Full { name: name.to_string() });
            return Err(InventoryError::Full(name.to_string()));
        };
        self.slots[free] = Some(InventorySlot { name: name.to_string(), item });
        self.events.push(InventoryEvent::ItemAdded { slot: free, name: name.to_string() });
        Ok(free)
    }

    /// Definition lookup for a held item
    pub fn definition<'c>(&self, name: &str, ctx: &'c Context<'_>) -> Option<&'c crate::ItemDefinition> {
        let id = self.item(name)?;
        ctx.component::<InventoryItem>(id).map(InventoryItem::definition)
    }
}

impl Default for InventoryController {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl Component for InventoryController {
    fn capability(&self) -> Capability {
        Capability::Inventory
    }

    fn init(&mut self, ctx: &mut Context<'_>) {
        ctx.subscribe(topics::INVENTORY_ADD);
    }

    fn on_message(&mut self, message: &Message, ctx: &mut Context<'_>) {
        let Some(item) = message.payload::<ItemRef>() else {
            return;
        };
        match self.add_item(&item.name, ctx) {
            Ok(slot) => log::info!("'{}' received '{}' in slot {}", ctx.name(), item.name, slot),
            Err(e) => log::warn!("'{}' could not add item: {}", ctx.name(), e),
        }
    }
}
