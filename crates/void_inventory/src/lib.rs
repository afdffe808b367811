//! Void Inventory - Items as Entities
//!
//! Every item is its own entity carrying an [`InventoryItem`]; an inventory
//! only refers to items by their unique entity name.
//!
//! # Features
//!
//! - Item definitions with a damage multiplier and optional attack speed
//! - Inventory component with a fixed number of slots
//! - Equipped weapon tracking
//!
//! # Example
//!
//! ```ignore
//! use void_inventory::prelude::*;
//!
//! let sword = ItemDefinition::weapon("sword", 2.0).with_attack_speed(0.35);
//! manager.add(Entity::new().with_component(InventoryItem::new(sword))?, Some("sword"))?;
//! manager.send(player, Message::new(topics::INVENTORY_ADD, ItemRef::new("sword")));
//! manager.send(player, Message::new(topics::INVENTORY_EQUIP, ItemRef::new("sword")));
//! ```

pub mod equipment;
pub mod error;
pub mod inventory;
pub mod item;

pub mod prelude {
    pub use crate::equipment::EquipWeapon;
    pub use crate::error::InventoryError;
    pub use crate::inventory::{InventoryController, InventoryEvent, InventorySlot, DEFAULT_CAPACITY};
    pub use crate::item::{InventoryItem, ItemCategory, ItemDefinition};
}

pub use prelude::*;
