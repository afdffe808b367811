//! Equipped weapon

use crate::error::InventoryError;
use crate::inventory::InventoryController;
use void_ecs::prelude::*;

/// Tracks which held weapon is in hand. Handles `inventory.equip`.
#[derive(Debug, Clone, Default)]
pub struct EquipWeapon {
    equipped: Option<String>,
}

impl EquipWeapon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the equipped item
    pub fn equipped(&self) -> Option<&str> {
        self.equipped.as_deref()
    }

    pub fn unequip(&mut self) -> Option<String> {
        self.equipped.take()
    }

    /// Equip a weapon held by the sibling inventory
    pub fn equip(&mut self, name: &str, ctx: &Context<'_>) -> Result<(), InventoryError> {
        let inventory = ctx
            .sibling::<InventoryController>()
            .ok_or_else(|| InventoryError::NotHeld(name.to_string()))?;
        let definition = inventory
            .definition(name, ctx)
            .ok_or_else(|| InventoryError::NotHeld(name.to_string()))?;
        if !definition.is_weapon() {
            return Err(InventoryError::NotEquippable(name.to_string()));
        }
        self.equipped = Some(name.to_string());
        Ok(())
    }
}

impl Component for EquipWeapon {
    fn capability(&self) -> Capability {
        Capability::EquipWeapon
    }

    fn requires(&self) -> &'static [Capability] {
        &[Capability::Inventory]
    }

    fn init(&mut self, ctx: &mut Context<'_>) {
        ctx.subscribe(topics::INVENTORY_EQUIP);
    }

    fn on_message(&mut self, message: &Message, ctx: &mut Context<'_>) {
        let Some(item) = message.payload::<ItemRef>() else {
            return;
        };
        match self.equip(&item.name, ctx) {
            Ok(()) => log::info!("'{}' equipped '{}'", ctx.name(), item.name),
            Err(e) => log::warn!("'{}' could not equip: {}", ctx.name(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{InventoryItem, ItemDefinition};

    fn world() -> (EntityManager, EntityId) {
        let mut manager = EntityManager::new();
        for (name, def) in [
            ("sword", ItemDefinition::weapon("Sword", 2.0)),
            ("map", ItemDefinition::new("Map")),
        ] {
            let entity = Entity::new().with_component(InventoryItem::new(def)).unwrap();
            manager.add(entity, Some(name)).unwrap();
        }
        let player = Entity::new()
            .with_component(InventoryController::default())
            .unwrap()
            .with_component(EquipWeapon::new())
            .unwrap();
        let player = manager.add(player, Some("player")).unwrap();
        for name in ["sword", "map"] {
            manager.send(player, Message::new(topics::INVENTORY_ADD, ItemRef::new(name)));
        }
        (manager, player)
    }

    #[test]
    fn test_equip_held_weapon() {
        let (mut manager, player) = world();
        manager.send(player, Message::new(topics::INVENTORY_EQUIP, ItemRef::new("sword")));
        assert_eq!(manager.component::<EquipWeapon>(player).unwrap().equipped(), Some("sword"));
    }

    #[test]
    fn test_non_weapon_is_rejected() {
        let (mut manager, player) = world();
        manager.send(player, Message::new(topics::INVENTORY_EQUIP, ItemRef::new("sword")));
        manager.send(player, Message::new(topics::INVENTORY_EQUIP, ItemRef::new("map")));
        manager.send(player, Message::new(topics::INVENTORY_EQUIP, ItemRef::new("axe")));
        assert_eq!(manager.component::<EquipWeapon>(player).unwrap().equipped(), Some("sword"));
    }

    #[test]
    fn test_requires_inventory() {
        let mut manager = EntityManager::new();
        let entity = Entity::new().with_component(EquipWeapon::new()).unwrap();
        assert!(matches!(
            manager.add(entity, None),
            Err(EcsError::MissingCapability { missing: Capability::Inventory, .. })
        ));
    }
}
