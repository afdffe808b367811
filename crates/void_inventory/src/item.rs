//! Item definitions

use serde::{Deserialize, Serialize};
use void_ecs::prelude::*;

/// Item category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ItemCategory {
    /// Can be equipped and scales attack damage
    Weapon,
    /// Quest rewards with no combat use
    Quest,
    #[default]
    Misc,
}

/// Item definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDefinition {
    /// Display name
    pub name: String,
    pub category: ItemCategory,
    /// Multiplier applied to the wielder's strength
    #[serde(default = "default_damage")]
    pub damage: f32,
    /// Impact time within the attack animation, in seconds
    #[serde(default)]
    pub attack_speed: Option<f32>,
    /// Icon path for the inventory UI
    #[serde(default)]
    pub icon: String,
}

fn default_damage() -> f32 {
    1.0
}

impl ItemDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: ItemCategory::default(),
            damage: default_damage(),
            attack_speed: None,
            icon: String::new(),
        }
    }

    /// A weapon with a damage multiplier
    pub fn weapon(name: impl Into<String>, damage: f32) -> Self {
        Self::new(name).with_category(ItemCategory::Weapon).with_damage(damage)
    }

    pub fn with_category(mut self, category: ItemCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_damage(mut self, damage: f32) -> Self {
        self.damage = damage;
        self
    }

    pub fn with_attack_speed(mut self, attack_speed: f32) -> Self {
        self.attack_speed = Some(attack_speed);
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn is_weapon(&self) -> bool {
        self.category == ItemCategory::Weapon
    }
}

/// Marks an entity as an item
#[derive(Debug, Clone)]
pub struct InventoryItem {
    definition: ItemDefinition,
}

impl InventoryItem {
    pub fn new(definition: ItemDefinition) -> Self {
        Self { definition }
    }

    pub fn definition(&self) -> &ItemDefinition {
        &self.definition
    }
}

impl Component for InventoryItem {
    fn capability(&self) -> Capability {
        Capability::InventoryItem
    }
}
