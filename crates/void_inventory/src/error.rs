//! Inventory errors

use thiserror::Error;
use void_core::{Classify, ErrorKind};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    #[error("no item entity named '{0}'")]
    UnknownItem(String),

    #[error("item '{0}' is not in the inventory")]
    NotHeld(String),

    #[error("item '{0}' cannot be equipped")]
    NotEquippable(String),

    #[error("inventory is full, '{0}' was not added")]
    Full(String),
}

impl Classify for InventoryError {
    fn kind(&self) -> ErrorKind {
        match self {
            InventoryError::UnknownItem(_) | InventoryError::NotHeld(_) => ErrorKind::Lookup,
            InventoryError::NotEquippable(_) => ErrorKind::Configuration,
            InventoryError::Full(_) => ErrorKind::ExternalResource,
        }
    }
}
