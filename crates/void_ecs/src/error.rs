//! Error types for the entity runtime

use crate::component::Capability;
use crate::entity::EntityId;
use thiserror::Error;
use void_core::{Classify, ErrorKind};

#[derive(Debug, Error)]
pub enum EcsError {
    #[error("entity name '{0}' is already registered")]
    DuplicateName(String),

    #[error("capability '{0}' is already attached to this entity")]
    DuplicateCapability(Capability),

    #[error("'{component}' on entity '{entity}' requires sibling capability '{missing}'")]
    MissingCapability {
        entity: String,
        component: Capability,
        missing: Capability,
    },

    #[error("entity {0} not found")]
    EntityNotFound(EntityId),
}

impl Classify for EcsError {
    fn kind(&self) -> ErrorKind {
        match self {
            EcsError::DuplicateName(_) | EcsError::DuplicateCapability(_) => ErrorKind::Invariant,
            EcsError::MissingCapability { .. } => ErrorKind::Configuration,
            EcsError::EntityNotFound(_) => ErrorKind::Lookup,
        }
    }
}

pub type Result<T> = std::result::Result<T, EcsError>;
