//! Markers for things the player can pick or use

use void_ecs::prelude::*;

/// Can be selected with the pointer
#[derive(Debug, Clone, Copy, Default)]
pub struct Pickable;

impl Component for Pickable {
    fn capability(&self) -> Capability {
        Capability::Pickable
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionKind {
    Chair,
}

/// Can be used with the interact key
#[derive(Debug, Clone, Copy)]
pub struct Interactable {
    pub kind: InteractionKind,
}

impl Interactable {
    pub fn chair() -> Self {
        Self { kind: InteractionKind::Chair }
    }
}

impl Component for Interactable {
    fn capability(&self) -> Capability {
        Capability::Interactable
    }
}
