//! # void_ecs - Entity/Component Runtime
//!
//! Entities are named bags of behaviour components plus a transform. They
//! live in a generational arena owned by the [`EntityManager`]; everything
//! else refers to them through copyable [`EntityId`] handles.
//!
//! ## Features
//!
//! - **Capabilities**: at most one component per [`Capability`] on an entity,
//!   with sibling requirements checked when the entity is registered
//! - **Topic messaging**: synchronous, depth-first delivery to the handlers a
//!   component subscribed during `init`
//! - **Deferred mutation**: removal and activation changes requested while a
//!   tick or a dispatch is running are applied at its boundary
//! - **Services**: an explicit registry for well-known entities (player,
//!   quest manager, UI) instead of lookup by magic name
//! - **Completions**: asynchronous load results arrive over a channel and are
//!   delivered at the start of the next tick
//!
//! ## Example
//!
//! ```ignore
//! use void_ecs::prelude::*;
//!
//! let mut manager = EntityManager::new();
//! let player = manager.add(Entity::at(Vec3::ZERO).with_component(Health::new(100.0))?, Some("player"))?;
//! manager.send(player, Message::new(topics::HEALTH_DAMAGE, 10.0_f32));
//! manager.update(1.0 / 60.0);
//! ```

pub mod component;
pub mod completion;
pub mod context;
pub mod entity;
pub mod error;
pub mod events;
pub mod manager;
pub mod message;
pub mod resources;
pub mod services;
pub mod topics;

pub use component::{Capability, Component};
pub use completion::CompletionSender;
pub use context::Context;
pub use entity::{Entity, EntityId, EntityView};
pub use error::{EcsError, Result};
pub use manager::EntityManager;
pub use message::{Message, Topic};
pub use resources::Resources;
pub use services::{Service, ServiceRegistry};

pub mod prelude {
    pub use crate::component::{Capability, Component};
    pub use crate::completion::CompletionSender;
    pub use crate::context::Context;
    pub use crate::entity::{Entity, EntityId, EntityView};
    pub use crate::error::EcsError;
    pub use crate::events::*;
    pub use crate::manager::EntityManager;
    pub use crate::message::{Message, Topic};
    pub use crate::services::{Service, ServiceRegistry};
    pub use crate::topics;
    pub use void_math::prelude::*;
}
