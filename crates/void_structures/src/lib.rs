//! # void_structures - Simulation Data Structures
//!
//! - SlotMap: Generational index-based storage, the arena behind entity
//!   handles and spatial tokens
//! - Deferred: Staged mutations applied at a tick or dispatch boundary

pub mod slot_map;
pub mod deferred;

pub use slot_map::{SlotMap, SlotKey};
pub use deferred::Deferred;

pub mod prelude {
    pub use crate::slot_map::{SlotMap, SlotKey};
    pub use crate::deferred::Deferred;
}
