//! Void Quest - Quest Progression
//!
//! Quests are tracked by a single [`QuestManager`] component, reached through
//! the service registry. NPCs carry a [`QuestGiver`] bound to one quest id and
//! forward the player's pick to the manager as an offer.
//!
//! # Features
//!
//! - Locked / Available / Active / Completed state per quest, with
//!   prerequisite gating
//! - Kill objectives filtered by enemy type, level objectives set from
//!   level-up notifications
//! - Rewards (experience, then items) delivered exactly once on completion
//! - One-time completion screen when every quest is done
//! - Catalogs loadable from TOML
//!
//! # Example
//!
//! ```ignore
//! use void_quest::prelude::*;
//!
//! let book = QuestBook::from_toml_str(include_str!("../data/quests.toml"))?;
//! let manager_id = manager.add(Entity::new().with_component(QuestManager::new(book))?, Some("quest-manager"))?;
//! manager.services_mut().register(Service::QuestManager, manager_id);
//!
//! let girl = Entity::at(Vec3::new(30.0, 0.0, 0.0)).with_component(QuestGiver::new("welcome_quest"))?;
//! ```

pub mod book;
pub mod error;
pub mod giver;
pub mod manager;
pub mod quest;

pub mod prelude {
    pub use crate::book::{OfferOutcome, QuestBook};
    pub use crate::error::QuestError;
    pub use crate::giver::{QuestGiver, QuestOffer};
    pub use crate::manager::QuestManager;
    pub use crate::quest::{default_quests, Objective, ObjectiveKind, Quest, QuestSnapshot, QuestState, Rewards};
}

pub use prelude::*;
