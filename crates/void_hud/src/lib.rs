//! Void HUD - UI Controller State
//!
//! The HUD is a collaborator: this crate keeps what it should show and lets
//! the renderer draw it.
//!
//! # Features
//!
//! - Inventory, stats and quest panels, one open at a time
//! - Quest journal with per-quest objective text
//! - Quest notices that hide after five seconds
//! - Stats readout, death and completion screens, interaction prompt
//! - [`HudFrame`] snapshot serialized to JSON for the renderer
//!
//! # Example
//!
//! ```ignore
//! use void_hud::prelude::*;
//!
//! let ui = manager.add(Entity::new().with_component(UiController::new())?, Some("ui"))?;
//! manager.services_mut().register(Service::Ui, ui);
//! manager.send(ui, Message::signal(topics::UI_TOGGLE_QUESTS));
//! ```

pub mod controller;
pub mod frame;
pub mod journal;
pub mod notification;
pub mod panel;

pub mod prelude {
    pub use crate::controller::UiController;
    pub use crate::frame::{HudFrame, JournalLine, StatsLine};
    pub use crate::journal::{JournalEntry, QuestJournal};
    pub use crate::notification::{MessagePanel, Notification, NotificationType, NOTICE_DURATION};
    pub use crate::panel::{Panel, PanelSet};
}

pub use prelude::*;
