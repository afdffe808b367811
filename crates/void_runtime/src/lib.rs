//! # void_runtime - Town Runtime
//!
//! Assembles the starting world and drives it with a clamped frame clock.
//!
//! ## Features
//!
//! - **Configuration**: [`RuntimeConfig`] from TOML with `TOWN_*` overrides
//! - **World assembly**: controllers, items, quest givers, the player and its
//!   camera, the village, inactive scenery and a seeded monster population
//! - **Environment**: a day/night cycle producing lighting parameters
//! - **Asset completions**: a loader thread posting `model.loaded` and
//!   `audio.loaded` back to the simulation
//!
//! ## Example
//!
//! ```ignore
//! use void_runtime::prelude::*;
//!
//! let mut sim = Simulation::new(&RuntimeConfig::load()?)?;
//! sim.start_loading()?;
//! sim.run_for(10.0, 1.0 / 60.0);
//! ```

pub mod assets;
pub mod config;
pub mod effects;
pub mod environment;
pub mod error;
pub mod runtime;
pub mod scenery;
pub mod town;
pub mod world;

pub mod prelude {
    pub use crate::assets::{AssetLoader, LoadRequest, PLAYER_ANIMATIONS};
    pub use crate::config::{ClockConfig, ConfigError, PopulationConfig, RuntimeConfig};
    pub use crate::effects::{LevelUpSpawner, TransientEffect, LEVEL_UP_LIFETIME};
    pub use crate::environment::{DayNightCycle, Lighting, Palette, TimePhase};
    pub use crate::error::RuntimeError;
    pub use crate::runtime::Simulation;
    pub use crate::scenery::SceneModel;
    pub use crate::town::{load_town, Town, TOWN_CENTER};
    pub use crate::world::{build_world, in_safe_zone, World, SAFE_ZONES};
}

pub use prelude::*;
