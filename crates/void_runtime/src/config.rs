//! Runtime configuration
//!
//! Settings come from, in priority order:
//!
//! 1. Environment variables: `TOWN_SEED`, `TOWN_SECONDS`, `TOWN_QUESTS`
//! 2. Config file: first of `town.toml`, `config/town.toml`
//! 3. Built-in defaults
//!
//! # Example Config File
//!
//! ```toml
//! seed = 7
//! run_seconds = 120.0
//! quests = "crates/void_quest/data/quests.toml"
//!
//! [clock]
//! max_delta = 0.0333
//! day_length = 300.0
//!
//! [population]
//! monsters = 80
//! extent = 400.0
//! max_attempts = 50
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use void_core::{Classify, ErrorKind, DEFAULT_MAX_DELTA};
use void_spatial::GridConfig;

/// Files searched by [`RuntimeConfig::load`]
pub const CONFIG_PATHS: &[&str] = &["town.toml", "config/town.toml"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid setting '{key}': {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl Classify for ConfigError {
    fn kind(&self) -> ErrorKind {
        match self {
            ConfigError::Io(_) => ErrorKind::ExternalResource,
            ConfigError::Parse(_) | ConfigError::Invalid { .. } => ErrorKind::Configuration,
        }
    }
}

/// Frame timing and the day/night period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Largest simulated step per tick, in seconds
    pub max_delta: f32,
    /// Seconds for a full day
    pub day_length: f32,
    /// Fixed step the headless binary feeds the clock
    pub step: f32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            max_delta: DEFAULT_MAX_DELTA,
            day_length: 300.0,
            step: 1.0 / 60.0,
        }
    }
}

/// Monster population
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    pub monsters: usize,
    /// Spawn square half-width around the origin
    pub extent: f32,
    /// Placement tries per monster before it is skipped
    pub max_attempts: u32,
    /// Inactive trees scattered around the map
    pub foliage: usize,
    /// Inactive clouds
    pub clouds: usize,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            monsters: 80,
            extent: 400.0,
            max_attempts: 50,
            foliage: 100,
            clouds: 20,
        }
    }
}

/// Complete runtime configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Seed for monster and scenery placement
    pub seed: u64,
    /// How long the headless binary runs, in simulated seconds
    pub run_seconds: f32,
    /// Quest catalog file; the built-in catalog when absent
    pub quests: Option<PathBuf>,
    pub grid: GridConfig,
    pub clock: ClockConfig,
    pub population: PopulationConfig,
    /// Where this config was read from
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            seed: 7,
            run_seconds: 60.0,
            quests: None,
            grid: GridConfig::default(),
            clock: ClockConfig::default(),
            population: PopulationConfig::default(),
            source: None,
        }
    }
}

impl RuntimeConfig {
    /// Load from the first config file found, then apply environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        for path in CONFIG_PATHS {
            let path = Path::new(path);
            if path.is_file() {
                config = Self::from_file(path)?;
                log::info!("loaded runtime config from {}", path.display());
                break;
            }
        }
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let mut config = Self::from_toml_str(&std::fs::read_to_string(path)?)?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `TOWN_*` overrides read through `lookup`
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(seed) = lookup("TOWN_SEED") {
            self.seed = seed.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "TOWN_SEED",
                reason: format!("'{}' is not an integer", seed),
            })?;
            log::info!("seed from env: {}", self.seed);
        }
        if let Some(seconds) = lookup("TOWN_SECONDS") {
            self.run_seconds = seconds.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "TOWN_SECONDS",
                reason: format!("'{}' is not a number", seconds),
            })?;
        }
        if let Some(quests) = lookup("TOWN_QUESTS").filter(|q| !q.is_empty()) {
            self.quests = Some(PathBuf::from(quests));
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.clock.max_delta > 0.0) {
            return Err(ConfigError::Invalid { key: "clock.max_delta", reason: "must be positive".into() });
        }
        if !(self.clock.day_length > 0.0) {
            return Err(ConfigError::Invalid { key: "clock.day_length", reason: "must be positive".into() });
        }
        if !(self.clock.step > 0.0) {
            return Err(ConfigError::Invalid { key: "clock.step", reason: "must be positive".into() });
        }
        if self.grid.dimensions.contains(&0) {
            return Err(ConfigError::Invalid { key: "grid.dimensions", reason: "cells must be non-zero".into() });
        }
        if self.grid.min.x >= self.grid.max.x || self.grid.min.y >= self.grid.max.y {
            return Err(ConfigError::Invalid { key: "grid", reason: "min must be below max".into() });
        }
        Ok(())
    }
}
