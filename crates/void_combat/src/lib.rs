//! Void Combat - Health, Progression and Melee Timing
//!
//! # Features
//!
//! - Health component with a one-way death transition and an XP curve
//! - Level-ups that raise stats, max health and notify quest tracking
//! - Attack controller turning animation phase into one hit per swing
//! - Facing-cone target selection over the spatial grid
//! - Melee brain that turns monsters toward a nearby player and swings
//!
//! # Example
//!
//! ```ignore
//! use void_combat::prelude::*;
//!
//! let player = Entity::at(Vec3::ZERO)
//!     .with_component(SpatialGridController::new())?
//!     .with_component(HealthComponent::new(HealthStats::default().with_strength(50.0)))?
//!     .with_component(AttackController::new(AttackParams::default()))?;
//!
//! manager.send(target, Message::new(topics::HEALTH_DAMAGE, DamageInfo::new(25.0)));
//! ```

pub mod attack;
pub mod brain;
pub mod damage;
pub mod health;

pub mod prelude {
    pub use crate::attack::{AttackController, AttackParams};
    pub use crate::brain::{BrainParams, MeleeBrain};
    pub use crate::damage::{compute_damage, DamageInfo, FacingCone};
    pub use crate::health::{xp_requirement, HealthComponent, HealthStats, Vitality};
}

pub use prelude::*;
