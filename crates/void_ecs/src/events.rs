//! Payloads for topics shared between crates

use crate::entity::EntityId;
use void_math::Vec3;

/// Experience awarded to an entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExperienceGain {
    pub amount: u32,
}

/// Health after a change, for health bars
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthChanged {
    pub health: f32,
    pub max_health: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeathNotice {
    pub killer: Option<EntityId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelGained {
    pub level: u32,
}

/// A kill credited to the player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KillNotice {
    pub enemy_type: String,
    pub level: u32,
}

/// Refers to an inventory item by its unique name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRef {
    pub name: String,
}

impl ItemRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Animation phase signal. A new `action` id starts a new cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationPhase {
    pub action: u64,
    pub time: f32,
}

/// Pointer pick from the input collaborator; `None` when nothing was hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPick {
    pub target: Option<EntityId>,
}

/// Sent to an entity the player picked
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Picked {
    pub by: EntityId,
}

/// Sit on `seat`, or stand up when `None`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeatToggle {
    pub seat: Option<EntityId>,
}

/// Mouse movement in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookDelta {
    pub dx: f32,
    pub dy: f32,
}

/// A visual model finished loading
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModelLoaded {
    pub animations: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioCue {
    Death,
    AmbientMusic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    LevelUp,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectRequest {
    pub kind: EffectKind,
    pub position: Vec3,
}

/// Informational popup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestNotice {
    pub title: String,
    pub text: String,
}

impl QuestNotice {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self { title: title.into(), text: text.into() }
    }
}

/// Character sheet for the UI
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatsSnapshot {
    pub health: f32,
    pub max_health: f32,
    pub strength: f32,
    pub wisdomness: f32,
    pub benchpress: f32,
    pub curl: f32,
    pub experience: u32,
    pub level: u32,
}

/// Interaction hint; `None` hides it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionPrompt {
    pub text: Option<String>,
}
