//! Void Player - Input, Modes and Cameras
//!
//! Everything that turns device input into player behaviour. The input
//! collaborator only delivers key edges, pointer picks and mouse deltas as
//! messages; the components here decide what they mean.
//!
//! # Features
//!
//! - Edge-triggered keys: holding a toggle key fires it once
//! - Interaction with the closest chair in reach, and pointer picks
//! - Sitting mode with seat placement, animation fallback and ambient music
//! - Character controller with animation states, locomotion and attack cycles
//! - Third-person and first-person camera rigs behind one manager
//!
//! # Example
//!
//! ```ignore
//! use void_player::prelude::*;
//!
//! let player = Entity::at(Vec3::ZERO)
//!     .with_component(SpatialGridController::new())?
//!     .with_component(PlayerInput::new())?
//!     .with_component(CharacterController::new(LocomotionParams::default()))?
//!     .with_component(SittingController::new())?;
//! let player = manager.add(player, Some("player"))?;
//!
//! manager.send(player, Message::new(topics::INPUT_KEY_DOWN, KeyEvent::new(Key::Interact)));
//! ```

pub mod camera;
pub mod character;
pub mod error;
pub mod input;
pub mod interact;
pub mod sitting;

pub mod prelude {
    pub use crate::camera::{
        CameraManager, CameraMode, CameraPose, CameraRig, FirstPersonParams, FirstPersonRig, ThirdPersonParams,
        ThirdPersonRig,
    };
    pub use crate::character::{AnimState, CharacterController, LocomotionParams};
    pub use crate::error::PlayerError;
    pub use crate::input::{Key, KeyEvent, MoveIntent, PlayerInput, INTERACT_RANGE};
    pub use crate::interact::{Interactable, InteractionKind, Pickable};
    pub use crate::sitting::{seat_position, SeatState, SittingController, SEAT_HEIGHT, SEAT_OFFSET};
}

pub use prelude::*;
