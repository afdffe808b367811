//! # void_core - Runtime Core
//!
//! Zero-dependency primitives shared by every other crate:
//! - **Errors**: the failure taxonomy each crate maps its error enum onto
//! - **Naming**: sequential name generation for unnamed entities
//! - **Time**: the frame clock with a clamped per-tick delta

pub mod error;
pub mod id;
pub mod time;

pub use error::*;
pub use id::*;
pub use time::*;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{Classify, ErrorKind};
    pub use crate::id::NameGenerator;
    pub use crate::time::{FrameClock, FrameTime, DEFAULT_MAX_DELTA};
}
