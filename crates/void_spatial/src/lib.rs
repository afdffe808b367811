//! # void_spatial - Proximity Queries
//!
//! A fixed uniform grid over a bounded patch of the ground plane, used by
//! combat targeting and interaction checks.
//!
//! ## Features
//!
//! - **Fixed resolution**: bounds and cell counts are set at construction
//! - **Clamping**: positions outside the bounds land in the nearest edge cell
//! - **Tokens**: inserts hand back a generational token; using a stale token
//!   panics
//! - **Component**: [`SpatialGridController`] keeps an entity indexed as it
//!   moves
//!
//! ## Example
//!
//! ```ignore
//! use void_spatial::prelude::*;
//!
//! let mut grid = SpatialIndex::new(GridConfig::default());
//! let token = grid.insert("crate", Vec2::new(3.0, 4.0));
//! let hits = grid.find_near(Vec2::ZERO, 5.0);
//! assert_eq!(hits[0].item, "crate");
//! grid.remove(token);
//! ```

pub mod controller;
pub mod grid;

pub use controller::{EntityGrid, SpatialGridController};
pub use grid::{GridConfig, GridEntry, Neighbor, SpatialIndex, SpatialToken};

pub mod prelude {
    pub use crate::controller::{EntityGrid, SpatialGridController};
    pub use crate::grid::{GridConfig, Neighbor, SpatialIndex, SpatialToken};
    pub use void_math::Vec2;
}
