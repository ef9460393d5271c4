//! # Lattice Rules
//!
//! The rule book crate for the spatial recall puzzle. It defines the lattice
//! geometry, the puzzle entities, the live puzzle state, the scoring rules and
//! the player settings. It holds no randomness and no graph traversal; those
//! belong to `relational_core`.

pub mod entities;
pub mod geometry;
pub mod mechanics;
pub mod settings;
pub mod world_state;

pub use entities::*;
pub use geometry::*;
pub use mechanics::*;
pub use settings::*;
pub use world_state::*;
