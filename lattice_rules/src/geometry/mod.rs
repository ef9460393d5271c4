//! Lattice geometry: integer displacement vectors and the compass direction table.

mod direction;
mod vector;

pub use direction::*;
pub use vector::*;
