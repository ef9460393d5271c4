//! The compass direction table.
//!
//! Eight named directions in a fixed bijection with the unit and diagonal
//! lattice vectors. Every component that derives or checks a direction goes
//! through this table, so one displacement always maps to one name.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::Vector;

/// One of the eight compass directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    #[serde(rename = "North-East")]
    NorthEast,
    #[serde(rename = "South-East")]
    SouthEast,
    #[serde(rename = "North-West")]
    NorthWest,
    #[serde(rename = "South-West")]
    SouthWest,
}

/// Raised when a direction name is not one of the eight table entries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown direction name: {0}")]
pub struct UnknownDirection(pub String);

impl Direction {
    /// All directions, in table order.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::NorthWest,
        Direction::SouthWest,
    ];

    /// The lattice vector for this direction. North is +y, East is +x.
    pub const fn vector(self) -> Vector {
        match self {
            Direction::North => Vector::new(0, 1),
            Direction::South => Vector::new(0, -1),
            Direction::East => Vector::new(1, 0),
            Direction::West => Vector::new(-1, 0),
            Direction::NorthEast => Vector::new(1, 1),
            Direction::SouthEast => Vector::new(1, -1),
            Direction::NorthWest => Vector::new(-1, 1),
            Direction::SouthWest => Vector::new(-1, -1),
        }
    }

    /// Reverse lookup. `None` when the vector is not one of the eight table vectors.
    pub fn from_vector(vector: Vector) -> Option<Direction> {
        Self::ALL.into_iter().find(|d| d.vector() == vector)
    }

    /// The direction whose vector is the negation of this one.
    pub const fn inverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::NorthEast => Direction::SouthWest,
            Direction::SouthEast => Direction::NorthWest,
            Direction::NorthWest => Direction::SouthEast,
            Direction::SouthWest => Direction::NorthEast,
        }
    }

    /// Display name as shown to the player.
    pub const fn name(self) -> &'static str {
        match self {
            Direction::North => "North",
            Direction::South => "South",
            Direction::East => "East",
            Direction::West => "West",
            Direction::NorthEast => "North-East",
            Direction::SouthEast => "South-East",
            Direction::NorthWest => "North-West",
            Direction::SouthWest => "South-West",
        }
    }

    /// Whether this is one of the four diagonal directions.
    pub fn is_diagonal(self) -> bool {
        let v = self.vector();
        v.dx != 0 && v.dy != 0
    }
}

impl FromStr for Direction {
    type Err = UnknownDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownDirection(s.to_string()))
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
