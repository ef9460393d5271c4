//! Premises - the directional facts shown to the player.

use serde::{Deserialize, Serialize};

use super::{same_unordered_pair, Token};
use crate::geometry::Direction;

/// Asserts that `item_a` lies in `direction` from `item_b`,
/// i.e. `coordinate(item_a) - coordinate(item_b) == direction.vector()`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Premise {
    pub item_a: Token,
    pub direction: Direction,
    pub item_b: Token,
}

impl Premise {
    pub fn new(item_a: Token, direction: Direction, item_b: Token) -> Self {
        Self {
            item_a,
            direction,
            item_b,
        }
    }

    /// The same fact stated from `item_b`'s side.
    pub fn inverse(&self) -> Premise {
        Premise::new(self.item_b.clone(), self.direction.inverse(), self.item_a.clone())
    }

    /// Whether this premise relates exactly the unordered pair `{a, b}`.
    pub fn involves_pair(&self, a: &Token, b: &Token) -> bool {
        same_unordered_pair(&self.item_a, &self.item_b, a, b)
    }

    pub fn involves(&self, token: &Token) -> bool {
        &self.item_a == token || &self.item_b == token
    }
}

impl std::fmt::Display for Premise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} is {} of {}", self.item_a, self.direction, self.item_b)
    }
}
