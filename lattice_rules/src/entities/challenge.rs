//! Challenge statements - the true/false questions put to the player.

use serde::{Deserialize, Serialize};

use super::{Premise, Token};
use crate::geometry::Direction;

/// "Is `item_a` in `direction` of `item_b`?"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conclusion {
    pub item_a: Token,
    pub direction: Direction,
    pub item_b: Token,
}

impl Conclusion {
    pub fn new(item_a: Token, direction: Direction, item_b: Token) -> Self {
        Self {
            item_a,
            direction,
            item_b,
        }
    }
}

impl std::fmt::Display for Conclusion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Is {} {} of {}?", self.item_a, self.direction, self.item_b)
    }
}

/// "Is the relation of `item_a1` to `item_b1` the same as `item_a2` to `item_b2`?"
///
/// Each relation is the displacement of the `a` item measured from the `b` item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analogy {
    pub item_a1: Token,
    pub item_b1: Token,
    pub item_a2: Token,
    pub item_b2: Token,
}

impl Analogy {
    pub fn new(item_a1: Token, item_b1: Token, item_a2: Token, item_b2: Token) -> Self {
        Self {
            item_a1,
            item_b1,
            item_a2,
            item_b2,
        }
    }
}

impl std::fmt::Display for Analogy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Is the relation of {} to {} the same as {} to {}?",
            self.item_a1, self.item_b1, self.item_a2, self.item_b2
        )
    }
}

/// The single live question of a round.
///
/// Immutable once issued. `is_true` is the generator's own verdict; the
/// answer is checked independently against the round's relation graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Challenge {
    Conclusion {
        statement: Conclusion,
        #[serde(rename = "isTrue")]
        is_true: bool,
    },
    Analogy {
        statement: Analogy,
        #[serde(rename = "isTrue")]
        is_true: bool,
    },
}

impl Challenge {
    pub fn is_true(&self) -> bool {
        match self {
            Challenge::Conclusion { is_true, .. } | Challenge::Analogy { is_true, .. } => *is_true,
        }
    }

    pub fn is_analogy(&self) -> bool {
        matches!(self, Challenge::Analogy { .. })
    }

    /// Whether any token pair this challenge asks about is the pair of `premise`.
    pub fn repeats(&self, premise: &Premise) -> bool {
        match self {
            Challenge::Conclusion { statement, .. } => {
                premise.involves_pair(&statement.item_a, &statement.item_b)
            }
            Challenge::Analogy { statement, .. } => {
                premise.involves_pair(&statement.item_a1, &statement.item_b1)
                    || premise.involves_pair(&statement.item_a2, &statement.item_b2)
            }
        }
    }

    /// Tokens referenced by the statement, in statement order.
    pub fn tokens(&self) -> Vec<&Token> {
        match self {
            Challenge::Conclusion { statement, .. } => vec![&statement.item_a, &statement.item_b],
            Challenge::Analogy { statement, .. } => vec![
                &statement.item_a1,
                &statement.item_b1,
                &statement.item_a2,
                &statement.item_b2,
            ],
        }
    }
}

impl std::fmt::Display for Challenge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Challenge::Conclusion { statement, .. } => write!(f, "{}", statement),
            Challenge::Analogy { statement, .. } => write!(f, "{}", statement),
        }
    }
}
