//! Puzzle entities: tokens, premises and challenge statements.

mod challenge;
mod premise;

pub use challenge::*;
pub use premise::*;

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

/// A generated word labelling one puzzle item.
///
/// Tokens carry no meaning beyond identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    pub fn new(word: impl Into<String>) -> Self {
        Self(word.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Token {
    fn from(word: &str) -> Self {
        Self::new(word)
    }
}

impl From<String> for Token {
    fn from(word: String) -> Self {
        Self(word)
    }
}

impl Borrow<str> for Token {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether `{a1, b1}` and `{a2, b2}` are the same unordered pair.
pub fn same_unordered_pair(a1: &Token, b1: &Token, a2: &Token, b2: &Token) -> bool {
    (a1 == a2 && b1 == b2) || (a1 == b2 && b1 == a2)
}
