//! Token interning: maps each token to a dense integer index.

use lattice_rules::Token;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Assigns indices `0..len` to tokens in first-seen order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenInterner {
    ids: HashMap<Token, usize>,
    tokens: Vec<Token>,
}

impl TokenInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index for `token`, allocating one if it is new.
    pub fn intern(&mut self, token: &Token) -> usize {
        if let Some(&id) = self.ids.get(token) {
            return id;
        }
        let id = self.tokens.len();
        self.ids.insert(token.clone(), id);
        self.tokens.push(token.clone());
        id
    }

    pub fn get(&self, token: &Token) -> Option<usize> {
        self.ids.get(token).copied()
    }

    pub fn resolve(&self, id: usize) -> Option<&Token> {
        self.tokens.get(id)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}
