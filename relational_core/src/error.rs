//! Engine error types.

use lattice_rules::{StateError, Token};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("no fresh token of length {length} after {attempts} attempts")]
    TokenSpaceExhausted { length: usize, attempts: usize },

    #[error("no free lattice cell next to any of {placed} placed tokens")]
    LayoutExhausted { placed: usize },

    #[error("challenge exhausted: {0}")]
    ChallengeExhausted(String),

    #[error("operation needs at least {needed} live tokens, found {found}")]
    NotEnoughTokens { needed: usize, found: usize },

    #[error("unknown token: {0}")]
    UnknownToken(Token),

    #[error("invalid phase: {0}")]
    InvalidPhase(String),

    #[error("state error: {0}")]
    State(#[from] StateError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
