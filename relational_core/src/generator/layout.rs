//! Layout placement - puts tokens on free lattice cells next to tokens already placed.

use lattice_rules::{Direction, Premise, PuzzleState, Token, Vector};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{fresh_token, GeneratorConfig};
use crate::error::{EngineError, Result};

/// The opening layout of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialLayout {
    pub state: PuzzleState,
    /// One placement premise per token after the first, in placement order.
    pub premises: Vec<Premise>,
}

impl InitialLayout {
    pub fn last_premise(&self) -> Option<&Premise> {
        self.premises.last()
    }
}

/// One FIFO step of the token window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advance {
    /// The token evicted from the front of the window.
    pub oldest: Token,
    /// How the newly appended token was placed.
    pub premise: Premise,
    pub state: PuzzleState,
}

/// Generate `count` unique tokens and lay them out on the lattice.
///
/// The first token sits at the origin. Each later token is attached to a
/// random already-placed token in a random direction that lands on a free cell.
pub fn place_initial<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    word_length: usize,
    config: &GeneratorConfig,
) -> Result<InitialLayout> {
    if count == 0 {
        return Err(EngineError::NotEnoughTokens { needed: 1, found: 0 });
    }

    let mut tokens: Vec<Token> = Vec::with_capacity(count);
    while tokens.len() < count {
        let token = fresh_token(rng, word_length, config.max_token_attempts, |t| {
            tokens.contains(t)
        })?;
        tokens.push(token);
    }

    let mut tokens = tokens.into_iter();
    let mut state = PuzzleState::new();
    let mut premises = Vec::with_capacity(count - 1);

    if let Some(first) = tokens.next() {
        state.place(first, Vector::ZERO)?;
    }
    for token in tokens {
        let (premise, position) = attach(rng, &state, token, config)?;
        state.place(premise.item_a.clone(), position)?;
        premises.push(premise);
    }

    tracing::debug!(tokens = state.len(), premises = premises.len(), "placed initial layout");
    Ok(InitialLayout { state, premises })
}

/// Evict the oldest token and append a fresh one next to a random survivor.
///
/// The input state is left untouched; the returned state replaces it.
pub fn advance<R: Rng + ?Sized>(
    rng: &mut R,
    state: &PuzzleState,
    word_length: usize,
    config: &GeneratorConfig,
) -> Result<Advance> {
    if state.len() < 2 {
        return Err(EngineError::NotEnoughTokens {
            needed: 2,
            found: state.len(),
        });
    }

    let mut next = state.clone();
    let (oldest, _) = next.evict_oldest().ok_or(EngineError::NotEnoughTokens {
        needed: 2,
        found: 0,
    })?;

    let token = fresh_token(rng, word_length, config.max_token_attempts, |t| {
        next.contains(t) || *t == oldest
    })?;
    let (premise, position) = attach(rng, &next, token, config)?;
    next.place(premise.item_a.clone(), position)?;

    tracing::debug!(%oldest, premise = %premise, "advanced token window");
    Ok(Advance {
        oldest,
        premise,
        state: next,
    })
}

/// Pick a reference and a direction for `token` without touching `state`.
fn attach<R: Rng + ?Sized>(
    rng: &mut R,
    state: &PuzzleState,
    token: Token,
    config: &GeneratorConfig,
) -> Result<(Premise, Vector)> {
    let Some(reference) = state.nodes().choose(rng).cloned() else {
        return Err(EngineError::NotEnoughTokens { needed: 1, found: 0 });
    };
    let Some(origin) = state.coordinate(&reference) else {
        return Err(EngineError::UnknownToken(reference));
    };

    for _ in 0..config.max_placement_attempts {
        let Some(direction) = Direction::ALL.choose(rng).copied() else {
            break;
        };
        let position = origin + direction.vector();
        if !state.is_occupied(position) {
            return Ok((Premise::new(token, direction, reference), position));
        }
    }

    tracing::debug!(%reference, "random placement saturated, scanning all free cells");
    let (reference, direction, position) =
        scan_free_cell(rng, state, &reference).ok_or(EngineError::LayoutExhausted {
            placed: state.len(),
        })?;
    Ok((Premise::new(token, direction, reference), position))
}

/// Exhaustive fallback: the preferred reference first, then every other token.
fn scan_free_cell<R: Rng + ?Sized>(
    rng: &mut R,
    state: &PuzzleState,
    preferred: &Token,
) -> Option<(Token, Direction, Vector)> {
    let mut others: Vec<&Token> = state.nodes().iter().filter(|t| *t != preferred).collect();
    others.shuffle(rng);

    let mut directions = Direction::ALL;
    for reference in std::iter::once(preferred).chain(others) {
        let origin = state.coordinate(reference)?;
        directions.shuffle(rng);
        for direction in directions {
            let position = origin + direction.vector();
            if !state.is_occupied(position) {
                return Some((reference.clone(), direction, position));
            }
        }
    }
    None
}
