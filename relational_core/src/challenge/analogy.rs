//! Analogy statements: "Is A1 to B1 the same as A2 to B2?"

use lattice_rules::{Analogy, Challenge, Premise, PuzzleState, Token, Vector};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

use super::{repeats, MIN_ANALOGY_TOKENS};
use crate::generator::GeneratorConfig;
use crate::relation_graph::RelationGraph;

/// Chance of attempting a true analogy.
pub const TRUE_ANALOGY_PROBABILITY: f64 = 0.5;

/// Ordered `(a, b)` pairs grouped by the displacement of `a` from `b`.
///
/// Only groups with at least two pairs are kept, and only pairs related
/// through the round's dense graph, so a true analogy can always be verified
/// at answer time.
pub fn equal_vector_groups(state: &PuzzleState) -> Vec<Vec<(Token, Token)>> {
    let graph = RelationGraph::build_dense(state);
    let mut groups: BTreeMap<Vector, Vec<(Token, Token)>> = BTreeMap::new();

    for (item_a, item_b) in state.ordered_pairs() {
        if !graph.is_connected(item_b, item_a) {
            continue;
        }
        if let Some(offset) = state.displacement(item_b, item_a) {
            groups
                .entry(offset)
                .or_default()
                .push((item_a.clone(), item_b.clone()));
        }
    }

    groups.into_values().filter(|pairs| pairs.len() >= 2).collect()
}

/// Build an analogy over the live tokens.
///
/// Returns `None` when fewer than four tokens are live or no false analogy
/// with distinct vectors turns up within the retry cap; the caller then asks
/// a conclusion instead.
pub fn create_analogy<R: Rng + ?Sized>(
    rng: &mut R,
    state: &PuzzleState,
    last_premise: Option<&Premise>,
    config: &GeneratorConfig,
) -> Option<Challenge> {
    if state.len() < MIN_ANALOGY_TOKENS {
        return None;
    }

    let groups = equal_vector_groups(state);
    let mut candidate = None;

    for _ in 0..config.max_challenge_attempts.max(1) {
        let drawn = if rng.gen_bool(TRUE_ANALOGY_PROBABILITY) {
            true_analogy(rng, &groups).or_else(|| false_analogy(rng, state, config))
        } else {
            false_analogy(rng, state, config)
        };
        let Some(drawn) = drawn else {
            continue;
        };
        if !repeats(&drawn, last_premise) {
            return Some(drawn);
        }
        candidate = Some(drawn);
    }

    if candidate.is_some() {
        tracing::warn!(
            attempts = config.max_challenge_attempts,
            "analogy keeps restating the last premise, allowing repetition"
        );
    }
    candidate
}

/// Two distinct pairs from one random equal-vector group.
fn true_analogy<R: Rng + ?Sized>(
    rng: &mut R,
    groups: &[Vec<(Token, Token)>],
) -> Option<Challenge> {
    let group = groups.choose(rng)?;
    let picked: Vec<&(Token, Token)> = group.choose_multiple(rng, 2).collect();
    let [(item_a1, item_b1), (item_a2, item_b2)] = picked.as_slice() else {
        return None;
    };

    Some(Challenge::Analogy {
        statement: Analogy::new(item_a1.clone(), item_b1.clone(), item_a2.clone(), item_b2.clone()),
        is_true: true,
    })
}

/// Two pairs over four distinct tokens whose vectors differ.
fn false_analogy<R: Rng + ?Sized>(
    rng: &mut R,
    state: &PuzzleState,
    config: &GeneratorConfig,
) -> Option<Challenge> {
    for _ in 0..config.max_challenge_attempts {
        let picked: Vec<&Token> = state.nodes().choose_multiple(rng, 4).collect();
        let [item_a1, item_b1, item_a2, item_b2] = picked.as_slice() else {
            return None;
        };

        let first = state.displacement(item_b1, item_a1)?;
        let second = state.displacement(item_b2, item_a2)?;
        if first != second {
            return Some(Challenge::Analogy {
                statement: Analogy::new(
                    (*item_a1).clone(),
                    (*item_b1).clone(),
                    (*item_a2).clone(),
                    (*item_b2).clone(),
                ),
                is_true: false,
            });
        }
    }
    None
}
