//! Challenge Generator - derives the round's true/false question from the token layout.
//!
//! Generation works as follows:
//! 1. **Mode**: pick conclusion or analogy from the player's [`ChallengeType`]
//! 2. **Draw**: build a candidate statement from random tokens
//! 3. **Truth**: fix the verdict from the coordinates (never from chance alone)
//! 4. **Non-repetition**: reject candidates restating the premise just shown
//! 5. **Relaxation**: once the retry cap is hit, accept the last candidate
//!
//! Answers are checked by [`evaluate`] against the round's relation graph,
//! independently of the verdict stored in the challenge.

mod analogy;
mod conclusion;

pub use analogy::*;
pub use conclusion::*;

use lattice_rules::{Challenge, ChallengeType, Premise, PuzzleState};
use rand::Rng;

use crate::error::Result;
use crate::generator::GeneratorConfig;
use crate::relation_graph::RelationGraph;

/// Analogies compare two relations and need four distinct tokens.
pub const MIN_ANALOGY_TOKENS: usize = 4;

/// Share of analogies in mixed mode.
pub const MIXED_ANALOGY_SHARE: f64 = 0.5;

/// Builds challenges for a round.
#[derive(Debug, Clone, Default)]
pub struct ChallengeGenerator {
    config: GeneratorConfig,
}

impl ChallengeGenerator {
    /// Create a new generator with the given retry caps.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Produce the next challenge for `state`.
    ///
    /// `last_premise` is the fact most recently shown to the player; the
    /// challenge avoids asking about the same token pair.
    pub fn next<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        state: &PuzzleState,
        challenge_type: ChallengeType,
        last_premise: Option<&Premise>,
    ) -> Result<Challenge> {
        let wants_analogy = match challenge_type {
            ChallengeType::Conclusions => false,
            ChallengeType::Analogies => true,
            ChallengeType::Mixed => rng.gen_bool(MIXED_ANALOGY_SHARE),
        };

        if wants_analogy && state.len() >= MIN_ANALOGY_TOKENS {
            if let Some(analogy) = create_analogy(rng, state, last_premise, &self.config) {
                return Ok(analogy);
            }
            tracing::warn!(tokens = state.len(), "no analogy could be built, asking a conclusion");
        } else if wants_analogy {
            tracing::debug!(tokens = state.len(), "too few tokens for an analogy");
        }

        create_conclusion(rng, state, last_premise, &self.config)
    }
}

/// Whether the statement of `challenge` holds in `graph`.
///
/// A conclusion holds when the path vector from `item_b` to `item_a` equals
/// the asserted direction. An analogy holds when both relations are defined
/// and equal. Unrelated tokens make the statement false.
pub fn evaluate(challenge: &Challenge, graph: &RelationGraph) -> bool {
    match challenge {
        Challenge::Conclusion { statement, .. } => {
            graph.relative_vector(&statement.item_b, &statement.item_a)
                == Some(statement.direction.vector())
        }
        Challenge::Analogy { statement, .. } => {
            let first = graph.relative_vector(&statement.item_b1, &statement.item_a1);
            let second = graph.relative_vector(&statement.item_b2, &statement.item_a2);
            matches!((first, second), (Some(a), Some(b)) if a == b)
        }
    }
}

/// Whether `answer` is the right verdict for `challenge` in `graph`.
pub fn is_correct_answer(challenge: &Challenge, graph: &RelationGraph, answer: bool) -> bool {
    evaluate(challenge, graph) == answer
}

fn repeats(candidate: &Challenge, last_premise: Option<&Premise>) -> bool {
    last_premise.is_some_and(|premise| candidate.repeats(premise))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::place_initial;
    use lattice_rules::{Conclusion, Direction, Token, Vector};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grid(cells: &[(&str, i32, i32)]) -> PuzzleState {
        let mut state = PuzzleState::new();
        for (name, x, y) in cells {
            state.place(Token::new(*name), Vector::new(*x, *y)).unwrap();
        }
        state
    }

    #[test]
    fn test_conclusions_only() {
        let mut rng = StdRng::seed_from_u64(4);
        let generator = ChallengeGenerator::default();
        let layout = place_initial(&mut rng, 6, 3, &GeneratorConfig::default()).unwrap();

        for _ in 0..50 {
            let challenge = generator
                .next(&mut rng, &layout.state, ChallengeType::Conclusions, layout.last_premise())
                .unwrap();
            assert!(!challenge.is_analogy());
        }
    }

    #[test]
    fn test_analogies_only() {
        let mut rng = StdRng::seed_from_u64(4);
        let generator = ChallengeGenerator::default();
        let layout = place_initial(&mut rng, 6, 3, &GeneratorConfig::default()).unwrap();

        for _ in 0..50 {
            let challenge = generator
                .next(&mut rng, &layout.state, ChallengeType::Analogies, layout.last_premise())
                .unwrap();
            assert!(challenge.is_analogy());
        }
    }

    #[test]
    fn test_analogies_fall_back_below_four_tokens() {
        let mut rng = StdRng::seed_from_u64(4);
        let generator = ChallengeGenerator::default();
        let state = grid(&[("A", 0, 0), ("B", 1, 0), ("C", 1, 1)]);

        for _ in 0..20 {
            let challenge = generator
                .next(&mut rng, &state, ChallengeType::Analogies, None)
                .unwrap();
            assert!(!challenge.is_analogy());
        }
    }

    #[test]
    fn test_mixed_produces_both_kinds() {
        let mut rng = StdRng::seed_from_u64(12);
        let generator = ChallengeGenerator::default();
        let state = grid(&[("A", 0, 0), ("B", 1, 0), ("C", 1, 1), ("D", 2, 1), ("E", 0, 1)]);

        let kinds: Vec<bool> = (0..100)
            .map(|_| {
                generator
                    .next(&mut rng, &state, ChallengeType::Mixed, None)
                    .unwrap()
                    .is_analogy()
            })
            .collect();
        assert!(kinds.iter().any(|a| *a));
        assert!(kinds.iter().any(|a| !*a));
    }

    #[test]
    fn test_generator_verdict_matches_graph() {
        let mut rng = StdRng::seed_from_u64(21);
        let config = GeneratorConfig::default();
        let generator = ChallengeGenerator::new(config);

        for _ in 0..30 {
            let layout = place_initial(&mut rng, 7, 3, &config).unwrap();
            let graph = RelationGraph::build_dense(&layout.state);
            for challenge_type in [ChallengeType::Conclusions, ChallengeType::Analogies] {
                let challenge = generator
                    .next(&mut rng, &layout.state, challenge_type, layout.last_premise())
                    .unwrap();
                assert_eq!(evaluate(&challenge, &graph), challenge.is_true(), "{challenge}");
            }
        }
    }

    #[test]
    fn test_evaluate_conclusion() {
        let state = grid(&[("A", 0, 0), ("B", 1, 1), ("C", 5, 5)]);
        let graph = RelationGraph::build_dense(&state);

        let holds = Challenge::Conclusion {
            statement: Conclusion::new("B".into(), Direction::NorthEast, "A".into()),
            is_true: true,
        };
        let wrong = Challenge::Conclusion {
            statement: Conclusion::new("B".into(), Direction::North, "A".into()),
            is_true: false,
        };
        let unrelated = Challenge::Conclusion {
            statement: Conclusion::new("C".into(), Direction::NorthEast, "A".into()),
            is_true: false,
        };

        assert!(evaluate(&holds, &graph));
        assert!(!evaluate(&wrong, &graph));
        assert!(!evaluate(&unrelated, &graph));
        assert!(is_correct_answer(&wrong, &graph, false));
        assert!(!is_correct_answer(&holds, &graph, false));
    }
}
