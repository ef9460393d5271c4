//! Conclusion statements: "Is A North of B?"

use lattice_rules::{Challenge, Conclusion, Direction, Premise, PuzzleState, Token};
use rand::seq::SliceRandom;
use rand::Rng;

use super::repeats;
use crate::error::{EngineError, Result};
use crate::generator::GeneratorConfig;

/// Chance of asking a true conclusion when the two tokens are aligned.
pub const TRUE_CONCLUSION_PROBABILITY: f64 = 0.4;

/// Build a conclusion about two random live tokens.
///
/// The verdict follows the coordinates: a true statement names the actual
/// direction, a false one names any other direction. Tokens that are not one
/// step apart have no actual direction and always yield a false statement.
///
/// Fails with [`EngineError::ChallengeExhausted`] when the config allows no
/// attempts at all.
pub fn create_conclusion<R: Rng + ?Sized>(
    rng: &mut R,
    state: &PuzzleState,
    last_premise: Option<&Premise>,
    config: &GeneratorConfig,
) -> Result<Challenge> {
    if state.len() < 2 {
        return Err(EngineError::NotEnoughTokens {
            needed: 2,
            found: state.len(),
        });
    }
    if config.max_challenge_attempts == 0 {
        return Err(EngineError::ChallengeExhausted(
            "conclusion retry cap is zero".to_string(),
        ));
    }

    let mut candidate = draw_conclusion(rng, state)?;
    for _ in 1..config.max_challenge_attempts {
        if !repeats(&candidate, last_premise) {
            return Ok(candidate);
        }
        candidate = draw_conclusion(rng, state)?;
    }

    if repeats(&candidate, last_premise) {
        tracing::warn!(
            attempts = config.max_challenge_attempts,
            "conclusion keeps restating the last premise, allowing repetition"
        );
    }
    Ok(candidate)
}

fn draw_conclusion<R: Rng + ?Sized>(rng: &mut R, state: &PuzzleState) -> Result<Challenge> {
    let picked: Vec<&Token> = state.nodes().choose_multiple(rng, 2).collect();
    let [item_b, item_a] = picked.as_slice() else {
        return Err(EngineError::NotEnoughTokens {
            needed: 2,
            found: picked.len(),
        });
    };

    let actual = state
        .displacement(item_b, item_a)
        .and_then(Direction::from_vector);
    let wants_true = rng.gen_bool(TRUE_CONCLUSION_PROBABILITY);

    let (direction, is_true) = match actual {
        Some(direction) if wants_true => (direction, true),
        _ => (false_direction(rng, actual), false),
    };

    Ok(Challenge::Conclusion {
        statement: Conclusion::new((*item_a).clone(), direction, (*item_b).clone()),
        is_true,
    })
}

/// A uniformly random direction other than `actual`.
fn false_direction<R: Rng + ?Sized>(rng: &mut R, actual: Option<Direction>) -> Direction {
    let candidates: Vec<Direction> = Direction::ALL
        .into_iter()
        .filter(|d| Some(*d) != actual)
        .collect();
    candidates.choose(rng).copied().unwrap_or(Direction::North)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_rules::Vector;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grid(cells: &[(&str, i32, i32)]) -> PuzzleState {
        let mut state = PuzzleState::new();
        for (name, x, y) in cells {
            state.place(Token::new(*name), Vector::new(*x, *y)).unwrap();
        }
        state
    }

    fn statement(challenge: &Challenge) -> &Conclusion {
        match challenge {
            Challenge::Conclusion { statement, .. } => statement,
            Challenge::Analogy { .. } => panic!("expected a conclusion"),
        }
    }

    #[test]
    fn test_verdict_follows_coordinates() {
        let mut rng = StdRng::seed_from_u64(17);
        let state = grid(&[("A", 0, 0), ("B", 1, 0), ("C", 3, 2)]);

        for _ in 0..200 {
            let challenge = create_conclusion(&mut rng, &state, None, &GeneratorConfig::default()).unwrap();
            let conclusion = statement(&challenge);
            let offset = state.displacement(&conclusion.item_b, &conclusion.item_a).unwrap();
            assert_eq!(challenge.is_true(), offset == conclusion.direction.vector());
            assert_ne!(conclusion.item_a, conclusion.item_b);
        }
    }

    #[test]
    fn test_both_verdicts_occur_for_aligned_pair() {
        let mut rng = StdRng::seed_from_u64(2);
        let state = grid(&[("A", 0, 0), ("B", 0, 1)]);

        let verdicts: Vec<bool> = (0..100)
            .map(|_| {
                create_conclusion(&mut rng, &state, None, &GeneratorConfig::default())
                    .unwrap()
                    .is_true()
            })
            .collect();
        assert!(verdicts.iter().any(|v| *v));
        assert!(verdicts.iter().any(|v| !*v));
    }

    #[test]
    fn test_unaligned_pair_is_always_false() {
        let mut rng = StdRng::seed_from_u64(6);
        let state = grid(&[("A", 0, 0), ("B", 2, 1)]);

        for _ in 0..50 {
            let challenge = create_conclusion(&mut rng, &state, None, &GeneratorConfig::default()).unwrap();
            assert!(!challenge.is_true());
        }
    }

    #[test]
    fn test_false_direction_excludes_actual() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            assert_ne!(false_direction(&mut rng, Some(Direction::East)), Direction::East);
        }
    }

    #[test]
    fn test_avoids_last_premise_pair() {
        let mut rng = StdRng::seed_from_u64(8);
        let state = grid(&[("A", 0, 0), ("B", 1, 0), ("C", 1, 1)]);
        let premise = Premise::new("C".into(), Direction::North, "B".into());

        for _ in 0..100 {
            let challenge =
                create_conclusion(&mut rng, &state, Some(&premise), &GeneratorConfig::default()).unwrap();
            assert!(!challenge.repeats(&premise));
        }
    }

    #[test]
    fn test_relaxes_when_only_the_premise_pair_exists() {
        let mut rng = StdRng::seed_from_u64(8);
        let state = grid(&[("A", 0, 0), ("B", 1, 0)]);
        let premise = Premise::new("B".into(), Direction::East, "A".into());
        let config = GeneratorConfig {
            max_challenge_attempts: 5,
            ..Default::default()
        };

        let challenge = create_conclusion(&mut rng, &state, Some(&premise), &config).unwrap();
        assert!(challenge.repeats(&premise));
    }

    #[test]
    fn test_zero_attempts_is_exhausted() {
        let mut rng = StdRng::seed_from_u64(4);
        let state = grid(&[("A", 0, 0), ("B", 1, 0)]);
        let config = GeneratorConfig {
            max_challenge_attempts: 0,
            ..Default::default()
        };

        let result = create_conclusion(&mut rng, &state, None, &config);
        assert!(matches!(result, Err(EngineError::ChallengeExhausted(_))));
    }

    #[test]
    fn test_needs_two_tokens() {
        let mut rng = StdRng::seed_from_u64(1);
        let state = grid(&[("A", 0, 0)]);
        let result = create_conclusion(&mut rng, &state, None, &GeneratorConfig::default());
        assert!(matches!(result, Err(EngineError::NotEnoughTokens { .. })));
    }
}
