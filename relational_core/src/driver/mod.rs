//! Puzzle Evolution Driver - one call per round transition.

use lattice_rules::{Challenge, Premise, PuzzleState, Settings, Token};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::challenge::{is_correct_answer, ChallengeGenerator};
use crate::error::Result;
use crate::generator::{advance, place_initial, GeneratorConfig};
use crate::relation_graph::RelationGraph;

/// Everything one round hands to the outer layer.
///
/// Rounds are replaced wholesale; nothing in a round is mutated after it is built.
#[derive(Debug, Clone)]
pub struct Round {
    pub state: PuzzleState,

    /// Dense graph rebuilt from `state`; the authority for answers.
    pub graph: RelationGraph,

    pub challenge: Challenge,

    /// Premises to show: the whole opening layout on the first round,
    /// the single new placement afterwards.
    pub premises: Vec<Premise>,

    /// Token evicted to make room for this round, if any.
    pub evicted: Option<Token>,
}

impl Round {
    /// The premise the challenge was kept away from.
    pub fn last_premise(&self) -> Option<&Premise> {
        self.premises.last()
    }

    /// Check an answer against this round's graph.
    pub fn is_correct(&self, answer: bool) -> bool {
        is_correct_answer(&self.challenge, &self.graph, answer)
    }
}

/// Drives the token window from round to round.
pub struct PuzzleDriver {
    settings: Settings,
    config: GeneratorConfig,
    generator: ChallengeGenerator,
    rng: StdRng,
}

impl PuzzleDriver {
    /// Create a new driver seeded from system entropy.
    pub fn new(settings: Settings) -> Self {
        Self::from_rng(settings, StdRng::from_entropy())
    }

    /// Create a driver whose rounds replay exactly for the same seed.
    pub fn with_seed(settings: Settings, seed: u64) -> Self {
        Self::from_rng(settings, StdRng::seed_from_u64(seed))
    }

    fn from_rng(settings: Settings, rng: StdRng) -> Self {
        let config = GeneratorConfig::default();
        Self {
            settings,
            config,
            generator: ChallengeGenerator::new(config),
            rng,
        }
    }

    /// Replace the retry caps.
    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self.generator = ChallengeGenerator::new(config);
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Lay out the opening window and ask the first challenge.
    pub fn start(&mut self) -> Result<Round> {
        let layout = place_initial(
            &mut self.rng,
            self.settings.initial_premises,
            self.settings.word_length,
            &self.config,
        )?;
        let graph = RelationGraph::build_dense(&layout.state);
        let challenge = self.generator.next(
            &mut self.rng,
            &layout.state,
            self.settings.challenge_type,
            layout.last_premise(),
        )?;

        tracing::debug!(tokens = layout.state.len(), %challenge, "started puzzle");
        Ok(Round {
            state: layout.state,
            graph,
            challenge,
            premises: layout.premises,
            evicted: None,
        })
    }

    /// Evict the oldest token, place a new one and ask the next challenge.
    pub fn advance(&mut self, previous: &Round) -> Result<Round> {
        let step = advance(
            &mut self.rng,
            &previous.state,
            self.settings.word_length,
            &self.config,
        )?;
        let graph = RelationGraph::build_dense(&step.state);
        let challenge = self.generator.next(
            &mut self.rng,
            &step.state,
            self.settings.challenge_type,
            Some(&step.premise),
        )?;

        tracing::debug!(evicted = %step.oldest, %challenge, "advanced puzzle");
        Ok(Round {
            state: step.state,
            graph,
            challenge,
            premises: vec![step.premise],
            evicted: Some(step.oldest),
        })
    }
}
