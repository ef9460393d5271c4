//! Game session - a headless play loop over the driver.
//!
//! A session opens in the memorization phase with the whole initial layout on
//! show. Continuing (or letting the memorization clock run out) advances the
//! window once and opens the answering phase. Every answer advances the
//! window again, right or wrong; only the round counter and the clock react
//! to correctness. The caller owns wall-clock time and reports it via
//! [`GameSession::tick`].

use lattice_rules::{
    Challenge, GameOverReason, Premise, ScoreRules, Scoreboard, SessionId, Settings,
    MEMORIZATION_SECONDS,
};
use serde::{Deserialize, Serialize};

use crate::driver::{PuzzleDriver, Round};
use crate::error::{EngineError, Result};

/// Where a session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Initial premises on show, no challenge yet.
    Memorizing,
    /// A challenge is live and the answer clock runs.
    Answering,
    GameOver(GameOverReason),
}

/// Result of one answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub scoreboard: Scoreboard,
    pub phase: Phase,
}

/// One play-through from opening layout to game over.
pub struct GameSession {
    id: SessionId,
    settings: Settings,
    rules: ScoreRules,
    driver: PuzzleDriver,
    round: Round,
    board: Scoreboard,
    phase: Phase,
    memorization_left: u32,
}

impl GameSession {
    /// Start a session seeded from system entropy.
    pub fn start(settings: Settings) -> Result<Self> {
        let settings = settings.normalized();
        Self::begin(PuzzleDriver::new(settings.clone()), settings)
    }

    /// Start a session that replays exactly for the same seed and answers.
    pub fn start_with_seed(settings: Settings, seed: u64) -> Result<Self> {
        let settings = settings.normalized();
        Self::begin(PuzzleDriver::with_seed(settings.clone(), seed), settings)
    }

    fn begin(mut driver: PuzzleDriver, settings: Settings) -> Result<Self> {
        let round = driver.start()?;
        let session = Self {
            id: SessionId::new(),
            board: Scoreboard::new(settings.initial_time),
            settings,
            rules: ScoreRules::default(),
            driver,
            round,
            phase: Phase::Memorizing,
            memorization_left: MEMORIZATION_SECONDS,
        };
        tracing::debug!(session = %session.id, "session started");
        Ok(session)
    }

    /// Replace the scoring increments.
    pub fn with_rules(mut self, rules: ScoreRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver(_))
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.board
    }

    pub fn memorization_left(&self) -> u32 {
        self.memorization_left
    }

    /// The current round, including the hidden challenge while memorizing.
    pub fn round(&self) -> &Round {
        &self.round
    }

    /// The live challenge; hidden while memorizing and after game over.
    pub fn challenge(&self) -> Option<&Challenge> {
        match self.phase {
            Phase::Answering => Some(&self.round.challenge),
            _ => None,
        }
    }

    /// Premises currently on show.
    pub fn premises(&self) -> &[Premise] {
        &self.round.premises
    }

    /// Leave memorization and ask the first challenge.
    pub fn continue_from_memorization(&mut self) -> Result<()> {
        if self.phase != Phase::Memorizing {
            return Err(EngineError::InvalidPhase(format!(
                "cannot continue from memorization in {:?}",
                self.phase
            )));
        }
        self.round = self.driver.advance(&self.round)?;
        self.phase = Phase::Answering;
        Ok(())
    }

    /// Report elapsed seconds to whichever clock is running.
    pub fn tick(&mut self, seconds: u32) -> Result<Phase> {
        match self.phase {
            Phase::Memorizing => {
                self.memorization_left = self.memorization_left.saturating_sub(seconds);
                if self.memorization_left == 0 {
                    self.continue_from_memorization()?;
                }
            }
            Phase::Answering => {
                if self.board.tick(seconds) {
                    self.finish(GameOverReason::Time);
                }
            }
            Phase::GameOver(_) => {}
        }
        Ok(self.phase)
    }

    /// Answer the live challenge and move to the next round.
    pub fn answer(&mut self, answer: bool) -> Result<AnswerOutcome> {
        if self.phase != Phase::Answering {
            return Err(EngineError::InvalidPhase(format!(
                "cannot answer in {:?}",
                self.phase
            )));
        }

        let correct = self.round.is_correct(answer);
        if correct {
            self.board.record_correct(&self.rules);
        } else {
            self.board.record_incorrect(&self.rules);
        }
        tracing::debug!(session = %self.id, correct, score = self.board.score, "answer recorded");

        if correct && self.board.round >= self.settings.total_rounds {
            self.finish(GameOverReason::Rounds);
        } else if self.board.is_out_of_time() {
            self.finish(GameOverReason::Time);
        } else {
            self.round = self.driver.advance(&self.round)?;
            if correct {
                self.board.next_round();
            }
        }

        Ok(AnswerOutcome {
            correct,
            scoreboard: self.board,
            phase: self.phase,
        })
    }

    /// End the session at the player's request.
    pub fn quit(&mut self) {
        if !self.is_over() {
            self.finish(GameOverReason::Quit);
        }
    }

    fn finish(&mut self, reason: GameOverReason) {
        tracing::debug!(session = %self.id, ?reason, score = self.board.score, "session over");
        self.phase = Phase::GameOver(reason);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_rules::ChallengeType;

    fn session(total_rounds: u32) -> GameSession {
        let settings = Settings {
            initial_premises: 5,
            initial_time: 30,
            total_rounds,
            challenge_type: ChallengeType::Mixed,
            ..Default::default()
        };
        GameSession::start_with_seed(settings, 7).unwrap()
    }

    fn right_answer(session: &GameSession) -> bool {
        session.challenge().map(Challenge::is_true).unwrap_or(false)
    }

    #[test]
    fn test_opens_in_memorization() {
        let session = session(5);
        assert_eq!(session.phase(), Phase::Memorizing);
        assert!(session.challenge().is_none());
        assert_eq!(session.premises().len(), 4);
        assert_eq!(session.memorization_left(), MEMORIZATION_SECONDS);
    }

    #[test]
    fn test_continue_advances_window() {
        let mut session = session(5);
        let oldest = session.round().state.oldest().cloned();

        session.continue_from_memorization().unwrap();

        assert_eq!(session.phase(), Phase::Answering);
        assert!(session.challenge().is_some());
        assert_eq!(session.round().evicted, oldest);
        assert_eq!(session.premises().len(), 1);
        assert!(session.continue_from_memorization().is_err());
    }

    #[test]
    fn test_memorization_clock_runs_out() {
        let mut session = session(5);
        assert_eq!(session.tick(20).unwrap(), Phase::Memorizing);
        assert_eq!(session.tick(10).unwrap(), Phase::Answering);
    }

    #[test]
    fn test_cannot_answer_while_memorizing() {
        let mut session = session(5);
        assert!(matches!(session.answer(true), Err(EngineError::InvalidPhase(_))));
    }

    #[test]
    fn test_correct_answers_finish_rounds() {
        let mut session = session(5);
        session.continue_from_memorization().unwrap();

        for expected_round in 1..=5 {
            assert_eq!(session.scoreboard().round, expected_round);
            let outcome = session.answer(right_answer(&session)).unwrap();
            assert!(outcome.correct);
        }

        assert_eq!(session.phase(), Phase::GameOver(GameOverReason::Rounds));
        assert_eq!(session.scoreboard().score, 50);
        assert!(session.challenge().is_none());
    }

    #[test]
    fn test_wrong_answer_still_advances() {
        let mut session = session(5);
        session.continue_from_memorization().unwrap();
        let before = session.round().state.clone();

        let outcome = session.answer(!right_answer(&session)).unwrap();

        assert!(!outcome.correct);
        assert_eq!(outcome.scoreboard.time_left, 20);
        assert_eq!(outcome.scoreboard.round, 1);
        assert_eq!(outcome.phase, Phase::Answering);
        assert_eq!(session.round().evicted.as_ref(), before.oldest());
    }

    #[test]
    fn test_wrong_answers_run_out_the_clock() {
        let mut session = session(5);
        session.continue_from_memorization().unwrap();

        for _ in 0..2 {
            session.answer(!right_answer(&session)).unwrap();
        }
        let outcome = session.answer(!right_answer(&session)).unwrap();
        assert_eq!(outcome.phase, Phase::GameOver(GameOverReason::Time));
        assert_eq!(outcome.scoreboard.time_left, 0);
    }

    #[test]
    fn test_answer_clock_runs_out() {
        let mut session = session(5);
        session.continue_from_memorization().unwrap();

        assert_eq!(session.tick(29).unwrap(), Phase::Answering);
        assert_eq!(session.tick(1).unwrap(), Phase::GameOver(GameOverReason::Time));
        assert_eq!(session.tick(1).unwrap(), Phase::GameOver(GameOverReason::Time));
    }

    #[test]
    fn test_quit() {
        let mut session = session(5);
        session.quit();
        assert_eq!(session.phase(), Phase::GameOver(GameOverReason::Quit));
        assert!(session.is_over());
        assert!(session.answer(true).is_err());
    }

    #[test]
    fn test_phase_serializes_reason() {
        let json = serde_json::to_value(Phase::GameOver(GameOverReason::Rounds)).unwrap();
        assert_eq!(json, serde_json::json!({ "GameOver": "rounds" }));
        assert_eq!(serde_json::to_value(Phase::Answering).unwrap(), "Answering");
    }

    #[test]
    fn test_settings_are_normalized() {
        let settings = Settings {
            initial_premises: 1,
            word_length: 9,
            ..Default::default()
        };
        let session = GameSession::start_with_seed(settings, 1).unwrap();
        assert_eq!(session.round().state.len(), 3);
        assert!(session.round().state.nodes().iter().all(|t| t.len() == 5));
    }
}
