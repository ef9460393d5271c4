//! Game mechanics: fixed-increment scoring, the answer clock and game-over reasons.

use serde::{Deserialize, Serialize};

/// Seconds the player gets to memorize the initial premises.
pub const MEMORIZATION_SECONDS: u32 = 30;

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameOverReason {
    /// The answer clock ran out.
    Time,
    /// The final round was answered correctly.
    Rounds,
    /// The player left.
    Quit,
}

/// Fixed score and clock increments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRules {
    pub points_per_correct: u32,
    pub time_bonus: u32,
    pub time_penalty: u32,
}

impl Default for ScoreRules {
    fn default() -> Self {
        Self {
            points_per_correct: 10,
            time_bonus: 10,
            time_penalty: 10,
        }
    }
}

/// Running score, remaining answer time and current round of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub score: u32,
    pub time_left: u32,
    /// Upper bound for `time_left`.
    pub time_limit: u32,
    /// 1-based; advances only on correct answers.
    pub round: u32,
}

impl Scoreboard {
    /// A fresh board with a full clock.
    pub fn new(time_limit: u32) -> Self {
        Self {
            score: 0,
            time_left: time_limit,
            time_limit,
            round: 1,
        }
    }

    /// Award a correct answer: score up, clock refilled up to the limit.
    pub fn record_correct(&mut self, rules: &ScoreRules) {
        self.score += rules.points_per_correct;
        self.time_left = (self.time_left + rules.time_bonus).min(self.time_limit);
    }

    /// Penalize an incorrect answer: clock down, floored at zero.
    pub fn record_incorrect(&mut self, rules: &ScoreRules) {
        self.time_left = self.time_left.saturating_sub(rules.time_penalty);
    }

    /// Burn clock time. Returns `true` once the clock is empty.
    pub fn tick(&mut self, seconds: u32) -> bool {
        self.time_left = self.time_left.saturating_sub(seconds);
        self.is_out_of_time()
    }

    pub fn is_out_of_time(&self) -> bool {
        self.time_left == 0
    }

    pub fn next_round(&mut self) {
        self.round += 1;
    }
}
