//! Player settings and their TOML representation.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::Path;

/// Which kind of challenge the generator should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeType {
    /// Single-relation questions only.
    Conclusions,
    /// Two-relation comparisons only (falls back to conclusions below four tokens).
    Analogies,
    /// A fair coin picks per round.
    #[default]
    Mixed,
}

/// Failure to read a settings file.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid settings file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to encode settings: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Session configuration supplied by the outer layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Size of the token window.
    #[serde(alias = "initialPremises")]
    pub initial_premises: usize,

    /// Answer clock, in seconds.
    #[serde(alias = "initialTime")]
    pub initial_time: u32,

    /// Correct answers needed to finish.
    #[serde(alias = "totalRounds")]
    pub total_rounds: u32,

    #[serde(alias = "challengeType")]
    pub challenge_type: ChallengeType,

    /// Letters per generated token.
    #[serde(alias = "wordLength")]
    pub word_length: usize,

    /// Debug visualization only; the engine ignores it.
    #[serde(alias = "devMode")]
    pub dev_mode: bool,
}

impl Settings {
    pub const PREMISES_RANGE: RangeInclusive<usize> = 3..=8;
    pub const TIME_RANGE: RangeInclusive<u32> = 15..=60;
    pub const ROUNDS_RANGE: RangeInclusive<u32> = 5..=25;
    pub const WORD_LENGTH_RANGE: RangeInclusive<usize> = 3..=5;

    /// Parse settings from TOML. Missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(content)?)
    }

    /// Read settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string(self)?)
    }

    /// Clamp every option into its supported range.
    pub fn normalized(mut self) -> Self {
        let original = self.clone();

        self.initial_premises = clamp(self.initial_premises, &Self::PREMISES_RANGE);
        self.initial_time = clamp(self.initial_time, &Self::TIME_RANGE);
        self.total_rounds = clamp(self.total_rounds, &Self::ROUNDS_RANGE);
        self.word_length = clamp(self.word_length, &Self::WORD_LENGTH_RANGE);

        if self != original {
            tracing::warn!(?original, normalized = ?self, "settings clamped into supported ranges");
        }
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            initial_premises: 5,
            initial_time: 30,
            total_rounds: 10,
            challenge_type: ChallengeType::Mixed,
            word_length: 3,
            dev_mode: false,
        }
    }
}

fn clamp<T: Ord + Copy>(value: T, range: &RangeInclusive<T>) -> T {
    value.clamp(*range.start(), *range.end())
}
