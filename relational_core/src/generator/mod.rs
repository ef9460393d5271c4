//! Generators - token words and lattice layouts.
//!
//! Every reject-and-retry loop in this module is capped by a
//! [`GeneratorConfig`]. Loops build candidates on the side and only commit a
//! result once it satisfies its constraint, so a failed attempt leaves no trace.

mod layout;
mod token;

pub use layout::*;
pub use token::*;

/// Retry caps for the rejection-sampling loops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Draws allowed when looking for a token not already live.
    pub max_token_attempts: usize,

    /// Random direction draws against one reference before the exhaustive scan.
    pub max_placement_attempts: usize,

    /// Whole-statement rebuilds allowed before a challenge constraint is relaxed.
    pub max_challenge_attempts: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_token_attempts: 1_000,
            max_placement_attempts: 32,
            max_challenge_attempts: 200,
        }
    }
}
