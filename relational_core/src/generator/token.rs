//! Pronounceable nonsense words.

use lattice_rules::Token;
use rand::Rng;

use crate::error::{EngineError, Result};

pub const VOWELS: [char; 5] = ['A', 'E', 'I', 'O', 'U'];

pub const CONSONANTS: [char; 20] = [
    'B', 'C', 'D', 'F', 'G', 'H', 'J', 'K', 'L', 'M', 'N', 'P', 'R', 'S', 'T', 'V', 'W', 'X', 'Y',
    'Z',
];

/// Generate a word of `length` letters alternating consonant and vowel.
///
/// A coin flip decides whether the word opens with a vowel. No uniqueness
/// is guaranteed; see [`fresh_token`].
pub fn generate_word<R: Rng + ?Sized>(rng: &mut R, length: usize) -> Token {
    let starts_with_vowel = rng.gen_bool(0.5);
    let word: String = (0..length)
        .map(|i| {
            let vowel_slot = (i % 2 == 0) == starts_with_vowel;
            let alphabet: &[char] = if vowel_slot { &VOWELS } else { &CONSONANTS };
            alphabet[rng.gen_range(0..alphabet.len())]
        })
        .collect();
    Token::new(word)
}

/// Generate words until one is not rejected by `is_taken`.
pub fn fresh_token<R, F>(rng: &mut R, length: usize, max_attempts: usize, is_taken: F) -> Result<Token>
where
    R: Rng + ?Sized,
    F: Fn(&Token) -> bool,
{
    for _ in 0..max_attempts {
        let candidate = generate_word(rng, length);
        if !is_taken(&candidate) {
            return Ok(candidate);
        }
    }
    Err(EngineError::TokenSpaceExhausted {
        length,
        attempts: max_attempts,
    })
}
