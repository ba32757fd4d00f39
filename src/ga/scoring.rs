//! Mastermind peg scoring.
//!
//! A guess is compared to the secret in two passes:
//!
//! 1. **Exact pass**: positions holding the same colour in both codes.
//! 2. **Partial pass**: over the remaining positions only, colours present in
//!    both codes regardless of position. Each secret peg can be claimed at
//!    most once, so a colour repeated in the guess but not in the secret is
//!    not over-counted.
//!
//! Fitness is the weighted sum `exact * exact_weight + partial * partial_weight`.
//! Higher fitness is better.

use super::types::{Code, Color, Palette, Population};
use crate::error::{GaError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Outcome of comparing one guess against the secret.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Score {
    /// Pegs with the right colour in the right position.
    pub exact: usize,
    /// Pegs with a right colour in a wrong position.
    pub partial: usize,
    /// Weighted sum driving selection.
    pub fitness: f64,
}

impl Score {
    /// Whether this score means the guess equals a secret of length `len`.
    pub fn is_solution(&self, len: usize) -> bool {
        self.exact == len
    }
}

/// Scoring rule and its weights.
///
/// # Examples
///
/// ```
/// use mastermind_ga::ga::{Palette, Scorer};
///
/// let palette = Palette::letters();
/// let secret = palette.parse_code("R R G B").unwrap();
/// let guess = palette.parse_code("R G G G").unwrap();
///
/// let score = Scorer::default().score(&guess, &secret).unwrap();
/// assert_eq!((score.exact, score.partial), (2, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Scorer {
    /// Fitness contributed by each exact match.
    pub exact_weight: f64,

    /// Fitness contributed by each partial match.
    ///
    /// Zero is valid and disables the partial contribution while still
    /// reporting partial counts.
    pub partial_weight: f64,

    /// Skip the partial pass entirely; `partial` is always 0.
    pub exact_only: bool,
}

impl Default for Scorer {
    fn default() -> Self {
        Self {
            exact_weight: 1.0,
            partial_weight: 0.5,
            exact_only: false,
        }
    }
}

impl Scorer {
    /// Scorer with the given weights and both passes enabled.
    pub fn new(exact_weight: f64, partial_weight: f64) -> Self {
        Self {
            exact_weight,
            partial_weight,
            exact_only: false,
        }
    }

    /// Two points per exact match, one per partial match.
    pub fn classic() -> Self {
        Self::new(2.0, 1.0)
    }

    /// Enables or disables exact-only scoring.
    pub fn with_exact_only(mut self, exact_only: bool) -> Self {
        self.exact_only = exact_only;
        self
    }

    /// Scores `guess` against `secret`.
    ///
    /// # Errors
    /// [`GaError::LengthMismatch`] if the codes differ in length.
    pub fn score(&self, guess: &Code, secret: &Code) -> Result<Score> {
        if guess.len() != secret.len() {
            return Err(GaError::LengthMismatch {
                guess: guess.len(),
                secret: secret.len(),
            });
        }
        Ok(self.score_aligned(guess.as_slice(), secret.as_slice()))
    }

    /// Scores every individual of a population, in slot order.
    pub fn score_population(&self, population: &Population, secret: &Code) -> Result<Vec<Score>> {
        population
            .codes()
            .iter()
            .map(|guess| self.score(guess, secret))
            .collect()
    }

    /// Scores two codes already known to have equal length.
    pub(crate) fn score_aligned(&self, guess: &[Color], secret: &[Color]) -> Score {
        debug_assert_eq!(guess.len(), secret.len());

        let mut exact = 0;
        let mut secret_left = [0usize; Palette::MAX_COLORS];
        let mut guess_left: Vec<Color> = Vec::with_capacity(guess.len());

        for (&g, &s) in guess.iter().zip(secret) {
            if g == s {
                exact += 1;
            } else {
                secret_left[s.index()] += 1;
                guess_left.push(g);
            }
        }

        let mut partial = 0;
        if !self.exact_only {
            for g in guess_left {
                let slot = &mut secret_left[g.index()];
                if *slot > 0 {
                    *slot -= 1;
                    partial += 1;
                }
            }
        }

        Score {
            exact,
            partial,
            fitness: exact as f64 * self.exact_weight + partial as f64 * self.partial_weight,
        }
    }
}
