//! Engine configuration.
//!
//! [`GaConfig`] holds every parameter of a Mastermind session: the colour
//! alphabet, code length, population size, operator policies, scoring
//! weights, an optional generation cap and seed. Nothing is hardcoded in
//! the engine; all values, including the [`Bounds`] they are validated
//! against, can be overridden.

use super::operators::{Crossover, Mutation};
use super::scoring::Scorer;
use super::selection::Selection;
use super::types::Palette;
use crate::error::{GaError, Result};
use std::ops::RangeInclusive;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Supported ranges for the user-facing parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bounds {
    pub code_length: RangeInclusive<usize>,
    pub population_size: RangeInclusive<usize>,
    pub mutation_rate: RangeInclusive<f64>,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            code_length: 1..=7,
            population_size: 4..=12,
            mutation_rate: 0.0..=1.0,
        }
    }
}

/// Configuration for a Mastermind GA session.
///
/// # Defaults
///
/// ```
/// use mastermind_ga::ga::{GaConfig, Selection};
///
/// let config = GaConfig::default();
/// assert_eq!(config.code_length, 4);
/// assert_eq!(config.population_size, 8);
/// assert_eq!(config.selection, Selection::Truncation);
/// assert!(config.max_generations.is_none());
/// ```
///
/// # Builder Pattern
///
/// ```
/// use mastermind_ga::ga::{Crossover, GaConfig, Selection};
///
/// let config = GaConfig::default()
///     .with_code_length(5)
///     .with_population_size(10)
///     .with_selection(Selection::Roulette)
///     .with_crossover(Crossover::SinglePoint)
///     .with_max_generations(1000)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GaConfig {
    /// Colour alphabet for the secret and every guess.
    pub palette: Palette,

    /// Number of pegs per code.
    pub code_length: usize,

    /// Number of individuals per generation.
    pub population_size: usize,

    /// Mutation probability in `[0, 1]`; its meaning depends on
    /// [`mutation`](Self::mutation).
    pub mutation_rate: f64,

    /// Scoring rule and fitness weights.
    pub scoring: Scorer,

    /// Survivor / parent selection strategy.
    pub selection: Selection,

    /// Recombination policy.
    pub crossover: Crossover,

    /// Mutation policy.
    pub mutation: Mutation,

    /// Maximum number of generations evaluated per session.
    ///
    /// `None` lets the engine run until the secret is found.
    pub max_generations: Option<usize>,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Ranges checked by [`validate`](Self::validate).
    pub bounds: Bounds,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            palette: Palette::classic(),
            code_length: 4,
            population_size: 8,
            mutation_rate: 0.1,
            scoring: Scorer::default(),
            selection: Selection::default(),
            crossover: Crossover::default(),
            mutation: Mutation::default(),
            max_generations: None,
            seed: None,
            bounds: Bounds::default(),
        }
    }
}

impl GaConfig {
    /// Sets the colour palette.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Sets the code length.
    pub fn with_code_length(mut self, length: usize) -> Self {
        self.code_length = length;
        self
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the mutation rate. Out-of-range values are rejected by
    /// [`validate`](Self::validate), not clamped.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the scoring rule.
    pub fn with_scoring(mut self, scoring: Scorer) -> Self {
        self.scoring = scoring;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Sets the crossover policy.
    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.crossover = crossover;
        self
    }

    /// Sets the mutation policy.
    pub fn with_mutation(mut self, mutation: Mutation) -> Self {
        self.mutation = mutation;
        self
    }

    /// Caps the number of generations per session.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = Some(n);
        self
    }

    /// Removes the generation cap.
    pub fn without_generation_cap(mut self) -> Self {
        self.max_generations = None;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replaces the validation bounds.
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Preset mirroring the text console solver.
    ///
    /// - Palette: `R G B Y O P`, length 4, population 8, rate 0.1
    /// - Scoring: 2 per exact, 1 per partial
    /// - Roulette selection, single-point crossover, single-position mutation
    /// - Cap: 1000 generations
    pub fn console() -> Self {
        Self {
            palette: Palette::letters(),
            scoring: Scorer::classic(),
            selection: Selection::Roulette,
            crossover: Crossover::SinglePoint,
            mutation: Mutation::SinglePosition,
            max_generations: Some(1000),
            ..Self::default()
        }
    }

    /// Preset mirroring the interactive board.
    ///
    /// - Named palette, length 4, population 8, rate 0.1
    /// - Exact-only scoring
    /// - Truncation selection, uniform crossover, per-position mutation
    pub fn interactive() -> Self {
        Self {
            scoring: Scorer::default().with_exact_only(true),
            ..Self::default()
        }
    }

    /// Returns a copy with code length, population size and mutation rate
    /// pulled to the nearest supported bound.
    ///
    /// This is the lenient alternative to [`validate`](Self::validate) for
    /// front-ends that accept free-form input. A NaN rate becomes the lower
    /// bound.
    ///
    /// # Errors
    /// [`GaError::InvalidConfiguration`] if the [`Bounds`] themselves are
    /// unusable, e.g. a reversed range.
    pub fn clamped(mut self) -> Result<Self> {
        self.validate_bounds()?;
        let b = &self.bounds;
        self.code_length = self
            .code_length
            .clamp(*b.code_length.start(), *b.code_length.end());
        self.population_size = self
            .population_size
            .clamp(*b.population_size.start(), *b.population_size.end());
        self.mutation_rate = if self.mutation_rate.is_nan() {
            *b.mutation_rate.start()
        } else {
            self.mutation_rate
                .clamp(*b.mutation_rate.start(), *b.mutation_rate.end())
        };
        Ok(self)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// [`GaError::InvalidConfiguration`] naming the first offending parameter.
    pub fn validate(&self) -> Result<()> {
        self.validate_bounds()?;
        let b = &self.bounds;

        if !b.code_length.contains(&self.code_length) {
            return Err(GaError::invalid(
                "code_length",
                format!("must be in {:?}, got {}", b.code_length, self.code_length),
            ));
        }
        if !b.population_size.contains(&self.population_size) {
            return Err(GaError::invalid(
                "population_size",
                format!("must be in {:?}, got {}", b.population_size, self.population_size),
            ));
        }
        if !b.mutation_rate.contains(&self.mutation_rate) {
            return Err(GaError::invalid(
                "mutation_rate",
                format!("must be in {:?}, got {}", b.mutation_rate, self.mutation_rate),
            ));
        }

        if self.palette.len() < 2 || self.palette.len() > Palette::MAX_COLORS {
            return Err(GaError::invalid(
                "palette",
                format!(
                    "must hold between 2 and {} colours, got {}",
                    Palette::MAX_COLORS,
                    self.palette.len()
                ),
            ));
        }

        for (name, weight) in [
            ("scoring.exact_weight", self.scoring.exact_weight),
            ("scoring.partial_weight", self.scoring.partial_weight),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(GaError::invalid(
                    name,
                    format!("must be finite and non-negative, got {weight}"),
                ));
            }
        }

        if self.max_generations == Some(0) {
            return Err(GaError::invalid("max_generations", "must be positive or None"));
        }
        Ok(())
    }

    /// Checks that every [`Bounds`] range is non-empty and sensible.
    fn validate_bounds(&self) -> Result<()> {
        let b = &self.bounds;

        if b.code_length.is_empty() || *b.code_length.start() == 0 {
            return Err(GaError::invalid(
                "bounds.code_length",
                format!(
                    "must be a non-empty range of positive lengths, got {:?}",
                    b.code_length
                ),
            ));
        }
        if b.population_size.is_empty() || *b.population_size.start() < 2 {
            return Err(GaError::invalid(
                "bounds.population_size",
                format!(
                    "must be a non-empty range starting at 2 or more, got {:?}",
                    b.population_size
                ),
            ));
        }
        if b.mutation_rate.is_empty()
            || *b.mutation_rate.start() < 0.0
            || *b.mutation_rate.end() > 1.0
        {
            return Err(GaError::invalid(
                "bounds.mutation_rate",
                format!(
                    "must be a non-empty range within [0, 1], got {:?}",
                    b.mutation_rate
                ),
            ));
        }
        Ok(())
    }
}
