//! Code generation, crossover and mutation operators.
//!
//! Every operator returns a fresh [`Code`]; inputs are never modified.
//!
//! # Crossover Operators
//!
//! - [`single_point_crossover`]: prefix of one parent, suffix of the other
//! - [`uniform_crossover`]: each peg taken from either parent with equal odds
//!
//! # Mutation Operators
//!
//! - [`mutate_single_position`]: at most one peg changes per call
//! - [`mutate_per_position`]: every peg may change independently
//!
//! Both mutation operators draw the replacement colour from the palette
//! *excluding* the current colour, so a mutated peg always changes.

use super::types::{Code, Color, Palette, Population};
use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Generation
// ============================================================================

/// A code of `length` pegs, each drawn uniformly from the palette.
pub fn random_code<R: Rng>(palette: &Palette, length: usize, rng: &mut R) -> Code {
    let n = palette.len();
    Code::new(
        (0..length)
            .map(|_| Color(rng.random_range(0..n) as u8))
            .collect(),
    )
}

/// `count` independent random codes of `length` pegs.
pub fn random_population<R: Rng>(
    palette: &Palette,
    length: usize,
    count: usize,
    rng: &mut R,
) -> Population {
    Population::new(
        (0..count)
            .map(|_| random_code(palette, length, rng))
            .collect(),
    )
}

// ============================================================================
// Crossover
// ============================================================================

/// Recombination policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Crossover {
    /// Cut at a point in `[1, L-1]`; see [`single_point_crossover`].
    SinglePoint,
    /// Per-peg coin flip; see [`uniform_crossover`].
    #[default]
    Uniform,
}

impl Crossover {
    /// Produces one child from two parents.
    pub fn apply<R: Rng>(&self, parent1: &Code, parent2: &Code, rng: &mut R) -> Code {
        match self {
            Crossover::SinglePoint => single_point_crossover(parent1, parent2, rng),
            Crossover::Uniform => uniform_crossover(parent1, parent2, rng),
        }
    }
}

/// Single-point crossover.
///
/// Picks a cut uniformly in `[1, L-1]` and joins `parent1[..cut]` with
/// `parent2[cut..]`. A single-peg code has no interior cut point, so the
/// child is a copy of `parent1`.
///
/// # Panics
/// Panics if parents have different lengths.
pub fn single_point_crossover<R: Rng>(parent1: &Code, parent2: &Code, rng: &mut R) -> Code {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");

    if n < 2 {
        return parent1.clone();
    }

    let cut = rng.random_range(1..n);
    let mut pegs = Vec::with_capacity(n);
    pegs.extend_from_slice(&parent1.as_slice()[..cut]);
    pegs.extend_from_slice(&parent2.as_slice()[cut..]);
    Code::new(pegs)
}

/// Uniform crossover: each peg comes from either parent with probability 1/2.
///
/// # Panics
/// Panics if parents have different lengths.
pub fn uniform_crossover<R: Rng>(parent1: &Code, parent2: &Code, rng: &mut R) -> Code {
    assert_eq!(parent1.len(), parent2.len(), "parents must have equal length");

    Code::new(
        parent1
            .iter()
            .zip(parent2)
            .map(|(&a, &b)| if rng.random_bool(0.5) { a } else { b })
            .collect(),
    )
}

// ============================================================================
// Mutation
// ============================================================================

/// Mutation policy. `rate` is a probability in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Mutation {
    /// With probability `rate`, one random peg of the individual changes.
    SinglePosition,
    /// Each peg independently changes with probability `rate`.
    #[default]
    PerPosition,
}

impl Mutation {
    /// Returns a possibly mutated copy of `code`.
    pub fn apply<R: Rng>(&self, code: &Code, rate: f64, palette: &Palette, rng: &mut R) -> Code {
        match self {
            Mutation::SinglePosition => mutate_single_position(code, rate, palette, rng),
            Mutation::PerPosition => mutate_per_position(code, rate, palette, rng),
        }
    }
}

/// With probability `rate`, replaces one uniformly chosen peg by a different
/// colour.
pub fn mutate_single_position<R: Rng>(
    code: &Code,
    rate: f64,
    palette: &Palette,
    rng: &mut R,
) -> Code {
    if code.is_empty() || rng.random_range(0.0..1.0) >= rate {
        return code.clone();
    }
    let index = rng.random_range(0..code.len());
    let color = different_color(palette, code[index], rng);
    log::trace!("mutating peg {index}: {:?} -> {:?}", code[index], color);
    code.with_peg(index, color)
}

/// Replaces each peg by a different colour with probability `rate`,
/// independently per position.
pub fn mutate_per_position<R: Rng>(
    code: &Code,
    rate: f64,
    palette: &Palette,
    rng: &mut R,
) -> Code {
    Code::new(
        code.iter()
            .map(|&current| {
                if rng.random_range(0.0..1.0) < rate {
                    different_color(palette, current, rng)
                } else {
                    current
                }
            })
            .collect(),
    )
}

/// Draws a colour uniformly from the palette minus `current`.
///
/// # Panics
/// Panics if the palette has fewer than two colours.
pub fn different_color<R: Rng>(palette: &Palette, current: Color, rng: &mut R) -> Color {
    let n = palette.len();
    assert!(n >= 2, "palette needs at least two colours to mutate");

    let mut pick = rng.random_range(0..n - 1);
    if pick >= current.index() {
        pick += 1;
    }
    Color(pick as u8)
}

// ============================================================================
// Tests
// ============================================================================
