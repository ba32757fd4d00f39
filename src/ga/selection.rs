//! Selection strategies.
//!
//! Selection decides which individuals contribute genetic material to the
//! next generation. Fitness here is **maximized**: a higher score is better.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, ch. 1 (roulette wheel)
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms" (truncation)

use super::scoring::Score;
use crate::error::{GaError, Result};
use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How survivors or parents are chosen each generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Selection {
    /// Keep the best half of the population in place.
    ///
    /// Survivors are mutated and the vacated slots are refilled with
    /// crossovers of two distinct survivors.
    #[default]
    Truncation,

    /// Fitness-proportionate parent draws, with replacement.
    ///
    /// The whole population is replaced by offspring each generation.
    /// When every individual scores zero, parents are drawn uniformly.
    Roulette,
}

/// Returns the slots of the `keep` fittest individuals, best first.
///
/// Ties are broken by ascending slot so the result is deterministic.
pub fn truncate(scores: &[Score], keep: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| {
        scores[b]
            .fitness
            .partial_cmp(&scores[a].fitness)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    order.truncate(keep);
    order
}

/// Draws two parents independently, each with probability proportional to
/// its fitness.
///
/// # Errors
/// [`GaError::DegenerateSelection`] if total fitness is not positive.
///
/// # Panics
/// Panics if `scores` is empty.
pub fn roulette_pair<R: Rng>(scores: &[Score], rng: &mut R) -> Result<(usize, usize)> {
    assert!(!scores.is_empty(), "cannot select from empty population");

    let total: f64 = scores.iter().map(|s| s.fitness).sum();
    if total <= 0.0 {
        return Err(GaError::DegenerateSelection);
    }
    Ok((spin(scores, total, rng), spin(scores, total, rng)))
}

/// One roulette wheel spin.
fn spin<R: Rng>(scores: &[Score], total: f64, rng: &mut R) -> usize {
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, score) in scores.iter().enumerate() {
        cumulative += score.fitness;
        if cumulative > threshold {
            return i;
        }
    }

    // floating-point fallback: last individual with non-zero weight
    scores
        .iter()
        .rposition(|s| s.fitness > 0.0)
        .unwrap_or(scores.len() - 1)
}

/// Draws two parents uniformly at random, with replacement.
///
/// # Panics
/// Panics if `n == 0`.
pub fn uniform_pair<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    assert!(n > 0, "cannot select from empty population");
    (rng.random_range(0..n), rng.random_range(0..n))
}

/// Draws two different positions out of `0..n`, without replacement.
///
/// With a single candidate both positions are `0`.
///
/// # Panics
/// Panics if `n == 0`.
pub fn distinct_pair<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    assert!(n > 0, "cannot select from empty population");
    if n == 1 {
        return (0, 0);
    }
    let first = rng.random_range(0..n);
    let mut second = rng.random_range(0..n - 1);
    if second >= first {
        second += 1;
    }
    (first, second)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn scores(fitnesses: &[f64]) -> Vec<Score> {
        fitnesses
            .iter()
            .map(|&fitness| Score {
                exact: 0,
                partial: 0,
                fitness,
            })
            .collect()
    }

    #[test]
    fn test_truncate_keeps_best_first() {
        let s = scores(&[1.0, 4.0, 2.5, 0.0, 3.0]);
        assert_eq!(truncate(&s, 2), vec![1, 4]);
        assert_eq!(truncate(&s, 5), vec![1, 4, 2, 0, 3]);
    }

    #[test]
    fn test_truncate_ties_by_slot() {
        let s = scores(&[2.0, 3.0, 2.0, 3.0, 2.0]);
        assert_eq!(truncate(&s, 4), vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_truncate_more_than_available() {
        let s = scores(&[1.0, 2.0]);
        assert_eq!(truncate(&s, 10), vec![1, 0]);
    }

    #[test]
    fn test_roulette_proportional() {
        let s = scores(&[1.0, 0.0, 3.0]);
        let mut rng = create_rng(42);

        let mut counts = [0u32; 3];
        let n = 10000;
        for _ in 0..n {
            let (a, b) = roulette_pair(&s, &mut rng).unwrap();
            counts[a] += 1;
            counts[b] += 1;
        }
        assert_eq!(counts[1], 0, "zero-fitness individual must never be drawn");
        // Expected ratio 1:3 over 2n draws
        assert!(
            counts[2] > 2 * counts[0],
            "fitter individual should dominate: {counts:?}"
        );
        assert!(counts[0] > 3000, "weaker individual still drawn: {counts:?}");
    }

    #[test]
    fn test_roulette_degenerate() {
        let s = scores(&[0.0, 0.0, 0.0]);
        let mut rng = create_rng(42);
        assert_eq!(
            roulette_pair(&s, &mut rng),
            Err(GaError::DegenerateSelection)
        );
    }

    #[test]
    fn test_roulette_single_candidate() {
        let s = scores(&[0.0, 2.0, 0.0]);
        let mut rng = create_rng(7);
        for _ in 0..100 {
            assert_eq!(roulette_pair(&s, &mut rng).unwrap(), (1, 1));
        }
    }

    #[test]
    fn test_uniform_pair_covers_range() {
        let mut rng = create_rng(42);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let (a, b) = uniform_pair(4, &mut rng);
            seen[a] = true;
            seen[b] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_distinct_pair_never_repeats() {
        let mut rng = create_rng(42);
        for n in 2..8 {
            for _ in 0..200 {
                let (a, b) = distinct_pair(n, &mut rng);
                assert_ne!(a, b);
                assert!(a < n && b < n);
            }
        }
        assert_eq!(distinct_pair(1, &mut rng), (0, 0));
    }

    #[test]
    #[should_panic(expected = "cannot select from empty population")]
    fn test_empty_population_panics() {
        let mut rng = create_rng(42);
        let _ = roulette_pair(&[], &mut rng);
    }
}
