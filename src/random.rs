//! Seedable random source shared by every component.
//!
//! All randomness in the crate (code generation, crossover points,
//! mutation targets, roulette draws) flows through one [`StdRng`] created
//! here, so a fixed seed replays a whole session.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a deterministic RNG from a 64-bit seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
