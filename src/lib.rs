//! Genetic-algorithm solver for Mastermind.
//!
//! Evolves a small population of guesses toward a hidden code using
//! fitness-proportionate or truncation selection, crossover and mutation:
//!
//! - **Scoring**: Mastermind peg counting with duplicate-safe partial
//!   matches and configurable exact / partial weights.
//! - **Engine**: a single-threaded session state machine that a front-end
//!   drives one generation at a time or runs to convergence, with a
//!   cooperative cancellation flag and an optional generation cap.
//! - **Experiments**: batch runs that record the generation of discovery
//!   for convergence statistics.
//!
//! # Architecture
//!
//! The crate is the evolutionary core only. Rendering, input handling and
//! charts belong to the caller, which reads population, score and record
//! snapshots after each step. Logging goes through the `log` facade; install
//! any backend to see it.
//!
//! ```
//! use mastermind_ga::ga::{Engine, GaConfig};
//!
//! let mut engine = Engine::new(GaConfig::console().with_seed(7)).unwrap();
//! let record = engine.step();
//! assert!(record.best_score.exact <= 4);
//! ```

pub mod error;
pub mod ga;
pub mod random;

pub use error::{GaError, Result};
