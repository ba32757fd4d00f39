//! Genetic algorithm for the Mastermind code-breaking puzzle.
//!
//! A population of candidate guesses evolves against a hidden secret until
//! one guess matches it peg for peg. Each generation is scored, survivors
//! or parents are selected, and offspring are produced by crossover and
//! mutation.
//!
//! # Key Types
//!
//! - [`Palette`], [`Code`], [`Population`]: the data being evolved
//! - [`Scorer`]: exact / partial peg counting and fitness weights
//! - [`GaConfig`]: all session parameters, validated against [`Bounds`]
//! - [`Engine`]: the session state machine (`step`, `run_to_convergence`, `reset`)
//!
//! # Submodules
//!
//! - [`operators`]: code generation, crossover and mutation
//! - [`selection`]: truncation and roulette-wheel selection
//! - [`experiment`]: batch runs collecting discovery statistics
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Berghman, Goossens & Leus (2009), "Efficient solutions for Mastermind
//!   using genetic algorithms"

mod config;
mod engine;
pub mod experiment;
pub mod operators;
mod scoring;
pub mod selection;
mod types;

pub use config::{Bounds, GaConfig};
pub use engine::{DiscoveryLog, Engine, EngineState, GenerationRecord, RunOutcome};
pub use experiment::{run_experiments, run_experiments_with_cancel, ExperimentSummary};
pub use operators::{Crossover, Mutation};
pub use scoring::{Score, Scorer};
pub use selection::Selection;
pub use types::{Code, Color, Palette, Population};
