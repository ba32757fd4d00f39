//! Batch experiments.
//!
//! Runs many independent sessions with the same configuration and collects
//! the generation at which each one found its secret, to study how quickly
//! a parameter set converges.

use super::engine::{Engine, EngineState};
use crate::error::{GaError, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Aggregate outcome of a batch of sessions.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExperimentSummary {
    /// Sessions started.
    pub runs: usize,

    /// Discovery generation of each successful session, in run order.
    pub discoveries: Vec<usize>,

    /// Sessions that hit the generation cap.
    pub exhausted: usize,

    /// Whether the batch was cancelled before completing.
    pub cancelled: bool,
}

impl ExperimentSummary {
    /// Mean discovery generation over successful sessions.
    pub fn mean_generations(&self) -> Option<f64> {
        if self.discoveries.is_empty() {
            return None;
        }
        Some(self.discoveries.iter().sum::<usize>() as f64 / self.discoveries.len() as f64)
    }

    /// Fastest discovery.
    pub fn min_generations(&self) -> Option<usize> {
        self.discoveries.iter().copied().min()
    }

    /// Slowest discovery.
    pub fn max_generations(&self) -> Option<usize> {
        self.discoveries.iter().copied().max()
    }

    /// Fraction of sessions that found their secret.
    pub fn success_rate(&self) -> f64 {
        if self.runs == 0 {
            0.0
        } else {
            self.discoveries.len() as f64 / self.runs as f64
        }
    }
}

/// Runs `count` independent sessions on `engine`.
///
/// Each session resets the engine and runs it to convergence. The engine is
/// left in the state of the last session; its interactive
/// [`DiscoveryLog`](super::DiscoveryLog) is not touched.
///
/// # Errors
/// [`GaError::InvalidConfiguration`] if the engine has no generation cap,
/// since a session that never converges would never return.
pub fn run_experiments(engine: &mut Engine, count: usize) -> Result<ExperimentSummary> {
    run_experiments_with_cancel(engine, count, None)
}

/// Like [`run_experiments`] with an optional cancellation token.
///
/// The flag is checked between sessions and at every generation boundary.
pub fn run_experiments_with_cancel(
    engine: &mut Engine,
    count: usize,
    cancel: Option<Arc<AtomicBool>>,
) -> Result<ExperimentSummary> {
    if engine.config().max_generations.is_none() {
        return Err(GaError::invalid(
            "max_generations",
            "must be set for batch experiments",
        ));
    }

    let mut summary = ExperimentSummary::default();
    engine.set_track_discoveries(false);

    for run in 0..count {
        if cancel.as_ref().is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            summary.cancelled = true;
            break;
        }

        engine.reset();
        let outcome = engine.run_with_cancel(None, cancel.clone());
        if outcome.cancelled {
            summary.cancelled = true;
            break;
        }

        summary.runs += 1;
        match outcome.state {
            EngineState::Found => summary.discoveries.push(outcome.generations),
            EngineState::Exhausted => summary.exhausted += 1,
            EngineState::Running => {}
        }
        log::debug!(
            "experiment {run}: {:?} after {} generations",
            outcome.state,
            outcome.generations
        );
    }

    engine.set_track_discoveries(true);
    log::info!(
        "experiments: {} runs, {} found, {} exhausted, mean generations {:?}",
        summary.runs,
        summary.discoveries.len(),
        summary.exhausted,
        summary.mean_generations()
    );
    Ok(summary)
}
