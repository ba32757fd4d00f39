//! The evolution engine.
//!
//! [`Engine`] owns one Mastermind session: the secret, the current
//! population with its cached scores, the generation counter and the
//! session state. A presentation layer drives it one generation at a time
//! with [`Engine::step`] or in a loop with [`Engine::run_to_convergence`],
//! and reads snapshots back through the accessors.
//!
//! # State machine
//!
//! ```text
//!            initialize / reset
//!                   │
//!                   ▼
//!   ┌────────── Running ──────────┐
//!   │ secret in population        │ generation cap reached
//!   ▼                             ▼
//! Found                       Exhausted
//! ```
//!
//! Every freshly scored population is checked straight away, so the state is
//! `Found` exactly when the current population contains the secret. `Found`
//! and `Exhausted` are terminal until [`Engine::reset`]; stepping a terminal
//! engine returns the last record unchanged.

use super::config::GaConfig;
use super::operators::{random_code, random_population};
use super::scoring::Score;
use super::selection::{distinct_pair, roulette_pair, truncate, uniform_pair, Selection};
use super::types::{Code, Population};
use crate::error::Result;
use crate::random::create_rng;
use rand::rngs::StdRng;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EngineState {
    /// Still searching.
    Running,
    /// The current population contains the secret.
    Found,
    /// The generation cap was reached without finding the secret.
    Exhausted,
}

/// Best individual of one generation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GenerationRecord {
    /// Generation index, starting at 0 for the initial population.
    pub generation: usize,
    /// Population slot of the best individual.
    pub best_slot: usize,
    /// The best individual.
    pub best_code: Code,
    /// Its score.
    pub best_score: Score,
}

/// Result of [`Engine::run_to_convergence`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RunOutcome {
    /// Whether the secret was found.
    pub found: bool,

    /// Generation counter when the run stopped. When `found`, this is the
    /// generation in which the secret first appeared.
    pub generations: usize,

    /// Best-of-generation records, starting with the generation the run
    /// began from.
    pub history: Vec<GenerationRecord>,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Engine state when the run stopped.
    pub state: EngineState,
}

/// Rolling record of the generations at which secrets were found.
///
/// Holds the most recent [`DiscoveryLog::CAPACITY`] discoveries of an
/// interactive session and survives [`Engine::reset`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiscoveryLog {
    entries: VecDeque<usize>,
}

impl DiscoveryLog {
    pub const CAPACITY: usize = 10;

    fn push(&mut self, generation: usize) {
        if self.entries.len() == Self::CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(generation);
    }

    /// Discoveries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Largest recorded generation count, for scaling a chart.
    pub fn max(&self) -> Option<usize> {
        self.entries.iter().copied().max()
    }
}

/// A Mastermind solving session driven by a genetic algorithm.
///
/// # Usage
///
/// ```
/// use mastermind_ga::ga::{Engine, EngineState, GaConfig};
///
/// let config = GaConfig::default().with_seed(42).with_max_generations(5000);
/// let mut engine = Engine::new(config).unwrap();
///
/// let outcome = engine.run_to_convergence(None);
/// assert_ne!(engine.state(), EngineState::Running);
/// assert_eq!(outcome.found, engine.state() == EngineState::Found);
/// ```
#[derive(Debug)]
pub struct Engine {
    config: GaConfig,
    rng: StdRng,
    secret: Code,
    population: Population,
    scores: Vec<Score>,
    generation: usize,
    state: EngineState,
    record: GenerationRecord,
    discoveries: DiscoveryLog,
    track_discoveries: bool,
}

impl Engine {
    /// Validates `config`, draws a secret and an initial population, and
    /// checks that population for a lucky solution.
    ///
    /// # Errors
    /// [`GaError::InvalidConfiguration`](crate::GaError::InvalidConfiguration)
    /// if `config` fails [`GaConfig::validate`].
    pub fn new(config: GaConfig) -> Result<Self> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        log::info!(
            "initializing mastermind session: length={} population={} rate={} seed={}",
            config.code_length,
            config.population_size,
            config.mutation_rate,
            seed
        );
        let mut rng = create_rng(seed);

        let secret = random_code(&config.palette, config.code_length, &mut rng);
        let population = random_population(
            &config.palette,
            config.code_length,
            config.population_size,
            &mut rng,
        );
        let scores = evaluate(&config, &population, &secret);
        let record = best_of(0, &population, &scores, config.code_length);

        let mut engine = Self {
            config,
            rng,
            secret,
            population,
            scores,
            generation: 0,
            state: EngineState::Running,
            record,
            discoveries: DiscoveryLog::default(),
            track_discoveries: true,
        };
        engine.settle();
        Ok(engine)
    }

    /// Starts a session with the default configuration and the given
    /// code length, population size and mutation rate.
    pub fn initialize(
        code_length: usize,
        population_size: usize,
        mutation_rate: f64,
    ) -> Result<Self> {
        Self::new(
            GaConfig::default()
                .with_code_length(code_length)
                .with_population_size(population_size)
                .with_mutation_rate(mutation_rate),
        )
    }

    /// Starts a new session with the same parameters.
    ///
    /// Draws a new secret and population and sets the generation to 0.
    /// The random stream continues, so a seeded engine stays reproducible.
    /// The [`DiscoveryLog`] is kept.
    pub fn reset(&mut self) {
        self.secret = random_code(&self.config.palette, self.config.code_length, &mut self.rng);
        self.population = random_population(
            &self.config.palette,
            self.config.code_length,
            self.config.population_size,
            &mut self.rng,
        );
        self.generation = 0;
        self.state = EngineState::Running;
        self.rescore();
        log::debug!("session reset");
        self.settle();
    }

    /// Advances one generation and returns its best-of-generation record.
    ///
    /// Outside [`EngineState::Running`] this is a no-op that returns the
    /// last record again.
    pub fn step(&mut self) -> GenerationRecord {
        if self.state != EngineState::Running {
            return self.record.clone();
        }

        let breed = match self.config.selection {
            Selection::Truncation => truncation_generation,
            Selection::Roulette => roulette_generation,
        };
        self.population = breed(&self.config, &self.population, &self.scores, &mut self.rng);
        debug_assert_eq!(self.population.len(), self.config.population_size);

        self.generation += 1;
        self.rescore();
        log::debug!(
            "generation {}: best exact={} partial={} fitness={}",
            self.generation,
            self.record.best_score.exact,
            self.record.best_score.partial,
            self.record.best_score.fitness
        );
        self.settle();
        self.record.clone()
    }

    /// Steps until the engine leaves [`EngineState::Running`] or `budget`
    /// steps have been taken.
    pub fn run_to_convergence(&mut self, budget: Option<usize>) -> RunOutcome {
        self.run_with_cancel(budget, None)
    }

    /// Like [`run_to_convergence`](Self::run_to_convergence) with an
    /// optional cancellation token.
    ///
    /// The flag is checked before every generation; once it reads `true`
    /// the run stops and returns what it has so far.
    pub fn run_with_cancel(
        &mut self,
        budget: Option<usize>,
        cancel: Option<Arc<AtomicBool>>,
    ) -> RunOutcome {
        let mut history = vec![self.record.clone()];
        let mut cancelled = false;
        let mut steps = 0usize;

        while self.state == EngineState::Running {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
            if budget.is_some_and(|b| steps >= b) {
                break;
            }
            history.push(self.step());
            steps += 1;
        }

        RunOutcome {
            found: self.state == EngineState::Found,
            generations: self.generation,
            history,
            cancelled,
            state: self.state,
        }
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Current generation index.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Read-only snapshot of the current population.
    pub fn current_population(&self) -> &Population {
        &self.population
    }

    /// Scores of the current population, in slot order.
    pub fn current_scores(&self) -> &[Score] {
        &self.scores
    }

    /// The secret. Callers decide whether to reveal it.
    pub fn current_secret(&self) -> &Code {
        &self.secret
    }

    /// Record of the current generation.
    pub fn last_record(&self) -> &GenerationRecord {
        &self.record
    }

    /// Recent discovery generations of this session.
    pub fn discoveries(&self) -> &DiscoveryLog {
        &self.discoveries
    }

    pub(crate) fn set_track_discoveries(&mut self, track: bool) {
        self.track_discoveries = track;
    }

    fn rescore(&mut self) {
        self.scores = evaluate(&self.config, &self.population, &self.secret);
        self.record = best_of(
            self.generation,
            &self.population,
            &self.scores,
            self.config.code_length,
        );
    }

    /// Leaves `Running` if the current population solves the secret or the
    /// generation cap is reached.
    fn settle(&mut self) {
        if self.record.best_score.is_solution(self.config.code_length) {
            self.state = EngineState::Found;
            if self.track_discoveries {
                self.discoveries.push(self.generation);
            }
            log::info!(
                "secret found in generation {} (slot {})",
                self.generation,
                self.record.best_slot
            );
        } else if self
            .config
            .max_generations
            .is_some_and(|cap| self.generation + 1 >= cap)
        {
            self.state = EngineState::Exhausted;
            log::info!(
                "generation cap reached after {} generations without a solution",
                self.generation + 1
            );
        }
    }
}

/// Scores a population whose codes all match the secret's length.
fn evaluate(config: &GaConfig, population: &Population, secret: &Code) -> Vec<Score> {
    population
        .codes()
        .iter()
        .map(|guess| config.scoring.score_aligned(guess.as_slice(), secret.as_slice()))
        .collect()
}

/// Picks the best individual: any solution first, then highest fitness,
/// then lowest slot.
fn best_of(
    generation: usize,
    population: &Population,
    scores: &[Score],
    length: usize,
) -> GenerationRecord {
    let mut best = 0;
    for (slot, score) in scores.iter().enumerate().skip(1) {
        let current = &scores[best];
        let better = match (score.is_solution(length), current.is_solution(length)) {
            (true, false) => true,
            (false, true) => false,
            _ => score.fitness > current.fitness,
        };
        if better {
            best = slot;
        }
    }
    GenerationRecord {
        generation,
        best_slot: best,
        best_code: population[best].clone(),
        best_score: scores[best],
    }
}

/// Keeps the best half in place, mutates it, and refills the vacated slots
/// with crossovers of two distinct survivors.
fn truncation_generation(
    config: &GaConfig,
    population: &Population,
    scores: &[Score],
    rng: &mut StdRng,
) -> Population {
    let keep = config.population_size / 2;
    let survivors: Vec<(usize, Code)> = truncate(scores, keep)
        .into_iter()
        .map(|slot| {
            let code = config
                .mutation
                .apply(&population[slot], config.mutation_rate, &config.palette, rng);
            (slot, code)
        })
        .collect();
    let parents: Vec<Code> = survivors.iter().map(|(_, code)| code.clone()).collect();

    Population::refill(config.population_size, survivors, |slot| {
        let (a, b) = distinct_pair(parents.len(), rng);
        log::trace!("slot {slot}: crossover of survivors {a} and {b}");
        config.crossover.apply(&parents[a], &parents[b], rng)
    })
}

/// Replaces the whole population with mutated children of roulette-drawn
/// parent pairs. Each pair yields two children, `p1 x p2` then `p2 x p1`.
fn roulette_generation(
    config: &GaConfig,
    population: &Population,
    scores: &[Score],
    rng: &mut StdRng,
) -> Population {
    let n = config.population_size;
    let mut children = Vec::with_capacity(n);

    while children.len() < n {
        let (a, b) = match roulette_pair(scores, rng) {
            Ok(pair) => pair,
            Err(err) => {
                log::debug!("{err}; drawing parents uniformly");
                uniform_pair(population.len(), rng)
            }
        };
        for (p1, p2) in [(a, b), (b, a)] {
            if children.len() == n {
                break;
            }
            let child = config.crossover.apply(&population[p1], &population[p2], rng);
            children.push(
                config
                    .mutation
                    .apply(&child, config.mutation_rate, &config.palette, rng),
            );
        }
    }
    Population::new(children)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::{Crossover, Mutation, Palette, Scorer};
    use crate::GaError;

    fn seeded(seed: u64) -> GaConfig {
        GaConfig::default()
            .with_palette(Palette::letters())
            .with_seed(seed)
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let err = Engine::new(GaConfig::default().with_population_size(2)).unwrap_err();
        assert!(matches!(
            err,
            GaError::InvalidConfiguration { parameter: "population_size", .. }
        ));
        assert!(Engine::initialize(9, 8, 0.1).is_err());
        assert!(Engine::initialize(4, 8, 1.1).is_err());
    }

    #[test]
    fn test_initialize_shapes() {
        let engine = Engine::initialize(5, 10, 0.2).unwrap();
        assert_eq!(engine.generation(), 0);
        assert_eq!(engine.current_secret().len(), 5);
        assert_eq!(engine.current_population().len(), 10);
        assert_eq!(engine.current_scores().len(), 10);
        assert_eq!(engine.last_record().generation, 0);
    }

    #[test]
    fn test_secret_fixed_across_generations() {
        let mut engine = Engine::new(seeded(3)).unwrap();
        let secret = engine.current_secret().clone();
        for _ in 0..50 {
            engine.step();
            assert_eq!(engine.current_secret(), &secret, "secret must not change");
        }
    }

    #[test]
    fn test_population_size_invariant() {
        for selection in [Selection::Truncation, Selection::Roulette] {
            for size in [4, 5, 7, 12] {
                let config = seeded(11)
                    .with_selection(selection)
                    .with_population_size(size)
                    .with_max_generations(200);
                let mut engine = Engine::new(config).unwrap();
                while engine.state() == EngineState::Running {
                    let before = engine.current_population().len();
                    engine.step();
                    assert_eq!(engine.current_population().len(), before);
                    assert_eq!(engine.current_scores().len(), size);
                }
            }
        }
    }

    #[test]
    fn test_scores_match_population() {
        let mut engine = Engine::new(seeded(5).with_max_generations(100)).unwrap();
        for _ in 0..20 {
            engine.step();
            let expected = engine
                .config()
                .scoring
                .score_population(engine.current_population(), engine.current_secret())
                .unwrap();
            assert_eq!(engine.current_scores(), expected.as_slice());
        }
    }

    #[test]
    fn test_step_idempotent_once_found() {
        let mut engine = Engine::new(seeded(42)).unwrap();
        let outcome = engine.run_to_convergence(Some(10_000));
        assert!(outcome.found);

        let generation = engine.generation();
        let record = engine.last_record().clone();
        for _ in 0..5 {
            assert_eq!(engine.step(), record);
            assert_eq!(engine.generation(), generation);
            assert_eq!(engine.state(), EngineState::Found);
        }
        assert!(record.best_score.is_solution(4));
        assert_eq!(&record.best_code, engine.current_secret());
    }

    #[test]
    fn test_found_population_preserved() {
        let mut engine = Engine::new(seeded(9)).unwrap();
        engine.run_to_convergence(Some(10_000));
        assert_eq!(engine.state(), EngineState::Found);

        let snapshot = engine.current_population().clone();
        engine.step();
        assert_eq!(engine.current_population(), &snapshot);
        assert!(snapshot.codes().contains(engine.current_secret()));
    }

    #[test]
    fn test_generation_cap_exhausts() {
        // Length 7 with mutation off cannot realistically be solved in
        // three generations.
        let config = seeded(1)
            .with_code_length(7)
            .with_mutation_rate(0.0)
            .with_max_generations(3);
        let mut engine = Engine::new(config).unwrap();
        let outcome = engine.run_to_convergence(None);

        assert!(!outcome.found);
        assert_eq!(outcome.state, EngineState::Exhausted);
        assert_eq!(outcome.generations, 2);
        assert_eq!(outcome.history.len(), 3);

        let generation = engine.generation();
        engine.step();
        assert_eq!(engine.generation(), generation);
    }

    #[test]
    fn test_cap_of_one_evaluates_initial_population_only() {
        let config = seeded(2).with_code_length(7).with_max_generations(1);
        let engine = Engine::new(config).unwrap();
        assert_ne!(engine.state(), EngineState::Running);
        assert_eq!(engine.generation(), 0);
    }

    #[test]
    fn test_budget_limits_steps() {
        let config = seeded(4).with_code_length(7).with_mutation_rate(0.0);
        let mut engine = Engine::new(config).unwrap();
        let outcome = engine.run_to_convergence(Some(3));
        assert!(outcome.generations <= 3);
        assert!(outcome.history.len() <= 4);
        assert_eq!(outcome.history[0].generation, 0);
    }

    #[test]
    fn test_history_generations_are_consecutive() {
        let mut engine = Engine::new(seeded(8).with_max_generations(500)).unwrap();
        let outcome = engine.run_to_convergence(None);
        for (i, record) in outcome.history.iter().enumerate() {
            assert_eq!(record.generation, i);
        }
        assert_eq!(
            outcome.history.last().map(|r| r.generation),
            Some(outcome.generations)
        );
    }

    #[test]
    fn test_cancellation() {
        let config = seeded(6).with_code_length(7).with_mutation_rate(0.0);
        let mut engine = Engine::new(config).unwrap();
        let cancel = Arc::new(AtomicBool::new(true));

        let outcome = engine.run_with_cancel(None, Some(cancel));
        assert!(outcome.cancelled || engine.state() != EngineState::Running);
        assert_eq!(outcome.generations, 0);
        assert_eq!(outcome.history.len(), 1);
    }

    #[test]
    fn test_reset_draws_new_session() {
        let mut engine = Engine::new(seeded(12)).unwrap();
        engine.run_to_convergence(Some(10_000));
        let old_secret = engine.current_secret().clone();
        let old_population = engine.current_population().clone();

        engine.reset();
        assert_eq!(engine.generation(), 0);
        assert_eq!(engine.last_record().generation, 0);
        assert_eq!(engine.current_population().len(), 8);
        assert!(
            engine.current_secret() != &old_secret
                || engine.current_population() != &old_population
        );
    }

    #[test]
    fn test_seeded_runs_reproducible() {
        let run = |seed| {
            let mut engine = Engine::new(seeded(seed).with_max_generations(300)).unwrap();
            let outcome = engine.run_to_convergence(None);
            (engine.current_secret().clone(), outcome.generations, outcome.history)
        };
        assert_eq!(run(77), run(77));
    }

    #[test]
    fn test_roulette_zero_fitness_falls_back() {
        let config = seeded(21).with_selection(Selection::Roulette);
        let mut rng = create_rng(21);
        let population = random_population(&config.palette, 4, 8, &mut rng);
        let zero = Score {
            exact: 0,
            partial: 0,
            fitness: 0.0,
        };
        let scores = vec![zero; 8];
        assert_eq!(
            roulette_pair(&scores, &mut rng),
            Err(GaError::DegenerateSelection)
        );

        let next = roulette_generation(&config, &population, &scores, &mut rng);
        assert_eq!(next.len(), 8);
        assert!(next.iter().all(|(_, code)| code.len() == 4));
    }

    #[test]
    fn test_roulette_zero_weights_keep_running() {
        // Zero weights keep total fitness at zero in every generation.
        let config = seeded(21)
            .with_code_length(7)
            .with_scoring(Scorer::new(0.0, 0.0))
            .with_selection(Selection::Roulette)
            .with_population_size(7)
            .with_max_generations(50);
        let mut engine = Engine::new(config).unwrap();
        while engine.state() == EngineState::Running {
            assert!(engine.current_scores().iter().all(|s| s.fitness == 0.0));
            engine.step();
            assert_eq!(engine.current_population().len(), 7);
        }
        assert!(engine.generation() > 0);
    }

    #[test]
    fn test_truncation_survivors_keep_their_slots() {
        // Length 7 makes a solved initial population vanishingly unlikely.
        let config = seeded(13)
            .with_code_length(7)
            .with_mutation_rate(0.0)
            .with_max_generations(100);
        let mut engine = Engine::new(config).unwrap();
        assert_eq!(engine.state(), EngineState::Running);

        let before = engine.current_population().clone();
        let survivors = truncate(engine.current_scores(), 4);
        assert_eq!(survivors.len(), 4);
        engine.step();
        for slot in survivors {
            assert_eq!(engine.current_population()[slot], before[slot]);
        }
    }

    #[test]
    fn test_all_operator_combinations_converge() {
        for selection in [Selection::Truncation, Selection::Roulette] {
            for crossover in [Crossover::SinglePoint, Crossover::Uniform] {
                for mutation in [Mutation::SinglePosition, Mutation::PerPosition] {
                    let config = seeded(42)
                        .with_selection(selection)
                        .with_crossover(crossover)
                        .with_mutation(mutation)
                        .with_mutation_rate(0.3)
                        .with_max_generations(20_000);
                    let mut engine = Engine::new(config).unwrap();
                    let outcome = engine.run_to_convergence(None);
                    assert!(
                        outcome.found,
                        "{selection:?}/{crossover:?}/{mutation:?} did not converge"
                    );
                }
            }
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_result_types_are_serde() {
        fn assert_serde<T: Serialize + for<'de> Deserialize<'de>>() {}
        assert_serde::<RunOutcome>();
        assert_serde::<DiscoveryLog>();
        assert_serde::<GenerationRecord>();
        assert_serde::<EngineState>();
    }

    #[test]
    fn test_discovery_log_rolls() {
        let mut log = DiscoveryLog::default();
        for g in 0..15 {
            log.push(g);
        }
        assert_eq!(log.len(), DiscoveryLog::CAPACITY);
        assert_eq!(log.iter().next(), Some(5));
        assert_eq!(log.max(), Some(14));
    }

    #[test]
    fn test_discoveries_survive_reset() {
        let mut engine = Engine::new(seeded(31)).unwrap();
        engine.run_to_convergence(Some(10_000));
        engine.reset();
        engine.run_to_convergence(Some(10_000));
        assert_eq!(engine.discoveries().len(), 2);
    }
}
