//! BWO generation loop.
//!
//! [`BwoRunner`] orchestrates a run:
//! initialize → evaluate → track → (select → reproduce → cannibalize →
//! mutate → merge → evaluate → track) until the stopping policy fires.

use super::config::{BwoConfig, PopulationSizing};
use super::operators::{
    cannibalize, find_best, initialize_population, merge, mutate, normalize_size, reproduce,
    select_parents,
};
use super::termination::{MaxGenerations, RunState, StopReason, StoppingPolicy};
use super::types::Objective;
use crate::error::{BwoError, ObjectiveError};
use log::{debug, info, trace, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Result of a BWO run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BwoResult {
    /// Best candidate found during the entire run.
    pub best: Vec<f64>,

    /// Fitness of [`best`](Self::best). Always finite.
    pub best_fitness: f64,

    /// Generations executed.
    pub generations: usize,

    /// Total objective evaluations, initial population included.
    pub evaluations: usize,

    /// Why the run ended.
    pub stop_reason: StopReason,

    /// Incumbent fitness after initialization and after each generation.
    ///
    /// Entries are `+inf` until a finite fitness has been observed.
    pub fitness_history: Vec<f64>,
}

/// Executes Black Widow Optimization.
///
/// # Usage
///
/// ```
/// use u_bwo::bwo::{BwoConfig, BwoRunner};
///
/// let sphere = |x: &[f64]| x.iter().map(|v| v * v).sum::<f64>();
/// let config = BwoConfig::new(3).with_seed(42);
/// let result = BwoRunner::run(&sphere, &config).unwrap();
/// assert!(result.best_fitness >= 0.0);
/// assert_eq!(result.generations, 100);
/// ```
pub struct BwoRunner;

impl BwoRunner {
    /// Runs BWO with an RNG seeded from [`BwoConfig::seed`].
    pub fn run<O: Objective + ?Sized>(
        objective: &O,
        config: &BwoConfig,
    ) -> Result<BwoResult, BwoError> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        Self::run_with_rng(objective, config, &mut rng)
    }

    /// Runs BWO drawing every random number from `rng`.
    ///
    /// [`BwoConfig::seed`] is ignored.
    pub fn run_with_rng<O: Objective + ?Sized, R: Rng>(
        objective: &O,
        config: &BwoConfig,
        rng: &mut R,
    ) -> Result<BwoResult, BwoError> {
        let policy = MaxGenerations(config.max_generations);
        Self::run_with_policy(objective, config, &policy, rng)
    }

    /// Runs BWO with a custom stopping policy.
    ///
    /// The policy is checked after each generation;
    /// [`BwoConfig::max_generations`] still caps the run.
    pub fn run_with_policy<O, S, R>(
        objective: &O,
        config: &BwoConfig,
        policy: &S,
        rng: &mut R,
    ) -> Result<BwoResult, BwoError>
    where
        O: Objective + ?Sized,
        S: StoppingPolicy + ?Sized,
        R: Rng,
    {
        config.validate()?;

        let n = config.population_size;
        let n_r = config.reproduction_count();
        let cannibal_count = config.cannibalism_count();
        let mutant_count = config.mutant_count();
        debug!(
            "bwo start: N={} D={} parents={} cannibals={} mutants={} max_generations={}",
            n, config.dimension, n_r, cannibal_count, mutant_count, config.max_generations
        );

        // Initialize and evaluate
        let mut population = initialize_population(n, config.dimension, &config.bounds, rng);
        let mut fitness = evaluate_population(objective, &population, 0, config.parallel)?;
        let mut evaluations = population.len();

        let mut incumbent = Incumbent::default();
        incumbent.offer(&population, &fitness, 0);

        // The budget may be effectively unbounded when a custom policy ends the run.
        let mut fitness_history =
            Vec::with_capacity(config.max_generations.saturating_add(1).min(1024));
        fitness_history.push(incumbent.fitness_or_worst());

        let mut generation = 0usize;
        let mut stop_reason = StopReason::MaxGenerations;

        while generation < config.max_generations {
            let parents = select_parents(&population, &fitness, n_r);

            let mut children = reproduce(&parents, rng);
            cannibalize(&mut children, &parents, cannibal_count);
            let mutants = mutate(&children, mutant_count, rng);

            let mut next = merge(children, mutants);
            if config.sizing == PopulationSizing::Fixed {
                normalize_size(&mut next, n, &parents);
            }

            generation += 1;
            fitness = evaluate_population(objective, &next, generation, config.parallel)?;
            population = next;
            evaluations += population.len();

            if !incumbent.offer(&population, &fitness, generation)
                && fitness.iter().all(|f| !f.is_finite())
            {
                warn!("generation {generation}: every candidate has non-finite fitness");
            }
            fitness_history.push(incumbent.fitness_or_worst());

            trace!(
                "generation {}: population={} best={:?}",
                generation,
                population.len(),
                incumbent.fitness()
            );

            let state = RunState {
                generation,
                best_fitness: incumbent.fitness(),
                fitness_history: &fitness_history,
                evaluations,
                generations_since_improvement: generation - incumbent.found_at,
            };
            if let Some(reason) = policy.should_stop(&state) {
                stop_reason = reason;
                break;
            }
        }

        let Some((best, best_fitness)) = incumbent.best else {
            return Err(BwoError::NoFiniteFitness {
                generations: generation,
            });
        };

        info!(
            "bwo finished after {} generations ({:?}): best fitness {}",
            generation, stop_reason, best_fitness
        );

        Ok(BwoResult {
            best,
            best_fitness,
            generations: generation,
            evaluations,
            stop_reason,
            fitness_history,
        })
    }
}

/// Global best across all generations.
#[derive(Debug, Default)]
struct Incumbent {
    best: Option<(Vec<f64>, f64)>,
    /// Generation of the last strict improvement.
    found_at: usize,
}

impl Incumbent {
    /// Replaces the incumbent if this population holds a strictly better
    /// finite candidate. Returns `true` on replacement.
    fn offer(&mut self, population: &[Vec<f64>], fitness: &[f64], generation: usize) -> bool {
        let Some((candidate, f)) = find_best(population, fitness) else {
            return false;
        };
        let improves = match &self.best {
            Some((_, current)) => f < *current,
            None => true,
        };
        if improves {
            debug!("generation {generation}: new best fitness {f}");
            self.best = Some((candidate.to_vec(), f));
            self.found_at = generation;
        }
        improves
    }

    fn fitness(&self) -> Option<f64> {
        self.best.as_ref().map(|(_, f)| *f)
    }

    fn fitness_or_worst(&self) -> f64 {
        self.fitness().unwrap_or(f64::INFINITY)
    }
}

/// Scores every candidate, preserving population order.
///
/// The sequential path stops at the first failing candidate.
fn evaluate_population<O: Objective + ?Sized>(
    objective: &O,
    population: &[Vec<f64>],
    generation: usize,
    parallel: bool,
) -> Result<Vec<f64>, BwoError> {
    let failed = |index: usize| {
        move |source: ObjectiveError| BwoError::Evaluation {
            generation,
            index,
            source,
        }
    };

    #[cfg(feature = "parallel")]
    if parallel {
        use rayon::prelude::*;
        let scores: Vec<Result<f64, ObjectiveError>> =
            population.par_iter().map(|c| objective.evaluate(c)).collect();
        return scores
            .into_iter()
            .enumerate()
            .map(|(index, score)| score.map_err(failed(index)))
            .collect();
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    population
        .iter()
        .enumerate()
        .map(|(index, c)| objective.evaluate(c).map_err(failed(index)))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
