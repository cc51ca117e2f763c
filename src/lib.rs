//! Black Widow Optimization for continuous parameter tuning.
//!
//! Minimizes an opaque objective `f: R^D -> R` using only point
//! evaluations. Typical use is trading off several competing metrics that
//! have been folded into one scalar score.
//!
//! - [`optimize`]: one-call entry point returning the best vector and its
//!   fitness
//! - [`bwo`]: configuration, runner, individual operators, and stopping
//!   policies for finer control
//!
//! Every random draw comes from one seedable RNG, so identical seeds and
//! parameters reproduce a run bit for bit.
//!
//! # Example
//!
//! ```
//! use u_bwo::{optimize, bwo::Bounds};
//!
//! let sphere = |x: &[f64]| x.iter().map(|v| v * v).sum::<f64>();
//! let (best, fitness) =
//!     optimize(40, 3, 0.6, 0.2, 0.3, &sphere, Bounds::default(), 100, Some(7)).unwrap();
//! assert_eq!(best.len(), 3);
//! assert!(fitness >= 0.0);
//! ```

pub mod bwo;
mod error;

pub use error::{BwoError, ObjectiveError};

use bwo::{Bounds, BwoConfig, BwoRunner, Objective};

/// Runs Black Widow Optimization and returns `(best_vector, best_fitness)`.
///
/// Parameters map onto [`BwoConfig`]: population size `n`, dimension `d`,
/// the three rates, sampling `bounds`, generation budget, and seed
/// (`None` for a random one). Use [`BwoRunner`] directly for run
/// statistics or a custom stopping policy.
///
/// # Errors
///
/// [`BwoError::InvalidParameter`] for an unusable configuration,
/// [`BwoError::Evaluation`] when the objective fails, and
/// [`BwoError::NoFiniteFitness`] when no candidate ever scored finite.
#[allow(clippy::too_many_arguments)]
pub fn optimize<O: Objective + ?Sized>(
    n: usize,
    d: usize,
    reproduction_rate: f64,
    cannibalism_rate: f64,
    mutation_rate: f64,
    objective: &O,
    bounds: Bounds,
    max_generations: usize,
    seed: Option<u64>,
) -> Result<(Vec<f64>, f64), BwoError> {
    let mut config = BwoConfig::new(d)
        .with_population_size(n)
        .with_reproduction_rate(reproduction_rate)
        .with_cannibalism_rate(cannibalism_rate)
        .with_mutation_rate(mutation_rate)
        .with_bounds(bounds)
        .with_max_generations(max_generations);
    config.seed = seed;

    let result = BwoRunner::run(objective, &config)?;
    Ok((result.best, result.best_fitness))
}
