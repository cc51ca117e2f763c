//! BWO configuration.
//!
//! [`BwoConfig`] holds every parameter that controls a run. Derived counts
//! (parents, cannibalized children, mutants) are computed from it by
//! truncating the rate products, so `N = 50, reproduction_rate = 0.6`
//! yields exactly 30 parents.

use super::bounds::Bounds;
use crate::error::BwoError;

/// How the merged population is sized between generations.
///
/// The classic algorithm merges `N_R` children with `floor(N × mutation_rate)`
/// mutants, so the population drifts away from `N` after the first
/// generation. [`PopulationSizing::Fixed`] restores `N` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PopulationSizing {
    /// Next generation is exactly children followed by mutants.
    #[default]
    Reference,
    /// Truncate to `N`, or pad with copies of the best parents up to `N`.
    Fixed,
}

/// Configuration for Black Widow Optimization.
///
/// # Defaults
///
/// ```
/// use u_bwo::bwo::{Bounds, BwoConfig};
///
/// let config = BwoConfig::new(3);
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.max_generations, 100);
/// assert_eq!(config.bounds, Bounds::uniform(-5.0, 5.0));
/// assert_eq!(config.reproduction_count(), 30);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_bwo::bwo::BwoConfig;
///
/// let config = BwoConfig::new(8)
///     .with_population_size(120)
///     .with_reproduction_rate(0.5)
///     .with_cannibalism_rate(0.25)
///     .with_mutation_rate(0.4)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.cannibalism_count(), 2);
/// assert_eq!(config.mutant_count(), 48);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BwoConfig {
    /// Size `N` of the initial population.
    ///
    /// Also the base for the parent count and the mutant count.
    pub population_size: usize,

    /// Dimensionality `D` of every candidate vector.
    pub dimension: usize,

    /// Fraction of `N` selected as parents (0.0–1.0).
    pub reproduction_rate: f64,

    /// Fraction of `D` used to size the elite replacement step (0.0–1.0).
    ///
    /// Scaled by dimension, not by the parent pool: for small `D` this
    /// often rounds down to zero and disables cannibalism.
    pub cannibalism_rate: f64,

    /// Fraction of `N` generated as mutants each generation (0.0–1.0).
    pub mutation_rate: f64,

    /// Generation budget. Also the hard cap for custom stopping policies.
    pub max_generations: usize,

    /// Sampling box for the initial population.
    pub bounds: Bounds,

    /// Population size policy after each merge.
    pub sizing: PopulationSizing,

    /// Whether to evaluate the population in parallel using rayon.
    ///
    /// Only honored with the `parallel` feature. Results are identical
    /// either way.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl BwoConfig {
    /// Creates a configuration for `dimension`-dimensional candidates.
    pub fn new(dimension: usize) -> Self {
        Self {
            population_size: 50,
            dimension,
            reproduction_rate: 0.6,
            cannibalism_rate: 0.2,
            mutation_rate: 0.3,
            max_generations: 100,
            bounds: Bounds::default(),
            sizing: PopulationSizing::default(),
            parallel: true,
            seed: None,
        }
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the dimensionality.
    pub fn with_dimension(mut self, d: usize) -> Self {
        self.dimension = d;
        self
    }

    /// Sets the reproduction rate. Values outside [0, 1] fail validation.
    pub fn with_reproduction_rate(mut self, rate: f64) -> Self {
        self.reproduction_rate = rate;
        self
    }

    /// Sets the cannibalism rate. Values outside [0, 1] fail validation.
    pub fn with_cannibalism_rate(mut self, rate: f64) -> Self {
        self.cannibalism_rate = rate;
        self
    }

    /// Sets the mutation rate. Values outside [0, 1] fail validation.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the generation budget.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the sampling bounds.
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Sets the population sizing policy.
    pub fn with_sizing(mut self, sizing: PopulationSizing) -> Self {
        self.sizing = sizing;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of parents `N_R = floor(N × reproduction_rate)`.
    ///
    /// Also the number of children produced per generation.
    pub fn reproduction_count(&self) -> usize {
        (self.population_size as f64 * self.reproduction_rate) as usize
    }

    /// Number of children overwritten by elite parents,
    /// `floor(cannibalism_rate × D)`.
    pub fn cannibalism_count(&self) -> usize {
        (self.cannibalism_rate * self.dimension as f64) as usize
    }

    /// Number of mutants per generation, `floor(N × mutation_rate)`.
    pub fn mutant_count(&self) -> usize {
        (self.population_size as f64 * self.mutation_rate) as usize
    }

    /// Validates the configuration.
    ///
    /// Every rejection is a [`BwoError::InvalidParameter`]; a config that
    /// passes cannot hit an empty pool or a degenerate draw mid-run.
    pub fn validate(&self) -> Result<(), BwoError> {
        if self.population_size == 0 {
            return Err(BwoError::invalid("population_size must be positive"));
        }
        if self.dimension == 0 {
            return Err(BwoError::invalid("dimension must be positive"));
        }
        if self.dimension == 1 {
            return Err(BwoError::invalid(
                "dimension must be at least 2: single-point crossover needs a cut in [1, D-1]",
            ));
        }
        check_rate("reproduction_rate", self.reproduction_rate)?;
        check_rate("cannibalism_rate", self.cannibalism_rate)?;
        check_rate("mutation_rate", self.mutation_rate)?;

        let n_r = self.reproduction_count();
        if n_r < 2 {
            return Err(BwoError::invalid(format!(
                "reproduction_rate {} too small for population_size {}: {} parents, need at least 2",
                self.reproduction_rate, self.population_size, n_r
            )));
        }
        self.bounds.validate(self.dimension)
    }
}

fn check_rate(name: &str, rate: f64) -> Result<(), BwoError> {
    if (0.0..=1.0).contains(&rate) {
        Ok(())
    } else {
        Err(BwoError::invalid(format!("{name} must be within [0, 1], got {rate}")))
    }
}
