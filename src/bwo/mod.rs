//! Black Widow Optimization (BWO).
//!
//! A population-based metaheuristic for continuous minimization. Each
//! generation the fittest candidates mate by single-point crossover, the
//! leading children are replaced by elite parents (cannibalism), and
//! perturbed copies of random children join the next generation.
//!
//! # Core Trait
//!
//! - [`Objective`]: the function being minimized; any `Fn(&[f64]) -> f64`
//!   qualifies, fallible functions go through [`TryObjective`]
//!
//! # Key Types
//!
//! - [`BwoConfig`]: population size, dimension, rates, bounds, budget
//! - [`BwoRunner`]: executes the generation loop
//! - [`BwoResult`]: best candidate with run statistics
//!
//! # Submodules
//!
//! - [`operators`]: the individual generation steps
//! - [`termination`]: stopping policies (fixed budget, target, stagnation)
//!
//! # References
//!
//! - Hayyolalam & Pourhaji Kazem (2020), "Black Widow Optimization
//!   Algorithm: A novel meta-heuristic approach for solving engineering
//!   optimization problems", *Eng. Appl. Artif. Intell.* 87, 103249

mod bounds;
mod config;
pub mod operators;
mod runner;
pub mod termination;
mod types;

pub use bounds::Bounds;
pub use config::{BwoConfig, PopulationSizing};
pub use runner::{BwoResult, BwoRunner};
pub use termination::{StopReason, StoppingPolicy};
pub use types::{Objective, TryObjective};
