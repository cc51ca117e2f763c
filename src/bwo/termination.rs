//! Stopping policies.
//!
//! The runner consults a [`StoppingPolicy`] after every generation. The
//! default is [`MaxGenerations`], a fixed budget; [`TargetFitness`] and
//! [`Stagnation`] end a run early, and [`AnyOf`] combines policies.
//!
//! Whatever the policy, [`super::BwoConfig::max_generations`] remains a
//! hard cap.

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StopReason {
    /// The generation budget was exhausted.
    MaxGenerations,
    /// The incumbent reached the target fitness.
    TargetReached,
    /// No strict improvement within the stagnation window.
    Stagnated,
}

/// Snapshot of a run handed to a [`StoppingPolicy`].
#[derive(Debug, Clone, Copy)]
pub struct RunState<'a> {
    /// Generations completed so far.
    pub generation: usize,
    /// Incumbent best fitness, `None` until a finite fitness is seen.
    pub best_fitness: Option<f64>,
    /// Incumbent fitness after initialization and after each generation.
    pub fitness_history: &'a [f64],
    /// Objective evaluations performed so far.
    pub evaluations: usize,
    /// Consecutive generations without strict improvement.
    pub generations_since_improvement: usize,
}

/// Decides whether the run should end after the current generation.
pub trait StoppingPolicy {
    /// Returns the reason to stop, or `None` to continue.
    fn should_stop(&self, state: &RunState<'_>) -> Option<StopReason>;
}

/// Stop after a fixed number of generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxGenerations(pub usize);

impl StoppingPolicy for MaxGenerations {
    fn should_stop(&self, state: &RunState<'_>) -> Option<StopReason> {
        (state.generation >= self.0).then_some(StopReason::MaxGenerations)
    }
}

/// Stop once the incumbent fitness is at or below a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetFitness(pub f64);

impl StoppingPolicy for TargetFitness {
    fn should_stop(&self, state: &RunState<'_>) -> Option<StopReason> {
        match state.best_fitness {
            Some(f) if f <= self.0 => Some(StopReason::TargetReached),
            _ => None,
        }
    }
}

/// Stop after `window` consecutive generations without strict improvement.
///
/// A window of 0 never fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stagnation {
    /// Generations without improvement that trigger a stop.
    pub window: usize,
}

impl StoppingPolicy for Stagnation {
    fn should_stop(&self, state: &RunState<'_>) -> Option<StopReason> {
        (self.window > 0 && state.generations_since_improvement >= self.window)
            .then_some(StopReason::Stagnated)
    }
}

/// Stop when any inner policy fires; the first one in order wins.
#[derive(Default)]
pub struct AnyOf(pub Vec<Box<dyn StoppingPolicy>>);

impl AnyOf {
    /// Creates an empty combinator, which never fires.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a policy.
    pub fn or(mut self, policy: impl StoppingPolicy + 'static) -> Self {
        self.0.push(Box::new(policy));
        self
    }
}

impl StoppingPolicy for AnyOf {
    fn should_stop(&self, state: &RunState<'_>) -> Option<StopReason> {
        self.0.iter().find_map(|p| p.should_stop(state))
    }
}
