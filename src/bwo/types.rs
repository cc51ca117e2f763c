//! Objective function contract.

use crate::error::ObjectiveError;

/// The function being minimized.
///
/// Maps a candidate vector of length [`super::BwoConfig::dimension`] to a
/// scalar fitness. Lower is better.
///
/// Any `Fn(&[f64]) -> f64` closure is an objective. Non-finite results
/// (`NaN`, `±inf`) are legal: such candidates rank last and never become
/// the incumbent best.
///
/// # Examples
///
/// ```
/// use u_bwo::bwo::Objective;
///
/// let sphere = |x: &[f64]| x.iter().map(|v| v * v).sum::<f64>();
/// assert_eq!(sphere.evaluate(&[1.0, 2.0]).unwrap(), 5.0);
/// ```
///
/// # Thread Safety
///
/// `Objective` must be `Send + Sync` because the runner may evaluate a
/// population in parallel with rayon (`parallel` feature).
pub trait Objective: Send + Sync {
    /// Scores one candidate.
    ///
    /// An `Err` aborts the run with [`crate::BwoError::Evaluation`].
    fn evaluate(&self, candidate: &[f64]) -> Result<f64, ObjectiveError>;
}

impl<F> Objective for F
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    fn evaluate(&self, candidate: &[f64]) -> Result<f64, ObjectiveError> {
        Ok(self(candidate))
    }
}

/// Adapts a fallible closure into an [`Objective`].
///
/// ```
/// use u_bwo::bwo::{Objective, TryObjective};
///
/// let guarded = TryObjective(|x: &[f64]| {
///     if x[0] < 0.0 {
///         Err("negative bandwidth".to_string())
///     } else {
///         Ok(x[0])
///     }
/// });
/// assert!(guarded.evaluate(&[-1.0]).is_err());
/// assert_eq!(guarded.evaluate(&[2.0]).unwrap(), 2.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TryObjective<F>(pub F);

impl<F, E> Objective for TryObjective<F>
where
    F: Fn(&[f64]) -> Result<f64, E> + Send + Sync,
    E: Into<ObjectiveError>,
{
    fn evaluate(&self, candidate: &[f64]) -> Result<f64, ObjectiveError> {
        (self.0)(candidate).map_err(Into::into)
    }
}
