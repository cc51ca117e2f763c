//! Error types for the optimizer.

use thiserror::Error;

/// Error returned by a fallible objective function.
pub type ObjectiveError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors produced by a Black Widow Optimization run.
#[derive(Debug, Error)]
pub enum BwoError {
    /// The configuration cannot produce a valid run.
    ///
    /// Raised before the first evaluation; the run never starts.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The objective function failed on a candidate.
    ///
    /// The current generation is abandoned and the error is returned as-is.
    #[error("objective evaluation failed at generation {generation}, candidate {index}: {source}")]
    Evaluation {
        /// Generation being evaluated (0 = initial population).
        generation: usize,
        /// Index of the failing candidate within the population.
        index: usize,
        /// Error reported by the objective.
        #[source]
        source: ObjectiveError,
    },

    /// Every evaluated candidate had a non-finite fitness.
    #[error("no finite fitness observed after {generations} generations")]
    NoFiniteFitness {
        /// Generations executed before giving up.
        generations: usize,
    },
}

impl BwoError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        BwoError::InvalidParameter(msg.into())
    }

    /// Returns `true` for [`BwoError::InvalidParameter`].
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, BwoError::InvalidParameter(_))
    }
}
