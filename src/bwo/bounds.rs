//! Sampling bounds for the initial population.

use crate::error::BwoError;

/// Search-space box used to sample the initial population.
///
/// Bounds only shape initialization: crossover and mutation may move
/// candidates outside of them.
///
/// # Examples
///
/// ```
/// use u_bwo::bwo::Bounds;
///
/// let b = Bounds::default();
/// assert_eq!(b.range(0), (-5.0, 5.0));
///
/// let b = Bounds::per_dimension(vec![(0.0, 1.0), (-2.0, 2.0)]);
/// assert_eq!(b.range(1), (-2.0, 2.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bounds {
    /// Same `[lo, hi]` for every dimension.
    Uniform {
        /// Lower bound (inclusive).
        lo: f64,
        /// Upper bound.
        hi: f64,
    },
    /// One `(lo, hi)` pair per dimension.
    PerDimension(Vec<(f64, f64)>),
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds::Uniform { lo: -5.0, hi: 5.0 }
    }
}

impl Bounds {
    /// Same range for every dimension.
    pub fn uniform(lo: f64, hi: f64) -> Self {
        Bounds::Uniform { lo, hi }
    }

    /// Symmetric range `[-half_width, half_width]`.
    pub fn symmetric(half_width: f64) -> Self {
        Bounds::Uniform {
            lo: -half_width,
            hi: half_width,
        }
    }

    /// Individual ranges, one per dimension.
    pub fn per_dimension(ranges: Vec<(f64, f64)>) -> Self {
        Bounds::PerDimension(ranges)
    }

    /// Range of dimension `dim`.
    ///
    /// For `PerDimension`, `dim` must be within the validated dimension.
    pub fn range(&self, dim: usize) -> (f64, f64) {
        match self {
            Bounds::Uniform { lo, hi } => (*lo, *hi),
            Bounds::PerDimension(ranges) => ranges[dim],
        }
    }

    /// Returns `true` if `candidate` lies inside the box.
    pub fn contains(&self, candidate: &[f64]) -> bool {
        candidate.iter().enumerate().all(|(j, &v)| {
            let (lo, hi) = self.range(j);
            v >= lo && v <= hi
        })
    }

    /// Checks that every range is finite and non-empty, and that
    /// per-dimension bounds match `dimension`.
    pub fn validate(&self, dimension: usize) -> Result<(), BwoError> {
        match self {
            Bounds::Uniform { lo, hi } => check_range(0, *lo, *hi),
            Bounds::PerDimension(ranges) => {
                if ranges.len() != dimension {
                    return Err(BwoError::invalid(format!(
                        "bounds cover {} dimensions but dimension is {}",
                        ranges.len(),
                        dimension
                    )));
                }
                ranges
                    .iter()
                    .enumerate()
                    .try_for_each(|(j, &(lo, hi))| check_range(j, lo, hi))
            }
        }
    }
}

fn check_range(dim: usize, lo: f64, hi: f64) -> Result<(), BwoError> {
    if !lo.is_finite() || !hi.is_finite() {
        return Err(BwoError::invalid(format!(
            "bounds for dimension {dim} must be finite, got [{lo}, {hi}]"
        )));
    }
    if lo >= hi {
        return Err(BwoError::invalid(format!(
            "bounds for dimension {dim} must satisfy lo < hi, got [{lo}, {hi}]"
        )));
    }
    if !(hi - lo).is_finite() {
        return Err(BwoError::invalid(format!(
            "bounds for dimension {dim} span more than f64 can represent: [{lo}, {hi}]"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_minus_five_to_five() {
        let b = Bounds::default();
        assert_eq!(b, Bounds::uniform(-5.0, 5.0));
        assert_eq!(b.range(17), (-5.0, 5.0));
        assert!(b.validate(3).is_ok());
    }

    #[test]
    fn test_symmetric() {
        assert_eq!(Bounds::symmetric(2.5).range(0), (-2.5, 2.5));
    }

    #[test]
    fn test_contains() {
        let b = Bounds::per_dimension(vec![(0.0, 1.0), (-1.0, 0.0)]);
        assert!(b.contains(&[0.5, -0.5]));
        assert!(b.contains(&[0.0, 0.0]));
        assert!(!b.contains(&[1.5, -0.5]));
    }

    #[test]
    fn test_reject_empty_range() {
        assert!(Bounds::uniform(1.0, 1.0).validate(2).is_err());
        assert!(Bounds::uniform(2.0, -2.0).validate(2).is_err());
    }

    #[test]
    fn test_reject_non_finite() {
        assert!(Bounds::uniform(f64::NEG_INFINITY, 0.0).validate(2).is_err());
        assert!(Bounds::uniform(0.0, f64::NAN).validate(2).is_err());
    }

    #[test]
    fn test_reject_overflowing_width() {
        let err = Bounds::uniform(-1e308, 1e308).validate(2).unwrap_err();
        assert!(err.is_invalid_parameter());
        let wide = Bounds::per_dimension(vec![(0.0, 1.0), (-f64::MAX, f64::MAX)]);
        assert!(wide.validate(2).is_err());
        assert!(Bounds::uniform(-1e307, 1e307).validate(2).is_ok());
    }

    #[test]
    fn test_reject_dimension_mismatch() {
        let b = Bounds::per_dimension(vec![(0.0, 1.0); 3]);
        assert!(b.validate(3).is_ok());
        assert!(b.validate(4).unwrap_err().is_invalid_parameter());
    }
}
