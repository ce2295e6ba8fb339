use std::fmt;

use thiserror::Error;

/// Identifies one of the two sample sequences passed to a fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Series {
    /// The independent variable, rotational speed.
    Speed,

    /// The dependent variable, a measured power or thrust.
    Observation,
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Speed => f.write_str("speed"),
            Self::Observation => f.write_str("observation"),
        }
    }
}

/// Errors that can occur while fitting a power law.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum FitError {
    /// The speed and observation sequences have different lengths.
    #[error("length mismatch: {speeds} speeds but {observations} observations")]
    LengthMismatch { speeds: usize, observations: usize },

    /// A sample is infinite or `NaN`.
    #[error("non-finite {series} at index {index}: {value}")]
    NonFiniteValue {
        /// Sequence containing the offending sample.
        series: Series,

        /// Position of the offending sample.
        index: usize,

        /// The offending value.
        value: f64,
    },

    /// A sample is zero or negative, so its logarithm is undefined.
    #[error("non-positive {series} at index {index}: {value}")]
    NonPositiveValue {
        /// Sequence containing the offending sample.
        series: Series,

        /// Position of the offending sample.
        index: usize,

        /// The offending value.
        value: f64,
    },

    /// The normal matrix is not invertible.
    ///
    /// Occurs with fewer than two samples or when all speeds are identical.
    #[error("singular design matrix from {samples} samples")]
    SingularMatrix { samples: usize },
}
