//! Log-linear least-squares estimation of power laws.

mod config;
mod error;

pub use config::{FitConfig, FitMethod};
pub use error::{FitError, Series};

use nalgebra::{DMatrix, DVector};
use tracing::trace;

use super::PowerLaw;

/// A power law estimated from samples, with goodness-of-fit statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerLawFit {
    /// The fitted law.
    pub law: PowerLaw,

    /// Statistics of the fit, evaluated in log–log space.
    pub statistics: FitStatistics,
}

/// Goodness-of-fit statistics of a log-linear fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitStatistics {
    /// Number of samples used.
    pub samples: usize,

    /// Residual sum of squares of `ln(y)`.
    pub residual_sum_of_squares: f64,

    /// Coefficient of determination of `ln(y)` on `ln(x)`.
    ///
    /// Equal to one for an exact fit, including when all observations
    /// are identical.
    pub r_squared: f64,
}

/// Fits `y = k·x^m` to the samples using the default [`FitConfig`].
///
/// # Errors
///
/// See [`fit_with`].
pub fn fit(x: &[f64], y: &[f64]) -> Result<PowerLawFit, FitError> {
    fit_with(x, y, &FitConfig::default())
}

/// Fits `y = k·x^m` to the samples by ordinary least squares in log–log space.
///
/// The design matrix has rows `[1, ln(x_i)]` and the right-hand side is
/// `ln(y_i)`. The intercept of the solution is `ln(k)` and the slope is `m`.
/// Two samples give an exact fit through both points.
///
/// # Errors
///
/// - [`FitError::LengthMismatch`] if `x` and `y` differ in length.
/// - [`FitError::NonFiniteValue`] if any value is infinite or `NaN`.
/// - [`FitError::NonPositiveValue`] if any value is zero or negative, since
///   its logarithm is undefined.
/// - [`FitError::SingularMatrix`] if fewer than two samples are given or all
///   `x` values are identical.
pub fn fit_with(x: &[f64], y: &[f64], config: &FitConfig) -> Result<PowerLawFit, FitError> {
    if x.len() != y.len() {
        return Err(FitError::LengthMismatch {
            speeds: x.len(),
            observations: y.len(),
        });
    }

    let log_x = logarithms(x, Series::Speed)?;
    let log_y = logarithms(y, Series::Observation)?;

    let samples = log_x.len();
    if samples < 2 || is_rank_deficient(&log_x, config.rank_tol) {
        return Err(FitError::SingularMatrix { samples });
    }

    let design = DMatrix::from_fn(samples, 2, |i, j| if j == 0 { 1.0 } else { log_x[i] });
    let rhs = DVector::from_vec(log_y);

    let beta = config
        .method
        .solve(&design, &rhs)
        .ok_or(FitError::SingularMatrix { samples })?;

    let residuals = &rhs - &design * &beta;
    let residual_sum_of_squares = residuals.norm_squared();
    let mean = rhs.mean();
    let total_sum_of_squares: f64 = rhs.iter().map(|v| (v - mean).powi(2)).sum();
    let r_squared = if total_sum_of_squares > 0.0 {
        1.0 - residual_sum_of_squares / total_sum_of_squares
    } else {
        1.0
    };

    let law = PowerLaw::new(beta[0].exp(), beta[1]);
    trace!(
        samples,
        coefficient = law.coefficient,
        exponent = law.exponent,
        r_squared,
        method = ?config.method,
        "fitted power law"
    );

    Ok(PowerLawFit {
        law,
        statistics: FitStatistics {
            samples,
            residual_sum_of_squares,
            r_squared,
        },
    })
}

/// Takes the natural logarithm of every value, rejecting non-finite and
/// non-positive input.
fn logarithms(values: &[f64], series: Series) -> Result<Vec<f64>, FitError> {
    values
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            if !value.is_finite() {
                Err(FitError::NonFiniteValue {
                    series,
                    index,
                    value,
                })
            } else if value > 0.0 {
                Ok(value.ln())
            } else {
                Err(FitError::NonPositiveValue {
                    series,
                    index,
                    value,
                })
            }
        })
        .collect()
}

/// Whether the `[1, ln(x)]` design columns are numerically collinear.
///
/// True when every log-speed is equal, or when their spread about the mean
/// is within `rank_tol` of their overall magnitude.
fn is_rank_deficient(log_x: &[f64], rank_tol: f64) -> bool {
    if log_x.iter().all(|&v| v == log_x[0]) {
        return true;
    }

    let n = log_x.len() as f64;
    let mean = log_x.iter().sum::<f64>() / n;
    let spread: f64 = log_x.iter().map(|v| (v - mean).powi(2)).sum();
    let scale: f64 = log_x.iter().map(|v| v * v).sum();
    spread <= rank_tol * scale
}
