//! Power laws of the form `y = k·x^m`.
//!
//! A [`PowerLaw`] stores the coefficient `k` and exponent `m` and evaluates
//! the relationship in both directions. The [`fit`] and [`fit_with`]
//! functions estimate a power law from measured samples by ordinary least
//! squares in log–log space, where the relationship is linear:
//! `ln(y) = ln(k) + m·ln(x)`.
//!
//! ```
//! use approx::assert_relative_eq;
//! use propeller_models::support::power_law::fit;
//!
//! // P = 1e-8 · n³
//! let fit = fit(&[1000.0, 2000.0, 4000.0], &[10.0, 80.0, 640.0]).unwrap();
//!
//! assert_relative_eq!(fit.law.exponent, 3.0, max_relative = 1e-9);
//! assert_relative_eq!(fit.law.coefficient, 1e-8, max_relative = 1e-9);
//! ```

mod fit;

pub use fit::{FitConfig, FitError, FitMethod, FitStatistics, PowerLawFit, Series, fit, fit_with};

/// A power-law relationship `y = coefficient · x^exponent`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerLaw {
    /// Multiplicative coefficient `k`.
    pub coefficient: f64,

    /// Exponent `m`.
    pub exponent: f64,
}

impl PowerLaw {
    /// Creates a power law from its coefficient and exponent.
    #[must_use]
    pub fn new(coefficient: f64, exponent: f64) -> Self {
        Self {
            coefficient,
            exponent,
        }
    }

    /// Creates the power law with the given exponent that passes through `(x, y)`.
    ///
    /// The coefficient is `y / x^exponent`, so `eval(x) == y` up to rounding.
    ///
    /// ```
    /// use approx::assert_relative_eq;
    /// use propeller_models::support::power_law::PowerLaw;
    ///
    /// let law = PowerLaw::through_point(8000.0, 10.0, 2.0);
    /// assert_relative_eq!(law.eval(8000.0), 10.0, max_relative = 1e-12);
    /// ```
    #[must_use]
    pub fn through_point(x: f64, y: f64, exponent: f64) -> Self {
        Self::new(y / x.powf(exponent), exponent)
    }

    /// Evaluates `y = k·x^m`.
    ///
    /// Evaluation is unguarded: for `x ≤ 0` the result follows [`f64::powf`],
    /// which is `NaN` for negative `x` and a non-integer exponent.
    #[must_use]
    pub fn eval(&self, x: f64) -> f64 {
        self.coefficient * x.powf(self.exponent)
    }

    /// Returns the `x` at which the law reaches `y`, i.e. `(y / k)^(1 / m)`.
    ///
    /// Like [`eval`](Self::eval) this is unguarded. A zero exponent yields an
    /// infinite or `NaN` result; callers that need a finite answer must
    /// check the exponent first.
    #[must_use]
    pub fn solve_for(&self, y: f64) -> f64 {
        (y / self.coefficient).powf(self.exponent.recip())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn eval_and_solve_are_inverse() {
        let law = PowerLaw::new(2.9e-10, 2.7);

        let y = law.eval(6500.0);
        assert_relative_eq!(law.solve_for(y), 6500.0, max_relative = 1e-12);
    }

    #[test]
    fn negative_base_with_fractional_exponent_is_nan() {
        let law = PowerLaw::new(1.0, 2.5);
        assert!(law.eval(-100.0).is_nan());

        // Integer exponents still follow ordinary real arithmetic.
        let law = PowerLaw::new(1.0, 2.0);
        assert_relative_eq!(law.eval(-3.0), 9.0);
    }

    #[test]
    fn zero_exponent_has_no_inverse() {
        let law = PowerLaw::new(5.0, 0.0);
        assert!(!law.solve_for(10.0).is_finite());
    }
}
