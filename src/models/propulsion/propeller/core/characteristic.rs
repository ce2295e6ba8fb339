//! Per-axis power-law state of a static propeller.

use std::fmt;

use uom::si::{angular_velocity::revolution_per_minute, f64::AngularVelocity};

use crate::support::{
    constraint::NonZero,
    power_law::{FitStatistics, PowerLaw, PowerLawFit},
};

use super::FitCharacteristicError;

/// One of the two independently fitted propeller characteristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Thrust in newtons, `T = a·n^b`.
    Thrust,

    /// Shaft power in watts, `P = c·n^d`.
    Power,
}

impl Axis {
    /// The value whose speed is reported as the reference speed.
    ///
    /// 10 N for thrust and 100 W for power.
    #[must_use]
    pub fn reference_value(self) -> f64 {
        match self {
            Self::Thrust => 10.0,
            Self::Power => 100.0,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Thrust => f.write_str("thrust"),
            Self::Power => f.write_str("power"),
        }
    }
}

/// Where the parameters of a characteristic came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Provenance {
    /// The built-in generic propeller.
    Generic,

    /// A reference table record.
    Record,

    /// A fit to measured samples.
    Fitted(FitStatistics),
}

/// A power law in rpm together with its reference speed.
///
/// The reference speed is where the law reaches [`Axis::reference_value`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Characteristic {
    law: PowerLaw,
    reference_speed: f64,
    provenance: Provenance,
}

impl Characteristic {
    /// Builds the law with `exponent` that passes through the reference point.
    ///
    /// The caller guarantees `reference_speed` (rpm) is strictly positive.
    pub(super) fn from_reference_speed(
        axis: Axis,
        reference_speed: f64,
        exponent: f64,
        provenance: Provenance,
    ) -> Self {
        Self {
            law: PowerLaw::through_point(reference_speed, axis.reference_value(), exponent),
            reference_speed,
            provenance,
        }
    }

    /// Adopts a fitted law and derives its reference speed.
    ///
    /// # Errors
    ///
    /// Returns [`FitCharacteristicError::InvalidExponent`] if the exponent is
    /// zero, or so close to zero that the reference speed is not finite.
    pub(super) fn from_fit(axis: Axis, fit: PowerLawFit) -> Result<Self, FitCharacteristicError> {
        let invalid = FitCharacteristicError::InvalidExponent {
            axis,
            exponent: fit.law.exponent,
        };

        if NonZero::new(fit.law.exponent).is_err() {
            return Err(invalid);
        }

        let reference_speed = fit.law.solve_for(axis.reference_value());
        if !reference_speed.is_finite() || reference_speed <= 0.0 {
            return Err(invalid);
        }

        Ok(Self {
            law: fit.law,
            reference_speed,
            provenance: Provenance::Fitted(fit.statistics),
        })
    }

    /// The power law, with speed in rpm.
    #[must_use]
    pub fn law(&self) -> PowerLaw {
        self.law
    }

    #[must_use]
    pub fn reference_speed(&self) -> AngularVelocity {
        AngularVelocity::new::<revolution_per_minute>(self.reference_speed)
    }

    #[must_use]
    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    #[must_use]
    pub fn is_fitted(&self) -> bool {
        matches!(self.provenance, Provenance::Fitted(_))
    }

    pub(super) fn eval(&self, speed: AngularVelocity) -> f64 {
        self.law.eval(speed.get::<revolution_per_minute>())
    }

    pub(super) fn speed_at(&self, value: f64) -> AngularVelocity {
        AngularVelocity::new::<revolution_per_minute>(self.law.solve_for(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::support::power_law::fit;

    #[test]
    fn reference_point_lies_on_law() {
        let thrust = Characteristic::from_reference_speed(Axis::Thrust, 8000.0, 2.0, Provenance::Generic);

        assert_relative_eq!(thrust.law().coefficient, 10.0 / 64e6, max_relative = 1e-12);
        assert_relative_eq!(
            thrust.eval(thrust.reference_speed()),
            10.0,
            max_relative = 1e-12
        );
        assert!(!thrust.is_fitted());
    }

    #[test]
    fn fitted_reference_speed() {
        // T = 1e-7 · n², so 10 N is reached at 10 000 rpm.
        let fit = fit(&[2000.0, 5000.0, 8000.0], &[0.4, 2.5, 6.4]).unwrap();
        let thrust = Characteristic::from_fit(Axis::Thrust, fit).unwrap();

        assert_relative_eq!(
            thrust.reference_speed().get::<revolution_per_minute>(),
            10_000.0,
            max_relative = 1e-9
        );
        assert!(thrust.is_fitted());
    }

    #[test]
    fn flat_fit_is_invalid() {
        let fit = fit(&[2000.0, 5000.0, 8000.0], &[3.0, 3.0, 3.0]).unwrap();

        assert_eq!(
            Characteristic::from_fit(Axis::Power, fit),
            Err(FitCharacteristicError::InvalidExponent {
                axis: Axis::Power,
                exponent: fit.law.exponent,
            })
        );
    }
}
