//! Static propeller performance as two power laws of rotational speed.
//!
//! A [`StaticPropeller`] carries a thrust characteristic `T = a·n^b` and a
//! shaft power characteristic `P = c·n^d`, with `n` in rpm, `T` in newtons
//! and `P` in watts. Each characteristic also records the speed at which it
//! reaches its reference value (10 N and 100 W), and is created and
//! refitted independently of the other.

mod characteristic;
mod error;
mod record;

pub use characteristic::{Axis, Characteristic, Provenance};
pub use error::FitCharacteristicError;

use tracing::debug;
use uom::si::{
    angular_velocity::revolution_per_minute,
    f64::{AngularVelocity, Force, Length, Power},
    force::newton,
    length::inch,
    power::watt,
};

use crate::support::{
    constraint::{Constrained, StrictlyPositive},
    power_law::{self, FitConfig, FitStatistics, PowerLaw},
};

/// A propeller at static (zero airspeed) conditions.
///
/// # Example
///
/// ```
/// use approx::assert_relative_eq;
/// use propeller_models::models::propulsion::propeller::StaticPropeller;
/// use uom::si::{f64::Power, power::watt};
///
/// let propeller = StaticPropeller::generic();
///
/// let power = propeller.shaft_power(propeller.speed_at_100w());
/// assert_relative_eq!(power.get::<watt>(), 100.0, max_relative = 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StaticPropeller {
    name: String,
    diameter: Constrained<Length, StrictlyPositive>,
    pitch: Constrained<Length, StrictlyPositive>,
    thrust: Characteristic,
    power: Characteristic,
}

impl StaticPropeller {
    /// Name of the built-in propeller.
    pub const GENERIC_NAME: &'static str = "generic";

    /// Creates the built-in generic 10x5 propeller.
    ///
    /// It reaches 10 N of thrust at 8000 rpm with a thrust exponent of 2,
    /// and 100 W of shaft power at 7000 rpm with a power exponent of 3.
    #[must_use]
    pub fn generic() -> Self {
        Self {
            name: Self::GENERIC_NAME.to_owned(),
            diameter: positive_length(10.0),
            pitch: positive_length(5.0),
            thrust: Characteristic::from_reference_speed(
                Axis::Thrust,
                8000.0,
                2.0,
                Provenance::Generic,
            ),
            power: Characteristic::from_reference_speed(
                Axis::Power,
                7000.0,
                3.0,
                Provenance::Generic,
            ),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Propeller diameter. Informational only.
    #[must_use]
    pub fn diameter(&self) -> Length {
        *self.diameter.as_ref()
    }

    /// Propeller pitch. Informational only.
    #[must_use]
    pub fn pitch(&self) -> Length {
        *self.pitch.as_ref()
    }

    /// Thrust generated at the given rotational speed, `a·n^b`.
    ///
    /// For speeds at or below zero the result follows [`f64::powf`] and may
    /// be `NaN`.
    #[must_use]
    pub fn thrust(&self, speed: AngularVelocity) -> Force {
        Force::new::<newton>(self.thrust.eval(speed))
    }

    /// Shaft power needed to spin the propeller at the given speed, `c·n^d`.
    ///
    /// For speeds at or below zero the result follows [`f64::powf`] and may
    /// be `NaN`.
    #[must_use]
    pub fn shaft_power(&self, speed: AngularVelocity) -> Power {
        Power::new::<watt>(self.power.eval(speed))
    }

    /// Rotational speed at which the propeller generates `thrust`.
    #[must_use]
    pub fn speed_at_thrust(&self, thrust: Force) -> AngularVelocity {
        self.thrust.speed_at(thrust.get::<newton>())
    }

    /// Rotational speed at which the propeller absorbs `power`.
    #[must_use]
    pub fn speed_at_power(&self, power: Power) -> AngularVelocity {
        self.power.speed_at(power.get::<watt>())
    }

    /// Rotational speed at which thrust equals 10 N.
    #[must_use]
    pub fn speed_at_10n(&self) -> AngularVelocity {
        self.thrust.reference_speed()
    }

    /// Rotational speed at which shaft power equals 100 W.
    #[must_use]
    pub fn speed_at_100w(&self) -> AngularVelocity {
        self.power.reference_speed()
    }

    /// Thrust law `(a, b)` with speed in rpm and thrust in newtons.
    #[must_use]
    pub fn thrust_law(&self) -> PowerLaw {
        self.thrust.law()
    }

    /// Power law `(c, d)` with speed in rpm and power in watts.
    #[must_use]
    pub fn power_law(&self) -> PowerLaw {
        self.power.law()
    }

    #[must_use]
    pub fn thrust_characteristic(&self) -> &Characteristic {
        &self.thrust
    }

    #[must_use]
    pub fn power_characteristic(&self) -> &Characteristic {
        &self.power
    }

    #[must_use]
    pub fn is_thrust_fitted(&self) -> bool {
        self.thrust.is_fitted()
    }

    #[must_use]
    pub fn is_power_fitted(&self) -> bool {
        self.power.is_fitted()
    }

    /// Fits the shaft power law to measurements using the default [`FitConfig`].
    ///
    /// # Errors
    ///
    /// See [`fit_power_with`](Self::fit_power_with).
    pub fn fit_power(
        &mut self,
        speeds: &[AngularVelocity],
        powers: &[Power],
    ) -> Result<FitStatistics, FitCharacteristicError> {
        self.fit_power_with(speeds, powers, &FitConfig::default())
    }

    /// Fits the shaft power law `(c, d)` to measurements and derives the
    /// speed at 100 W.
    ///
    /// Only the power characteristic changes. On error the propeller is
    /// left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`FitCharacteristicError::Fit`] if the samples cannot be fitted
    /// and [`FitCharacteristicError::InvalidExponent`] if the fitted exponent
    /// is zero.
    pub fn fit_power_with(
        &mut self,
        speeds: &[AngularVelocity],
        powers: &[Power],
        config: &FitConfig,
    ) -> Result<FitStatistics, FitCharacteristicError> {
        let powers: Vec<f64> = powers.iter().map(|p| p.get::<watt>()).collect();
        let (power, statistics) = fit_characteristic(Axis::Power, speeds, &powers, config)?;
        self.power = power;

        let law = self.power.law();
        debug!(
            propeller = %self.name,
            c = law.coefficient,
            d = law.exponent,
            n100w = self.power.reference_speed().get::<revolution_per_minute>(),
            "fitted shaft power"
        );
        Ok(statistics)
    }

    /// Fits the thrust law to measurements using the default [`FitConfig`].
    ///
    /// # Errors
    ///
    /// See [`fit_thrust_with`](Self::fit_thrust_with).
    pub fn fit_thrust(
        &mut self,
        speeds: &[AngularVelocity],
        thrusts: &[Force],
    ) -> Result<FitStatistics, FitCharacteristicError> {
        self.fit_thrust_with(speeds, thrusts, &FitConfig::default())
    }

    /// Fits the thrust law `(a, b)` to measurements and derives the speed at
    /// 10 N.
    ///
    /// Only the thrust characteristic changes. On error the propeller is
    /// left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`FitCharacteristicError::Fit`] if the samples cannot be fitted
    /// and [`FitCharacteristicError::InvalidExponent`] if the fitted exponent
    /// is zero.
    pub fn fit_thrust_with(
        &mut self,
        speeds: &[AngularVelocity],
        thrusts: &[Force],
        config: &FitConfig,
    ) -> Result<FitStatistics, FitCharacteristicError> {
        let thrusts: Vec<f64> = thrusts.iter().map(|t| t.get::<newton>()).collect();
        let (thrust, statistics) = fit_characteristic(Axis::Thrust, speeds, &thrusts, config)?;
        self.thrust = thrust;

        let law = self.thrust.law();
        debug!(
            propeller = %self.name,
            a = law.coefficient,
            b = law.exponent,
            n10n = self.thrust.reference_speed().get::<revolution_per_minute>(),
            "fitted thrust"
        );
        Ok(statistics)
    }
}

impl Default for StaticPropeller {
    fn default() -> Self {
        Self::generic()
    }
}

fn fit_characteristic(
    axis: Axis,
    speeds: &[AngularVelocity],
    values: &[f64],
    config: &FitConfig,
) -> Result<(Characteristic, FitStatistics), FitCharacteristicError> {
    let rpm: Vec<f64> = speeds
        .iter()
        .map(|n| n.get::<revolution_per_minute>())
        .collect();

    let fit = power_law::fit_with(&rpm, values, config)?;
    Ok((Characteristic::from_fit(axis, fit)?, fit.statistics))
}

/// Wraps a positive literal length in inches.
///
/// # Panics
///
/// Panics if `inches` is not strictly positive. Only called with the
/// positive literals of [`StaticPropeller::generic`].
fn positive_length(inches: f64) -> Constrained<Length, StrictlyPositive> {
    StrictlyPositive::new(Length::new::<inch>(inches)).expect("length literal should be positive")
}
