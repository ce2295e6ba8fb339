//! Static propeller models.
//!
//! This module provides [`StaticPropeller`], which models thrust and shaft
//! power at zero airspeed as power laws of rotational speed, and its
//! [`twine_core::Model`] implementation. The computational core is in the
//! internal `core` module.

mod core;

pub use self::core::{Axis, Characteristic, FitCharacteristicError, Provenance, StaticPropeller};

use std::convert::Infallible;

use twine_core::Model;
use uom::si::f64::{AngularVelocity, Force, Power};

/// Static thrust and shaft power at one rotational speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticOperatingPoint {
    pub speed: AngularVelocity,
    pub thrust: Force,
    pub shaft_power: Power,
}

/// Evaluates the propeller at the input rotational speed.
///
/// ```
/// use approx::assert_relative_eq;
/// use propeller_models::models::propulsion::propeller::StaticPropeller;
/// use twine_core::Model;
/// use uom::si::{
///     angular_velocity::revolution_per_minute, f64::AngularVelocity, force::newton,
/// };
///
/// let propeller = StaticPropeller::generic();
/// let speed = AngularVelocity::new::<revolution_per_minute>(8000.0);
///
/// let point = propeller.call(&speed).unwrap();
/// assert_relative_eq!(point.thrust.get::<newton>(), 10.0, max_relative = 1e-9);
/// ```
impl Model for StaticPropeller {
    type Input = AngularVelocity;
    type Output = StaticOperatingPoint;
    type Error = Infallible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        Ok(StaticOperatingPoint {
            speed: *input,
            thrust: self.thrust(*input),
            shaft_power: self.shaft_power(*input),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{angular_velocity::revolution_per_minute, force::newton, power::watt};

    #[test]
    fn model_matches_evaluators() {
        let mut propeller = StaticPropeller::generic();
        let speeds: Vec<_> = [1000.0, 2000.0, 4000.0]
            .map(AngularVelocity::new::<revolution_per_minute>)
            .to_vec();
        let powers = [10.0, 80.0, 640.0].map(Power::new::<watt>);
        propeller.fit_power(&speeds, &powers).unwrap();

        let speed = AngularVelocity::new::<revolution_per_minute>(3000.0);
        let point = propeller.call(&speed).unwrap();

        assert_eq!(point.speed, speed);
        assert_relative_eq!(
            point.shaft_power.get::<watt>(),
            270.0,
            max_relative = 1e-9
        );
        assert_relative_eq!(
            point.thrust.get::<newton>(),
            propeller.thrust(speed).get::<newton>()
        );
    }
}
