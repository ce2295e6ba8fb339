use thiserror::Error;

use crate::support::power_law::FitError;

use super::Axis;

/// Errors that can occur while fitting a propeller characteristic.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum FitCharacteristicError {
    /// The underlying power-law fit failed.
    #[error("power-law fit failed")]
    Fit(#[from] FitError),

    /// The fitted exponent cannot be inverted to a reference speed.
    ///
    /// A zero exponent means the measured values do not change with speed.
    #[error("invalid {axis} exponent: {exponent}")]
    InvalidExponent { axis: Axis, exponent: f64 },
}
