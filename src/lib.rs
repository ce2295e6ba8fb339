//! # Propeller Models
//!
//! Static propeller performance models and model-building tools for
//! [Twine](https://github.com/isentropic-dev/twine).
//!
//! A static propeller is described by two power laws of rotational speed `n`
//! (in rpm): thrust `T = a·n^b` and shaft power `P = c·n^d`. The coefficients
//! come from a built-in generic propeller, from a reference table record, or
//! from a log-linear least-squares fit to measured data.
//!
//! ## Crate layout
//!
//! - [`models`]: Domain-specific models, including [`twine_core::Model`] adapters.
//! - [`support`]: Supporting utilities used by models.
//!
//! ## Utility code lifecycle
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.

pub mod models;
pub mod support;
