//! Public propeller models.
//!
//! # Model structure
//!
//! Each model lives in its own module and contains an internal `core` submodule
//! where the actual computation and domain logic lives. The public types are
//! re-exported from the model module; the module layout of `core` is an
//! implementation detail.
//!
//! The [`twine_core::Model`] implementation is a thin adapter that
//! delegates to the model-specific core API.

pub mod propulsion;
