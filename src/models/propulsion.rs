//! Propulsion models.
//!
//! This module contains models for propulsion components, currently
//! propellers at static (zero airspeed) conditions.

pub mod propeller;
