//! Supporting utilities used by models.
//!
//! - [`constraint`]: Type-level numeric constraints.
//! - [`power_law`]: Power laws and their log-linear least-squares fit.
//! - [`table`]: In-memory reference tables and record lookup.

pub mod constraint;
pub mod power_law;
pub mod table;
