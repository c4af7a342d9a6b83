//! dw-core: stable foundation for ductwise.
//!
//! Contains:
//! - units (unit systems, friction-formula coefficients, SI/IP conversions)
//! - numeric (Real + input guards)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{DwError, DwResult};
pub use numeric::*;
pub use units::{FormulaCoefficients, UnitSystem};
