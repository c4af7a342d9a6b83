//! Error types for solver operations.

use dw_core::error::DwError;
use thiserror::Error;

/// Errors that can occur before or during a Newton solve.
///
/// Non-convergence is not an error here; it is reported through
/// `SolverResult::converged`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Invalid solver configuration: {what}")]
    InvalidConfig { what: &'static str },

    #[error("Invalid initial guess: {value}")]
    InvalidInitialGuess { value: f64 },

    #[error("Non-finite {what} at x = {x}: {value}")]
    NonFinite { what: &'static str, x: f64, value: f64 },
}

impl From<SolverError> for DwError {
    fn from(e: SolverError) -> Self {
        match e {
            SolverError::InvalidConfig { what } => DwError::InvalidArg { what },
            SolverError::InvalidInitialGuess { value } => DwError::InvalidInput {
                what: "initial guess",
                value,
            },
            SolverError::NonFinite { what, value, .. } => DwError::NonFinite { what, value },
        }
    }
}
