//! Error types for sizing operations.

use dw_core::error::DwError;
use dw_solver::SolverError;
use thiserror::Error;

/// Errors that can occur while sizing a duct section.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SizingError {
    #[error("Invalid input for {what}: {value} (must be positive)")]
    InvalidInput { what: &'static str, value: f64 },

    #[error("Non-finite value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Ambiguous constraint: width and height cannot both be fixed")]
    AmbiguousConstraint,

    #[error("Solver did not converge after {iterations} iterations (residual = {residual})")]
    SolverNonConvergence { iterations: usize, residual: f64 },

    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),
}

pub type SizingResult<T> = Result<T, SizingError>;

impl From<DwError> for SizingError {
    fn from(e: DwError) -> Self {
        match e {
            DwError::NonFinite { what, value } => SizingError::NonFinite { what, value },
            DwError::InvalidInput { what, value } => SizingError::InvalidInput { what, value },
            DwError::InvalidArg { what } | DwError::Invariant { what } => {
                SizingError::InvalidArg { what }
            }
            DwError::AmbiguousConstraint => SizingError::AmbiguousConstraint,
            DwError::SolverNonConvergence {
                iterations,
                residual,
            } => SizingError::SolverNonConvergence {
                iterations,
                residual,
            },
        }
    }
}

impl From<SizingError> for DwError {
    fn from(e: SizingError) -> Self {
        match e {
            SizingError::InvalidInput { what, value } => DwError::InvalidInput { what, value },
            SizingError::NonFinite { what, value } => DwError::NonFinite { what, value },
            SizingError::InvalidArg { what } => DwError::InvalidArg { what },
            SizingError::AmbiguousConstraint => DwError::AmbiguousConstraint,
            SizingError::SolverNonConvergence {
                iterations,
                residual,
            } => DwError::SolverNonConvergence {
                iterations,
                residual,
            },
            SizingError::Solver(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SizingError::InvalidInput {
            what: "friction_rate",
            value: 0.0,
        };
        assert!(err.to_string().contains("friction_rate"));
    }

    #[test]
    fn error_conversion() {
        let err: DwError = SizingError::AmbiguousConstraint.into();
        assert_eq!(err, DwError::AmbiguousConstraint);

        let back: SizingError = DwError::InvalidInput {
            what: "airflow",
            value: -1.0,
        }
        .into();
        assert!(matches!(back, SizingError::InvalidInput { what: "airflow", .. }));
    }
}
