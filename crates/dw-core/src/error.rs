use thiserror::Error;

pub type DwResult<T> = Result<T, DwError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DwError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid input for {what}: {value} (must be positive)")]
    InvalidInput { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Ambiguous constraint: width and height cannot both be fixed")]
    AmbiguousConstraint,

    #[error("Solver did not converge after {iterations} iterations (residual = {residual})")]
    SolverNonConvergence { iterations: usize, residual: f64 },

    #[error("Invariant violated: {what}")]
    Invariant { what: &'static str },
}

impl DwError {
    /// Short code for programmatic handling by callers.
    pub fn code(&self) -> &'static str {
        match self {
            DwError::NonFinite { .. } => "NON_FINITE",
            DwError::InvalidInput { .. } => "INVALID_INPUT",
            DwError::InvalidArg { .. } => "INVALID_ARG",
            DwError::AmbiguousConstraint => "AMBIGUOUS_CONSTRAINT",
            DwError::SolverNonConvergence { .. } => "SOLVER_NON_CONVERGENCE",
            DwError::Invariant { .. } => "INVARIANT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_field() {
        let err = DwError::InvalidInput {
            what: "friction_rate",
            value: 0.0,
        };
        assert!(err.to_string().contains("friction_rate"));
        assert_eq!(err.code(), "INVALID_INPUT");
    }

    #[test]
    fn codes_are_distinct() {
        let codes = [
            DwError::NonFinite {
                what: "x",
                value: f64::NAN,
            }
            .code(),
            DwError::InvalidArg { what: "x" }.code(),
            DwError::AmbiguousConstraint.code(),
            DwError::SolverNonConvergence {
                iterations: 10,
                residual: 1.0,
            }
            .code(),
            DwError::Invariant { what: "x" }.code(),
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
