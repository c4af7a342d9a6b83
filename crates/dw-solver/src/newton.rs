//! Newton solver with a lower bound on the unknown.

use crate::error::SolverError;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Newton solver configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewtonConfig {
    /// Maximum number of Newton updates
    pub max_iterations: usize,
    /// Converged once |f(x)| falls below this
    pub residual_tol: f64,
    /// Stop (unconverged) once |f'(x)| falls below this
    pub derivative_tol: f64,
    /// x is clamped to at least this value after every step; must be positive
    pub lower_bound: f64,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            residual_tol: 1e-3,
            derivative_tol: 1e-3,
            lower_bound: 0.1,
        }
    }
}

impl NewtonConfig {
    pub fn validate(&self) -> Result<(), SolverError> {
        if self.max_iterations == 0 {
            return Err(SolverError::InvalidConfig {
                what: "max_iterations must be at least 1",
            });
        }
        if !(self.residual_tol.is_finite() && self.residual_tol > 0.0) {
            return Err(SolverError::InvalidConfig {
                what: "residual_tol must be positive",
            });
        }
        if !(self.derivative_tol.is_finite() && self.derivative_tol >= 0.0) {
            return Err(SolverError::InvalidConfig {
                what: "derivative_tol must be non-negative",
            });
        }
        // The floor keeps the iterate inside the domain of ratio/power residuals.
        if !(self.lower_bound.is_finite() && self.lower_bound > 0.0) {
            return Err(SolverError::InvalidConfig {
                what: "lower_bound must be positive",
            });
        }
        Ok(())
    }
}

/// Newton iteration result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverResult {
    /// Final iterate
    pub value: f64,
    /// Number of Newton updates applied
    pub iterations: usize,
    /// True iff |f(value)| < residual_tol
    pub converged: bool,
    /// f(value)
    pub residual: f64,
}

/// Solve `f(x) = 0` from `x0` with the analytic derivative `df`.
///
/// Stops on convergence, on a vanishing derivative, or when the iteration budget
/// is spent. Only the first case reports `converged = true`, unless the last
/// update happened to land inside the tolerance.
pub fn newton_solve<F, D>(
    x0: f64,
    residual_fn: F,
    derivative_fn: D,
    config: &NewtonConfig,
) -> Result<SolverResult, SolverError>
where
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
{
    config.validate()?;
    if !x0.is_finite() {
        return Err(SolverError::InvalidInitialGuess { value: x0 });
    }

    let mut x = x0.max(config.lower_bound);
    let mut iterations = 0;

    for iter in 0..config.max_iterations {
        let r = finite(residual_fn(x), "residual", x)?;

        // Check convergence
        if r.abs() < config.residual_tol {
            debug!(iter, x, residual = r, "newton converged");
            return Ok(SolverResult {
                value: x,
                iterations: iter,
                converged: true,
                residual: r,
            });
        }

        let d = finite(derivative_fn(x), "derivative", x)?;
        if d.abs() < config.derivative_tol {
            warn!(iter, x, derivative = d, "newton derivative vanished");
            break;
        }

        x = (x - r / d).max(config.lower_bound);
        iterations = iter + 1;
        debug!(iter, x, residual = r, derivative = d, "newton step");
    }

    let r = finite(residual_fn(x), "residual", x)?;
    let converged = r.abs() < config.residual_tol;
    if !converged {
        warn!(
            iterations,
            x,
            residual = r,
            "newton stopped without meeting tolerance"
        );
    }

    Ok(SolverResult {
        value: x,
        iterations,
        converged,
        residual: r,
    })
}

fn finite(value: f64, what: &'static str, x: f64) -> Result<f64, SolverError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SolverError::NonFinite { what, x, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_quadratic() {
        // Solve x^2 - 4 = 0, x > 0
        let config = NewtonConfig {
            max_iterations: 50,
            residual_tol: 1e-9,
            ..NewtonConfig::default()
        };
        let result = newton_solve(3.0, |x| x * x - 4.0, |x| 2.0 * x, &config).unwrap();

        assert!(result.converged);
        assert!((result.value - 2.0).abs() < 1e-6);
        assert!(result.iterations > 0);
    }

    #[test]
    fn already_converged_takes_no_steps() {
        let result =
            newton_solve(2.0, |x| x * x - 4.0, |x| 2.0 * x, &NewtonConfig::default()).unwrap();
        assert!(result.converged);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.value, 2.0);
    }

    #[test]
    fn iterate_is_clamped_to_lower_bound() {
        // Root at x = -1 lies below the bound; solver pins to the floor.
        let result = newton_solve(5.0, |x| x + 1.0, |_| 1.0, &NewtonConfig::default()).unwrap();
        assert_eq!(result.value, 0.1);
        assert!(!result.converged);
        assert_eq!(result.iterations, 10);
        assert!((result.residual - 1.1).abs() < 1e-12);
    }

    #[test]
    fn flat_derivative_stops_unconverged() {
        let result = newton_solve(1.0, |_| 3.0, |_| 0.0, &NewtonConfig::default()).unwrap();
        assert!(!result.converged);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.value, 1.0);
    }

    #[test]
    fn rejects_bad_config_and_guess() {
        let config = NewtonConfig {
            max_iterations: 0,
            ..NewtonConfig::default()
        };
        assert!(matches!(
            newton_solve(1.0, |x| x, |_| 1.0, &config),
            Err(SolverError::InvalidConfig { .. })
        ));
        assert!(matches!(
            newton_solve(f64::NAN, |x| x, |_| 1.0, &NewtonConfig::default()),
            Err(SolverError::InvalidInitialGuess { .. })
        ));
    }

    #[test]
    fn rejects_non_positive_floor() {
        for lower_bound in [0.0, -1.0, f64::NEG_INFINITY] {
            let config = NewtonConfig {
                lower_bound,
                ..NewtonConfig::default()
            };
            assert_eq!(
                config.validate(),
                Err(SolverError::InvalidConfig {
                    what: "lower_bound must be positive",
                })
            );
            assert!(newton_solve(1.0, |x| x - 2.0, |_| 1.0, &config).is_err());
        }
    }

    #[test]
    fn non_finite_residual_is_an_error() {
        let result = newton_solve(1.0, |x| (x - 2.0).ln(), |_| 1.0, &NewtonConfig::default());
        assert!(matches!(result, Err(SolverError::NonFinite { .. })));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn never_goes_below_lower_bound(root in -50.0_f64..50.0, x0 in 0.1_f64..100.0) {
            let result = newton_solve(x0, |x| x - root, |_| 1.0, &NewtonConfig::default()).unwrap();
            prop_assert!(result.value >= 0.1);
            if root > 0.2 {
                prop_assert!(result.converged);
                prop_assert!((result.value - root).abs() < 1e-3);
            }
        }
    }
}
