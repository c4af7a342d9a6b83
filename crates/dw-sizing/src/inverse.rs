//! Inverse sizing: one side fixed, solve the other for a target equivalent diameter.
//!
//! Solves `De(fixed, x) - target = 0` with the bounded Newton solver, starting from
//! a square section (`x0 = fixed`). The formula is undefined at `x = 0`, so the
//! iterate is floored at `NewtonConfig::lower_bound`.
//!
//! There is no convergence guarantee for pathological pairs, e.g. a very large
//! fixed side with a tiny target: the iterate pins to the floor and the result
//! comes back with `converged = false`.

use crate::common::check_positive;
use crate::equivalent::{de, de_slope};
use crate::error::SizingResult;
use dw_solver::{NewtonConfig, SolverResult, newton_solve};

/// Raw (unrounded) length of the free side.
pub fn solve_free_side(
    fixed: f64,
    target_diameter: f64,
    config: &NewtonConfig,
) -> SizingResult<SolverResult> {
    let c = check_positive(fixed, "fixed dimension")?;
    let target = check_positive(target_diameter, "target diameter")?;

    let result = newton_solve(c, |x| de(c, x) - target, |x| de_slope(c, x), config)?;
    Ok(result)
}
