//! Bounded scalar Newton-Raphson solver.
//!
//! Used by the sizing crate to invert the equivalent-diameter formula for one
//! rectangle side. The solver never hides a budget-exhausted answer: the returned
//! [`SolverResult`] always carries a `converged` flag and the final residual.

pub mod error;
pub mod newton;

pub use error::SolverError;
pub use newton::{NewtonConfig, SolverResult, newton_solve};
