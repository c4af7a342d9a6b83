//! dw-takeoff: sheet-metal takeoff and cost summary for sized duct.
//!
//! Duct runs and vent headers are turned into sheet area, grouped by gauge,
//! padded with an allowance and priced:
//! - [`run`] straight runs and vent-header fittings
//! - [`summary`] per-gauge totals and the cost estimate

pub mod error;
pub mod run;
pub mod summary;

pub use error::{TakeoffError, TakeoffResult};
pub use run::{DuctRun, VentHeader};
pub use summary::{CostSettings, GaugeLine, Takeoff, build_takeoff};
