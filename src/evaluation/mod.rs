//! Constraint and cost model.
//!
//! - [`CostModel`] - transit costs, span balance, missed-visit penalties
//! - [`DistanceDimension`] - per-vehicle accumulated distance with a cap

mod cost;
mod dimension;

pub use cost::{CostModel, Violation};
pub use dimension::DistanceDimension;
