//! Travel cost matrices.
//!
//! Provides a dense integer cost matrix over depots and customers.

mod matrix;

pub use matrix::{DistanceMatrix, Rounding};
