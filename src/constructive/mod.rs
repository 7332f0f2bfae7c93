//! Construction heuristics for initial assignments.
//!
//! - [`path_cheapest_arc`] - extend open route ends along the cheapest arc, O(n² V)
//! - [`cheapest_insertion`] - insert at the cheapest feasible position, O(n³)
//!
//! Both honor the distance cap, including the return leg to the end depot.
//! Customers that fit nowhere are left in the dropped list for the
//! improvement phase to retry.

mod cheapest_arc;
mod cheapest_insertion;

pub use cheapest_arc::path_cheapest_arc;
pub use cheapest_insertion::cheapest_insertion;
