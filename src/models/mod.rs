//! Domain model types for multi-depot routing.
//!
//! Provides the core abstractions: depot and customer locations, vehicles
//! bound to home depots, a validated problem instance, and the decoded
//! route and solution records handed to presentation layers.

mod location;
mod problem;
mod route;
mod solution;
mod vehicle;

pub use location::{Location, LocationKind};
pub use problem::{effective_vehicle_count, ProblemInstance, MAX_COORDINATE};
pub use route::{Route, RouteFeatures, Stop};
pub use solution::{CostBreakdown, Solution};
pub use vehicle::Vehicle;
