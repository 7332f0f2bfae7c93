//! # depot-routing
//!
//! Multi-depot vehicle routing: depots and customers on a plane, a fleet
//! bound to home depots, and a search that assigns every customer to one
//! closed depot-to-depot route under a per-vehicle distance cap while
//! balancing route lengths.
//!
//! ## Modules
//!
//! - [`models`] - Locations, vehicles, problem instance, routes, solutions
//! - [`distance`] - Integer distance matrix from coordinates
//! - [`index`] - Visit slots separating route positions from locations
//! - [`evaluation`] - Distance dimension, span cost, missed-visit penalties
//! - [`constructive`] - Initial solutions (path cheapest arc, cheapest insertion)
//! - [`local_search`] - Insertion, relocate, swap and 2-opt neighborhoods
//! - [`search`] - Construction/improvement loop with guided local search
//! - [`decoder`] - Assignment to solution translation
//! - [`engine`] - `RoutingEngine` solve and batch-solve entry points
//! - [`config`] - Solver configuration
//! - [`error`] - Validation and infeasibility errors
//!
//! ## Example
//!
//! ```
//! use depot_routing::config::SolverConfig;
//! use depot_routing::engine::RoutingEngine;
//! use depot_routing::models::Location;
//!
//! let engine = RoutingEngine::new(
//!     SolverConfig::default()
//!         .with_vehicle_count(1)
//!         .with_max_iterations(Some(10)),
//! )
//! .unwrap();
//! let problem = engine
//!     .build_problem(
//!         vec![Location::depot("D1", 0.0, 0.0)],
//!         vec![Location::customer("C1", 3.0, 4.0)],
//!     )
//!     .unwrap();
//!
//! let solution = engine.solve(&problem).unwrap();
//! assert_eq!(solution.routes()[0].location_ids(), vec!["D1", "C1", "D1"]);
//! assert_eq!(solution.total_distance(), 10);
//! ```

pub mod config;
pub mod constructive;
pub mod decoder;
pub mod distance;
pub mod engine;
pub mod error;
pub mod evaluation;
pub mod index;
pub mod local_search;
pub mod models;
pub mod search;
