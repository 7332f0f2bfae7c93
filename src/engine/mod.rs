//! Public solve entry points.

mod routing_engine;

pub use routing_engine::{RoutingEngine, SEARCH_VISIT_PENALTY};
