//! Route and stop types.

use serde::{Deserialize, Serialize};

/// A single stop within a decoded route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stop {
    /// Location id at this stop.
    pub location_id: String,
    /// Node index of the location (row of the distance matrix).
    pub node: usize,
    /// Distance accumulated from the route start up to this stop.
    pub cumulative_distance: i64,
}

/// Features of a route consumed by downstream classifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteFeatures {
    /// Vehicle that drives the route.
    pub vehicle_id: usize,
    /// Route length in cost units.
    pub length: i64,
    /// Number of customers served.
    pub customer_count: usize,
}

/// The ordered stops driven by one vehicle, depot to depot.
///
/// Unlike the search representation, the depot appears explicitly as the
/// first and last stop.
///
/// # Examples
///
/// ```
/// use depot_routing::models::{Route, Stop};
///
/// let stops = vec![
///     Stop { location_id: "D1".into(), node: 0, cumulative_distance: 0 },
///     Stop { location_id: "C1".into(), node: 1, cumulative_distance: 5 },
///     Stop { location_id: "D1".into(), node: 0, cumulative_distance: 10 },
/// ];
/// let route = Route::new(0, "D1", stops);
/// assert_eq!(route.total_distance(), 10);
/// assert_eq!(route.location_ids(), vec!["D1", "C1", "D1"]);
/// assert_eq!(route.num_customers(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    vehicle_id: usize,
    depot_id: String,
    stops: Vec<Stop>,
    total_distance: i64,
}

impl Route {
    /// Creates a route from its stops; the total is the last cumulative value.
    pub fn new(vehicle_id: usize, depot_id: impl Into<String>, stops: Vec<Stop>) -> Self {
        let total_distance = stops.last().map_or(0, |s| s.cumulative_distance);
        Self {
            vehicle_id,
            depot_id: depot_id.into(),
            stops,
            total_distance,
        }
    }

    /// Vehicle assigned to this route.
    pub fn vehicle_id(&self) -> usize {
        self.vehicle_id
    }

    /// Id of the depot the route starts from.
    pub fn depot_id(&self) -> &str {
        &self.depot_id
    }

    /// All stops including the depot at both ends.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Location ids in visit order.
    pub fn location_ids(&self) -> Vec<&str> {
        self.stops.iter().map(|s| s.location_id.as_str()).collect()
    }

    /// Customer stops only (depot endpoints removed).
    pub fn customer_stops(&self) -> &[Stop] {
        if self.stops.len() < 2 {
            return &[];
        }
        &self.stops[1..self.stops.len() - 1]
    }

    /// Number of customers served.
    pub fn num_customers(&self) -> usize {
        self.customer_stops().len()
    }

    /// Total distance driven.
    pub fn total_distance(&self) -> i64 {
        self.total_distance
    }

    /// Length and customer count of this route.
    pub fn features(&self) -> RouteFeatures {
        RouteFeatures {
            vehicle_id: self.vehicle_id,
            length: self.total_distance,
            customer_count: self.num_customers(),
        }
    }
}
