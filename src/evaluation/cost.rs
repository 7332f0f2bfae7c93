//! Transit costs, span balance, and missed-visit penalties.

use crate::distance::DistanceMatrix;
use crate::index::RouteIndexSpace;
use crate::models::CostBreakdown;

use super::DistanceDimension;

/// A constraint violation in a set of routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// Route distance exceeds the dimension capacity.
    MaxDistanceExceeded {
        /// Vehicle index.
        vehicle: usize,
        /// Actual route distance.
        distance: i64,
        /// Maximum allowed distance.
        max_distance: i64,
    },
    /// A customer slot is visited by no vehicle.
    CustomerDropped {
        /// Customer slot left unvisited.
        slot: usize,
    },
}

/// Cost and feasibility model over visit slots.
///
/// Routes are given per vehicle as sequences of customer slots; the
/// vehicle's start and end slots are implicit. The fleet is homogeneous:
/// transit between two slots costs the matrix entry of their nodes for
/// every vehicle.
///
/// # Examples
///
/// ```
/// use depot_routing::distance::{DistanceMatrix, Rounding};
/// use depot_routing::evaluation::CostModel;
/// use depot_routing::index::RouteIndexSpace;
/// use depot_routing::models::Location;
///
/// let locations = vec![
///     Location::depot("D1", 0.0, 0.0),
///     Location::customer("C1", 3.0, 4.0),
///     Location::customer("C2", 6.0, 8.0),
/// ];
/// let dm = DistanceMatrix::from_locations(&locations, Rounding::Truncate);
/// let space = RouteIndexSpace::new(3, 1, &[0, 0], &[0, 0]);
/// let model = CostModel::new(&dm, &space, 5000, 1, 1_000_000);
///
/// // Vehicle 0 visits both customers, vehicle 1 stays home.
/// let routes = vec![vec![0, 1], vec![]];
/// let cost = model.evaluate(&routes, 0);
/// assert_eq!(cost.distance, 20);
/// assert_eq!(cost.span, 20);
/// assert_eq!(cost.penalty, 0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CostModel<'a> {
    distances: &'a DistanceMatrix,
    space: &'a RouteIndexSpace,
    dimension: DistanceDimension,
    span_cost_weight: i64,
    missed_visit_penalty: i64,
}

impl<'a> CostModel<'a> {
    /// Creates a cost model.
    pub fn new(
        distances: &'a DistanceMatrix,
        space: &'a RouteIndexSpace,
        max_route_distance: i64,
        span_cost_weight: i64,
        missed_visit_penalty: i64,
    ) -> Self {
        Self {
            distances,
            space,
            dimension: DistanceDimension::new(max_route_distance),
            span_cost_weight,
            missed_visit_penalty,
        }
    }

    /// Slot layout this model evaluates over.
    pub fn space(&self) -> &'a RouteIndexSpace {
        self.space
    }

    /// The distance dimension.
    pub fn dimension(&self) -> DistanceDimension {
        self.dimension
    }

    /// Penalty charged per unvisited customer.
    pub fn missed_visit_penalty(&self) -> i64 {
        self.missed_visit_penalty
    }

    /// Cost of moving from one slot to another.
    pub fn transit(&self, from: usize, to: usize) -> i64 {
        self.distances
            .get(self.space.slot_to_node(from), self.space.slot_to_node(to))
    }

    /// Slot preceding position `pos` of `route` (start slot at position 0).
    pub fn prev_slot(&self, vehicle: usize, route: &[usize], pos: usize) -> usize {
        if pos == 0 {
            self.space.start_slot(vehicle)
        } else {
            route[pos - 1]
        }
    }

    /// Slot following position `pos` of `route` (end slot past the last).
    pub fn next_slot(&self, vehicle: usize, route: &[usize], pos: usize) -> usize {
        if pos + 1 >= route.len() {
            self.space.end_slot(vehicle)
        } else {
            route[pos + 1]
        }
    }

    /// Full slot sequence `start, route.., end` of a vehicle.
    pub fn slot_path(&self, vehicle: usize, route: &[usize]) -> Vec<usize> {
        let mut path = Vec::with_capacity(route.len() + 2);
        path.push(self.space.start_slot(vehicle));
        path.extend_from_slice(route);
        path.push(self.space.end_slot(vehicle));
        path
    }

    /// Total distance of a vehicle's route from start slot to end slot.
    ///
    /// An empty route is zero when start and end share a depot.
    pub fn route_distance(&self, vehicle: usize, route: &[usize]) -> i64 {
        let path = self.slot_path(vehicle, route);
        path.windows(2).map(|w| self.transit(w[0], w[1])).sum()
    }

    /// Cumulative distance at each slot of the route's path.
    pub fn cumuls(&self, vehicle: usize, route: &[usize]) -> Vec<i64> {
        let path = self.slot_path(vehicle, route);
        self.dimension
            .cumuls(path.windows(2).map(|w| self.transit(w[0], w[1])))
    }

    /// Returns `true` if the route respects the distance cap.
    pub fn is_route_feasible(&self, vehicle: usize, route: &[usize]) -> bool {
        self.dimension.is_within_capacity(&self.cumuls(vehicle, route))
    }

    /// Weighted gap between the longest and shortest route distance.
    ///
    /// Saturates at `i64::MAX` instead of overflowing.
    pub fn span_cost(&self, route_distances: &[i64]) -> i64 {
        let max = route_distances.iter().copied().max().unwrap_or(0);
        let min = route_distances.iter().copied().min().unwrap_or(0);
        self.span_cost_weight.saturating_mul(max.saturating_sub(min))
    }

    /// Penalty charged for `count` dropped customers, saturating.
    pub fn dropped_penalty(&self, count: usize) -> i64 {
        let count = i64::try_from(count).unwrap_or(i64::MAX);
        self.missed_visit_penalty.saturating_mul(count)
    }

    /// Objective terms for per-vehicle distances and a dropped count.
    pub fn breakdown(&self, route_distances: &[i64], num_dropped: usize) -> CostBreakdown {
        CostBreakdown {
            distance: route_distances.iter().fold(0, |acc: i64, &d| acc.saturating_add(d)),
            span: self.span_cost(route_distances),
            penalty: self.dropped_penalty(num_dropped),
        }
    }

    /// Objective terms of a full assignment.
    pub fn evaluate(&self, routes: &[Vec<usize>], num_dropped: usize) -> CostBreakdown {
        let distances: Vec<i64> = routes
            .iter()
            .enumerate()
            .map(|(v, r)| self.route_distance(v, r))
            .collect();
        self.breakdown(&distances, num_dropped)
    }

    /// Lists every broken constraint of an assignment.
    pub fn violations(&self, routes: &[Vec<usize>], dropped: &[usize]) -> Vec<Violation> {
        let mut violations: Vec<Violation> = routes
            .iter()
            .enumerate()
            .filter_map(|(vehicle, route)| {
                let distance = self.route_distance(vehicle, route);
                (!self.dimension.admits(distance)).then_some(Violation::MaxDistanceExceeded {
                    vehicle,
                    distance,
                    max_distance: self.dimension.capacity(),
                })
            })
            .collect();
        violations.extend(
            dropped
                .iter()
                .map(|&slot| Violation::CustomerDropped { slot }),
        );
        violations
    }
}
