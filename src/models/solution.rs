//! Solution snapshot and objective breakdown.

use serde::{Deserialize, Serialize};

use super::{Location, Route, RouteFeatures};

/// Objective value split into its terms.
///
/// # Examples
///
/// ```
/// use depot_routing::models::CostBreakdown;
///
/// let cost = CostBreakdown { distance: 120, span: 300, penalty: 0 };
/// assert_eq!(cost.total(), 420);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Sum of route distances.
    pub distance: i64,
    /// Weighted span between the longest and shortest vehicle route.
    pub span: i64,
    /// Missed-visit penalties for dropped customers.
    pub penalty: i64,
}

impl CostBreakdown {
    /// Full objective value, saturating at `i64::MAX`.
    pub fn total(&self) -> i64 {
        self.distance
            .saturating_add(self.span)
            .saturating_add(self.penalty)
    }
}

/// Immutable result of a solve.
///
/// Only vehicles that leave their depot have a route. `total_distance` is
/// exactly the sum of the route distances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    problem_id: String,
    total_distance: i64,
    routes: Vec<Route>,
    locations: Vec<Location>,
    dropped: Vec<String>,
    cost: CostBreakdown,
}

impl Solution {
    /// Assembles a solution; the total distance is summed from `routes`.
    pub fn new(
        problem_id: impl Into<String>,
        routes: Vec<Route>,
        locations: Vec<Location>,
        dropped: Vec<String>,
        cost: CostBreakdown,
    ) -> Self {
        let total_distance = routes.iter().map(Route::total_distance).sum();
        Self {
            problem_id: problem_id.into(),
            total_distance,
            routes,
            locations,
            dropped,
            cost,
        }
    }

    /// Identifier of the solved problem.
    pub fn problem_id(&self) -> &str {
        &self.problem_id
    }

    /// Sum of all route distances.
    pub fn total_distance(&self) -> i64 {
        self.total_distance
    }

    /// Non-empty routes, ordered by vehicle id.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Locations of the solved problem, depots first.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Ids of customers that no vehicle visits.
    pub fn dropped(&self) -> &[String] {
        &self.dropped
    }

    /// Objective terms of this solution.
    pub fn cost(&self) -> CostBreakdown {
        self.cost
    }

    /// Full objective value including span and penalty terms.
    pub fn total_cost(&self) -> i64 {
        self.cost.total()
    }

    /// Number of vehicles that left their depot.
    pub fn num_vehicles_used(&self) -> usize {
        self.routes.len()
    }

    /// Number of customers visited across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(Route::num_customers).sum()
    }

    /// Returns `true` if every customer is visited.
    pub fn is_complete(&self) -> bool {
        self.dropped.is_empty()
    }

    /// Route length and customer count for each route.
    pub fn route_features(&self) -> Vec<RouteFeatures> {
        self.routes.iter().map(Route::features).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Stop;

    fn route(vehicle: usize, ids: &[(&str, i64)]) -> Route {
        let stops = ids
            .iter()
            .enumerate()
            .map(|(node, &(id, cumul))| Stop {
                location_id: id.to_string(),
                node,
                cumulative_distance: cumul,
            })
            .collect();
        Route::new(vehicle, ids[0].0, stops)
    }

    #[test]
    fn test_solution_totals() {
        let r1 = route(0, &[("D1", 0), ("C1", 5), ("D1", 10)]);
        let r2 = route(1, &[("D2", 0), ("C2", 7), ("C3", 9), ("D2", 20)]);
        let cost = CostBreakdown {
            distance: 30,
            span: 1000,
            penalty: 0,
        };
        let sol = Solution::new("p1", vec![r1, r2], vec![], vec![], cost);
        assert_eq!(sol.problem_id(), "p1");
        assert_eq!(sol.total_distance(), 30);
        assert_eq!(sol.num_vehicles_used(), 2);
        assert_eq!(sol.num_served(), 3);
        assert_eq!(sol.total_cost(), 1030);
        assert!(sol.is_complete());
    }

    #[test]
    fn test_solution_features() {
        let r1 = route(3, &[("D1", 0), ("C1", 5), ("C2", 6), ("D1", 12)]);
        let sol = Solution::new("p", vec![r1], vec![], vec!["C9".into()], CostBreakdown::default());
        let features = sol.route_features();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].length, 12);
        assert_eq!(features[0].customer_count, 2);
        assert!(!sol.is_complete());
        assert_eq!(sol.dropped(), ["C9".to_string()]);
    }

    #[test]
    fn test_solution_serde() {
        let r1 = route(0, &[("D1", 0), ("C1", 5), ("D1", 10)]);
        let sol = Solution::new("p", vec![r1], vec![], vec![], CostBreakdown::default());
        let json = serde_json::to_string(&sol).expect("serialize");
        let back: Solution = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, sol);
    }
}
