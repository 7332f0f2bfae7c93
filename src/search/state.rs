//! Mutable search state over customer slots.

use crate::evaluation::CostModel;
use crate::models::CostBreakdown;

use super::Assignment;

/// Working solution of the search engine.
///
/// Routes hold customer slots per vehicle (the vehicle's start and end slots
/// are implicit). Every customer slot is either in exactly one route or in
/// the dropped list. Route distances and slot positions are cached and kept
/// in sync by every mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    routes: Vec<Vec<usize>>,
    route_distances: Vec<i64>,
    dropped: Vec<usize>,
    positions: Vec<Option<(usize, usize)>>,
}

impl SearchState {
    /// Builds a state from routes and dropped slots, computing distances.
    pub fn new(model: &CostModel<'_>, routes: Vec<Vec<usize>>, mut dropped: Vec<usize>) -> Self {
        let route_distances = routes
            .iter()
            .enumerate()
            .map(|(v, r)| model.route_distance(v, r))
            .collect();
        dropped.sort_unstable();
        let mut state = Self {
            routes,
            route_distances,
            dropped,
            positions: vec![None; model.space().num_customers()],
        };
        for v in 0..state.routes.len() {
            state.index_route(v);
        }
        state
    }

    /// A state where every vehicle stays home and every customer is dropped.
    pub fn all_dropped(model: &CostModel<'_>) -> Self {
        let space = model.space();
        Self::new(
            model,
            vec![Vec::new(); space.num_vehicles()],
            space.customer_slots().collect(),
        )
    }

    /// Customer slots per vehicle.
    pub fn routes(&self) -> &[Vec<usize>] {
        &self.routes
    }

    /// Customer slots of one vehicle.
    pub fn route(&self, vehicle: usize) -> &[usize] {
        &self.routes[vehicle]
    }

    /// Cached route distance per vehicle.
    pub fn route_distances(&self) -> &[i64] {
        &self.route_distances
    }

    /// Customer slots visited by nobody, sorted.
    pub fn dropped(&self) -> &[usize] {
        &self.dropped
    }

    /// Route and position of a customer slot; `None` if dropped.
    pub fn position_of(&self, slot: usize) -> Option<(usize, usize)> {
        self.positions[slot]
    }

    /// Number of vehicles.
    pub fn num_vehicles(&self) -> usize {
        self.routes.len()
    }

    /// Objective terms of this state.
    pub fn cost(&self, model: &CostModel<'_>) -> CostBreakdown {
        model.breakdown(&self.route_distances, self.dropped.len())
    }

    /// Full objective value.
    pub fn objective(&self, model: &CostModel<'_>) -> i64 {
        self.cost(model).total()
    }

    /// Replaces a vehicle's route, updating caches.
    ///
    /// `distance` must be the route distance of `route` under `model`.
    pub fn set_route(&mut self, vehicle: usize, route: Vec<usize>, distance: i64) {
        for &slot in &self.routes[vehicle] {
            // A slot already moved into another route keeps its new position.
            if matches!(self.positions[slot], Some((v, _)) if v == vehicle) {
                self.positions[slot] = None;
            }
        }
        self.routes[vehicle] = route;
        self.route_distances[vehicle] = distance;
        self.index_route(vehicle);
    }

    /// Removes a slot from the dropped list.
    pub fn undrop(&mut self, slot: usize) {
        if let Ok(idx) = self.dropped.binary_search(&slot) {
            self.dropped.remove(idx);
        }
    }

    /// Successor encoding of this state.
    pub fn to_assignment(&self, model: &CostModel<'_>) -> Assignment {
        Assignment::from_routes(model.space(), &self.routes)
    }

    fn index_route(&mut self, vehicle: usize) {
        for (pos, &slot) in self.routes[vehicle].iter().enumerate() {
            self.positions[slot] = Some((vehicle, pos));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{DistanceMatrix, Rounding};
    use crate::index::RouteIndexSpace;
    use crate::models::Location;

    fn setup() -> (DistanceMatrix, RouteIndexSpace) {
        let locations = vec![
            Location::depot("D1", 0.0, 0.0),
            Location::customer("C1", 3.0, 4.0),
            Location::customer("C2", 6.0, 8.0),
            Location::customer("C3", 0.0, 5.0),
        ];
        let dm = DistanceMatrix::from_locations(&locations, Rounding::Truncate);
        let space = RouteIndexSpace::new(4, 1, &[0, 0], &[0, 0]);
        (dm, space)
    }

    #[test]
    fn test_new_caches() {
        let (dm, space) = setup();
        let model = CostModel::new(&dm, &space, 5000, 0, 100);
        let state = SearchState::new(&model, vec![vec![1, 0], vec![]], vec![2]);
        assert_eq!(state.route_distances(), &[20, 0]);
        assert_eq!(state.position_of(1), Some((0, 0)));
        assert_eq!(state.position_of(0), Some((0, 1)));
        assert_eq!(state.position_of(2), None);
        assert_eq!(state.cost(&model).penalty, 100);
    }

    #[test]
    fn test_all_dropped() {
        let (dm, space) = setup();
        let model = CostModel::new(&dm, &space, 5000, 0, 100);
        let state = SearchState::all_dropped(&model);
        assert_eq!(state.dropped(), &[0, 1, 2]);
        assert_eq!(state.objective(&model), 300);
    }

    #[test]
    fn test_set_route_and_undrop() {
        let (dm, space) = setup();
        let model = CostModel::new(&dm, &space, 5000, 0, 100);
        let mut state = SearchState::new(&model, vec![vec![0], vec![1]], vec![2]);
        let route = vec![2];
        let d = model.route_distance(1, &route);
        state.set_route(1, route, d);
        state.undrop(2);
        assert_eq!(state.position_of(1), None);
        assert_eq!(state.position_of(2), Some((1, 0)));
        assert!(state.dropped().is_empty());
        assert_eq!(state.route_distances()[1], 10);
    }
}
