//! Path cheapest arc construction.
//!
//! # Algorithm
//!
//! Every vehicle starts with an open path at its start depot. At each step,
//! among all open path ends and all unassigned customers, take the arc with
//! the lowest transit cost such that the extended path can still return to
//! its end depot within the distance cap, and append the customer. Ties go
//! to the lowest vehicle, then the lowest customer slot. The loop stops when
//! no arc is feasible.
//!
//! # Complexity
//!
//! O(n² × V) where n = customers, V = vehicles.

use crate::evaluation::CostModel;
use crate::search::SearchState;

/// Builds an initial state by repeatedly appending the cheapest feasible arc.
///
/// # Examples
///
/// ```
/// use depot_routing::constructive::path_cheapest_arc;
/// use depot_routing::distance::{DistanceMatrix, Rounding};
/// use depot_routing::evaluation::CostModel;
/// use depot_routing::index::RouteIndexSpace;
/// use depot_routing::models::Location;
///
/// let locations = vec![
///     Location::depot("D1", 0.0, 0.0),
///     Location::customer("C1", 0.0, 2.0),
///     Location::customer("C2", 0.0, 1.0),
/// ];
/// let dm = DistanceMatrix::from_locations(&locations, Rounding::Truncate);
/// let space = RouteIndexSpace::new(3, 1, &[0], &[0]);
/// let model = CostModel::new(&dm, &space, 5000, 0, 1_000_000);
///
/// let state = path_cheapest_arc(&model);
/// assert_eq!(state.route(0), &[1, 0]);
/// assert!(state.dropped().is_empty());
/// ```
pub fn path_cheapest_arc(model: &CostModel<'_>) -> SearchState {
    let space = model.space();
    let num_vehicles = space.num_vehicles();
    let dimension = model.dimension();

    let mut routes: Vec<Vec<usize>> = vec![Vec::new(); num_vehicles];
    let mut tails: Vec<usize> = (0..num_vehicles).map(|v| space.start_slot(v)).collect();
    let mut travelled = vec![0_i64; num_vehicles];
    let mut unassigned: Vec<usize> = space.customer_slots().collect();

    loop {
        let mut best: Option<(i64, usize, usize)> = None;
        for vehicle in 0..num_vehicles {
            let tail = tails[vehicle];
            let end = space.end_slot(vehicle);
            for (idx, &slot) in unassigned.iter().enumerate() {
                let arc = model.transit(tail, slot);
                let round_trip = travelled[vehicle]
                    .saturating_add(arc)
                    .saturating_add(model.transit(slot, end));
                if !dimension.admits(round_trip) {
                    continue;
                }
                // Strict comparison keeps the lowest vehicle and slot on ties.
                if best.map_or(true, |(cost, _, _)| arc < cost) {
                    best = Some((arc, vehicle, idx));
                }
            }
        }

        let Some((arc, vehicle, idx)) = best else {
            break;
        };
        let slot = unassigned.remove(idx);
        routes[vehicle].push(slot);
        tails[vehicle] = slot;
        travelled[vehicle] = travelled[vehicle].saturating_add(arc);
    }

    SearchState::new(model, routes, unassigned)
}
