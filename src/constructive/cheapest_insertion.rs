//! Global cheapest insertion construction.
//!
//! # Algorithm
//!
//! Starting from empty routes, evaluate every unassigned customer at every
//! position of every route and insert the one with the smallest detour
//! `d(a, c) + d(c, b) - d(a, b)` that keeps the route within the cap.
//! Repeat until no insertion is feasible.
//!
//! # Complexity
//!
//! O(n³) for n customers.
//!
//! # Reference
//!
//! Rosenkrantz, D.J., Stearns, R.E. & Lewis, P.M. (1977). "An analysis of
//! several heuristics for the traveling salesman problem", *SIAM Journal on
//! Computing* 6(3), 563-581.

use crate::evaluation::CostModel;
use crate::search::SearchState;

#[derive(Debug, Clone, Copy)]
struct Insertion {
    detour: i64,
    vehicle: usize,
    pos: usize,
    idx: usize,
}

/// Builds an initial state by repeated cheapest feasible insertion.
pub fn cheapest_insertion(model: &CostModel<'_>) -> SearchState {
    let space = model.space();
    let num_vehicles = space.num_vehicles();
    let dimension = model.dimension();

    let mut routes: Vec<Vec<usize>> = vec![Vec::new(); num_vehicles];
    let mut distances: Vec<i64> = (0..num_vehicles)
        .map(|vehicle| model.route_distance(vehicle, &[]))
        .collect();
    let mut unassigned: Vec<usize> = space.customer_slots().collect();

    loop {
        let mut best: Option<Insertion> = None;
        for (idx, &slot) in unassigned.iter().enumerate() {
            for (vehicle, route) in routes.iter().enumerate() {
                for pos in 0..=route.len() {
                    let prev = model.prev_slot(vehicle, route, pos);
                    let next = route
                        .get(pos)
                        .copied()
                        .unwrap_or_else(|| space.end_slot(vehicle));
                    let detour = model.transit(prev, slot) + model.transit(slot, next)
                        - model.transit(prev, next);
                    if !dimension.admits(distances[vehicle] + detour) {
                        continue;
                    }
                    if best.map_or(true, |b| detour < b.detour) {
                        best = Some(Insertion {
                            detour,
                            vehicle,
                            pos,
                            idx,
                        });
                    }
                }
            }
        }

        let Some(ins) = best else {
            break;
        };
        let slot = unassigned.remove(ins.idx);
        routes[ins.vehicle].insert(ins.pos, slot);
        distances[ins.vehicle] += ins.detour;
    }

    SearchState::new(model, routes, unassigned)
}
