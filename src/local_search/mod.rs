//! Local search neighborhoods over a [`SearchState`].
//!
//! - [`find_insertion`] - insert a dropped customer into a route
//! - [`find_relocate`] - move one customer within or between routes
//! - [`find_swap`] - exchange two customers of different routes
//! - [`find_two_opt`] - reverse a segment inside one route
//!
//! Every neighborhood returns the first move that lowers the augmented
//! objective (true objective plus guided penalties) while keeping each
//! touched route within the distance cap. Deltas are computed from the arcs
//! a move removes and adds, so evaluating a candidate is O(1) plus an O(V)
//! span update. Transit costs are assumed symmetric, which holds for
//! matrices built from coordinates.

mod exchange;
mod insert;
mod relocate;
mod two_opt;

pub use exchange::find_swap;
pub use insert::find_insertion;
pub use relocate::find_relocate;
pub use two_opt::find_two_opt;

use crate::evaluation::CostModel;
use crate::search::{ArcPenalties, SearchState};

const EPSILON: f64 = 1e-9;

/// Cost model and guided penalties used to score moves.
#[derive(Debug, Clone, Copy)]
pub struct MoveContext<'a, 'm> {
    model: &'a CostModel<'m>,
    penalties: &'a ArcPenalties,
}

impl<'a, 'm> MoveContext<'a, 'm> {
    /// Creates a scoring context.
    pub fn new(model: &'a CostModel<'m>, penalties: &'a ArcPenalties) -> Self {
        Self { model, penalties }
    }

    /// The underlying cost model.
    pub fn model(&self) -> &'a CostModel<'m> {
        self.model
    }

    /// Change of the objective terms if the given routes change by `deltas`
    /// and `undropped` customers leave the dropped list.
    ///
    /// Returns `None` if a touched route would exceed the distance cap.
    fn score(&self, state: &SearchState, deltas: &[(usize, ArcDelta)], undropped: usize) -> Option<Score> {
        let distances = state.route_distances();
        let mut new_distances = distances.to_vec();
        for &(vehicle, delta) in deltas {
            new_distances[vehicle] = new_distances[vehicle].saturating_add(delta.distance);
        }
        let dimension = self.model.dimension();
        if deltas
            .iter()
            .any(|&(vehicle, _)| !dimension.admits(new_distances[vehicle]))
        {
            return None;
        }

        let span_delta = self
            .model
            .span_cost(&new_distances)
            .saturating_sub(self.model.span_cost(distances));
        let distance_delta = deltas
            .iter()
            .fold(0_i64, |acc, (_, d)| acc.saturating_add(d.distance));
        let penalty_delta = self.model.dropped_penalty(undropped).saturating_neg();
        let guided: f64 = deltas.iter().map(|(_, d)| d.guided).sum();

        let objective = distance_delta
            .saturating_add(span_delta)
            .saturating_add(penalty_delta);
        Some(Score {
            objective,
            augmented: objective as f64 + guided,
        })
    }

    /// Score of a move if it is feasible and lowers the augmented objective.
    fn improves(&self, state: &SearchState, deltas: &[(usize, ArcDelta)], undropped: usize) -> Option<Score> {
        self.score(state, deltas, undropped)
            .filter(|s| s.augmented < -EPSILON)
    }
}

/// Objective change of a move: true and guided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    /// Change of the true objective.
    pub objective: i64,
    /// Change of the objective plus guided penalties.
    pub augmented: f64,
}

/// Distance and guided-penalty change of one route.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ArcDelta {
    /// Change of the route distance.
    pub distance: i64,
    /// Change of the guided penalty sum.
    pub guided: f64,
}

impl ArcDelta {
    fn add(&mut self, ctx: &MoveContext<'_, '_>, from: usize, to: usize) {
        self.distance += ctx.model.transit(from, to);
        self.guided += ctx.penalties.guided(ctx.model, from, to);
    }

    fn remove(&mut self, ctx: &MoveContext<'_, '_>, from: usize, to: usize) {
        self.distance -= ctx.model.transit(from, to);
        self.guided -= ctx.penalties.guided(ctx.model, from, to);
    }
}

/// A neighborhood move in slot coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// Insert dropped `slot` at `pos` of `vehicle`'s route.
    Insert {
        /// Dropped customer slot.
        slot: usize,
        /// Receiving vehicle.
        vehicle: usize,
        /// Insertion index.
        pos: usize,
    },
    /// Move the customer at `from` to `to`. For a same-route move, the
    /// target index refers to the route after removal.
    Relocate {
        /// `(vehicle, position)` of the moved customer.
        from: (usize, usize),
        /// `(vehicle, insertion index)`.
        to: (usize, usize),
    },
    /// Exchange the customers at two positions of different routes.
    Swap {
        /// First `(vehicle, position)`.
        a: (usize, usize),
        /// Second `(vehicle, position)`.
        b: (usize, usize),
    },
    /// Reverse `route[i..=j]` of `vehicle`.
    TwoOpt {
        /// Vehicle whose route is changed.
        vehicle: usize,
        /// First reversed position.
        i: usize,
        /// Last reversed position.
        j: usize,
    },
}

/// An improving move with its score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Move {
    /// What to change.
    pub kind: MoveKind,
    /// Objective change.
    pub score: Score,
}

impl Move {
    /// Applies the move to `state`, recomputing touched route distances.
    pub fn apply(&self, model: &CostModel<'_>, state: &mut SearchState) {
        match self.kind {
            MoveKind::Insert { slot, vehicle, pos } => {
                let mut route = state.route(vehicle).to_vec();
                route.insert(pos, slot);
                replace_route(model, state, vehicle, route);
                state.undrop(slot);
            }
            MoveKind::Relocate { from, to } => {
                let mut source = state.route(from.0).to_vec();
                let slot = source.remove(from.1);
                if from.0 == to.0 {
                    source.insert(to.1, slot);
                    replace_route(model, state, from.0, source);
                } else {
                    let mut target = state.route(to.0).to_vec();
                    target.insert(to.1, slot);
                    replace_route(model, state, from.0, source);
                    replace_route(model, state, to.0, target);
                }
            }
            MoveKind::Swap { a, b } => {
                let mut ra = state.route(a.0).to_vec();
                let mut rb = state.route(b.0).to_vec();
                std::mem::swap(&mut ra[a.1], &mut rb[b.1]);
                replace_route(model, state, a.0, ra);
                replace_route(model, state, b.0, rb);
            }
            MoveKind::TwoOpt { vehicle, i, j } => {
                let mut route = state.route(vehicle).to_vec();
                route[i..=j].reverse();
                replace_route(model, state, vehicle, route);
            }
        }
    }
}

/// Slots around insertion index `pos` of `route`.
fn insertion_neighbors(model: &CostModel<'_>, vehicle: usize, route: &[usize], pos: usize) -> (usize, usize) {
    let prev = model.prev_slot(vehicle, route, pos);
    let next = route
        .get(pos)
        .copied()
        .unwrap_or_else(|| model.space().end_slot(vehicle));
    (prev, next)
}

fn replace_route(model: &CostModel<'_>, state: &mut SearchState, vehicle: usize, route: Vec<usize>) {
    let distance = model.route_distance(vehicle, &route);
    state.set_route(vehicle, route, distance);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{DistanceMatrix, Rounding};
    use crate::index::RouteIndexSpace;
    use crate::models::Location;

    #[test]
    fn test_score_rejects_over_cap() {
        let locations = vec![
            Location::depot("D1", 0.0, 0.0),
            Location::customer("C1", 30.0, 40.0),
        ];
        let dm = DistanceMatrix::from_locations(&locations, Rounding::Truncate);
        let space = RouteIndexSpace::new(2, 1, &[0], &[0]);
        let model = CostModel::new(&dm, &space, 99, 0, 1000);
        let penalties = ArcPenalties::new();
        let ctx = MoveContext::new(&model, &penalties);
        let state = SearchState::all_dropped(&model);

        // Round trip is 100 > 99.
        assert_eq!(find_insertion(&ctx, &state), None);
    }

    #[test]
    fn test_apply_relocate_same_route() {
        let locations = vec![
            Location::depot("D1", 0.0, 0.0),
            Location::customer("C1", 1.0, 0.0),
            Location::customer("C2", 2.0, 0.0),
            Location::customer("C3", 3.0, 0.0),
        ];
        let dm = DistanceMatrix::from_locations(&locations, Rounding::Truncate);
        let space = RouteIndexSpace::new(4, 1, &[0], &[0]);
        let model = CostModel::new(&dm, &space, 5000, 0, 1000);
        let mut state = SearchState::new(&model, vec![vec![0, 1, 2]], vec![]);
        let mv = Move {
            kind: MoveKind::Relocate {
                from: (0, 0),
                to: (0, 2),
            },
            score: Score {
                objective: 0,
                augmented: 0.0,
            },
        };
        mv.apply(&model, &mut state);
        assert_eq!(state.route(0), &[1, 2, 0]);
        assert_eq!(state.route_distances()[0], model.route_distance(0, &[1, 2, 0]));
    }
}
