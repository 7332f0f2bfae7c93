//! Guided local search arc penalties.
//!
//! Features are the arcs of the solution, keyed by their unordered pair of
//! physical nodes. At every local optimum the arcs with the highest utility
//! `cost / (1 + penalty)` get their penalty incremented, and the search then
//! descends on `objective + lambda * sum(penalty)` over the arcs in use.
//!
//! # Reference
//!
//! Voudouris, C. & Tsang, E. (1999). "Guided local search and its
//! application to the traveling salesman problem", *European Journal of
//! Operational Research* 113(2), 469-499.

use std::collections::HashMap;

use crate::evaluation::CostModel;

use super::SearchState;

/// Penalty counters over node-pair arcs plus the scaling factor `lambda`.
#[derive(Debug, Clone, Default)]
pub struct ArcPenalties {
    counts: HashMap<(usize, usize), u32>,
    lambda: f64,
}

impl ArcPenalties {
    /// Creates an empty penalty store; all guided costs are zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current scaling factor.
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Number of times the arc between two nodes has been penalized.
    pub fn count(&self, a: usize, b: usize) -> u32 {
        self.counts.get(&key(a, b)).copied().unwrap_or(0)
    }

    /// Guided cost of travelling between two slots.
    pub fn guided(&self, model: &CostModel<'_>, from: usize, to: usize) -> f64 {
        if self.lambda == 0.0 || self.counts.is_empty() {
            return 0.0;
        }
        let space = model.space();
        let count = self.count(space.slot_to_node(from), space.slot_to_node(to));
        self.lambda * f64::from(count)
    }

    /// Guided cost summed over every arc of `state`.
    pub fn total(&self, model: &CostModel<'_>, state: &SearchState) -> f64 {
        arcs(model, state)
            .into_iter()
            .map(|(a, b)| self.guided(model, a, b))
            .sum()
    }

    /// Penalizes the maximum-utility arcs of a local optimum.
    ///
    /// `lambda` is fixed on the first call as `coefficient * distance / arcs`
    /// of that local optimum. Returns the number of arcs penalized; zero means
    /// the solution has no arc with positive cost and penalties cannot steer
    /// the search.
    pub fn penalize(&mut self, model: &CostModel<'_>, state: &SearchState, coefficient: f64) -> usize {
        let used = arcs(model, state);
        if used.is_empty() {
            return 0;
        }

        if self.lambda == 0.0 {
            let distance: i64 = state.route_distances().iter().sum();
            self.lambda = coefficient * distance as f64 / used.len() as f64;
        }

        let space = model.space();
        let utility = |&(a, b): &(usize, usize)| {
            let cost = model.transit(a, b) as f64;
            let count = self.count(space.slot_to_node(a), space.slot_to_node(b));
            cost / (1.0 + f64::from(count))
        };
        let max_utility = used.iter().map(utility).fold(0.0_f64, f64::max);
        if max_utility <= 0.0 {
            return 0;
        }

        let targets: Vec<(usize, usize)> = used
            .iter()
            .filter(|arc| utility(*arc) >= max_utility)
            .map(|&(a, b)| key(space.slot_to_node(a), space.slot_to_node(b)))
            .collect();
        for arc in &targets {
            *self.counts.entry(*arc).or_insert(0) += 1;
        }
        targets.len()
    }
}

/// Slot arcs of every non-empty route, start to end.
fn arcs(model: &CostModel<'_>, state: &SearchState) -> Vec<(usize, usize)> {
    state
        .routes()
        .iter()
        .enumerate()
        .filter(|(_, route)| !route.is_empty())
        .flat_map(|(vehicle, route)| {
            let path = model.slot_path(vehicle, route);
            path.windows(2).map(|w| (w[0], w[1])).collect::<Vec<_>>()
        })
        .collect()
}

fn key(a: usize, b: usize) -> (usize, usize) {
    (a.min(b), a.max(b))
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
        ];
        let dm = DistanceMatrix::from_locations(&locations, Rounding::Truncate);
        let space = RouteIndexSpace::new(3, 1, &[0], &[0]);
        (dm, space)
    }

    #[test]
    fn test_no_penalties_initially() {
        let (dm, space) = setup();
        let model = CostModel::new(&dm, &space, 5000, 0, 100);
        let state = SearchState::new(&model, vec![vec![0, 1]], vec![]);
        let penalties = ArcPenalties::new();
        assert_eq!(penalties.total(&model, &state), 0.0);
        assert_eq!(penalties.lambda(), 0.0);
    }

    #[test]
    fn test_penalize_longest_arc() {
        let (dm, space) = setup();
        let model = CostModel::new(&dm, &space, 5000, 0, 100);
        // D1 -> C1 (5) -> C2 (5) -> D1 (10)
        let state = SearchState::new(&model, vec![vec![0, 1]], vec![]);
        let mut penalties = ArcPenalties::new();
        assert_eq!(penalties.penalize(&model, &state, 0.3), 1);
        // lambda = 0.3 * 20 / 3 arcs
        assert!((penalties.lambda() - 2.0).abs() < 1e-10);
        assert_eq!(penalties.count(2, 0), 1);
        assert_eq!(penalties.count(0, 2), 1);
        assert_eq!(penalties.count(0, 1), 0);
        assert!((penalties.total(&model, &state) - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_penalize_shifts_utility() {
        let (dm, space) = setup();
        let model = CostModel::new(&dm, &space, 5000, 0, 100);
        let state = SearchState::new(&model, vec![vec![0, 1]], vec![]);
        let mut penalties = ArcPenalties::new();
        penalties.penalize(&model, &state, 0.3);
        // Utility of D1-C2 is now 10 / 2 = 5, tied with the two 5-unit arcs.
        assert_eq!(penalties.penalize(&model, &state, 0.3), 3);
    }

    #[test]
    fn test_penalize_empty_solution() {
        let (dm, space) = setup();
        let model = CostModel::new(&dm, &space, 5000, 0, 100);
        let state = SearchState::all_dropped(&model);
        let mut penalties = ArcPenalties::new();
        assert_eq!(penalties.penalize(&model, &state, 0.3), 0);
    }
}
