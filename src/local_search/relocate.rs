//! Customer relocation within and between routes.
//!
//! # Algorithm
//!
//! For each routed customer (in the caller's scan order), remove it from its
//! route and evaluate every insertion position of every route, its own route
//! included. The best feasible position of the first customer that has an
//! improving one is returned.
//!
//! # Complexity
//!
//! O(n × N) per call where n = routed customers, N = total route positions.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use crate::search::SearchState;

use super::{insertion_neighbors, ArcDelta, Move, MoveContext, MoveKind};

/// Finds an improving relocation of one customer.
///
/// `order` lists customer slots in the order they are tried; dropped slots
/// are skipped.
pub fn find_relocate(ctx: &MoveContext<'_, '_>, state: &SearchState, order: &[usize]) -> Option<Move> {
    let model = ctx.model();
    for &slot in order {
        let Some((vehicle, pos)) = state.position_of(slot) else {
            continue;
        };
        let route = state.route(vehicle);

        let mut removal = ArcDelta::default();
        let prev = model.prev_slot(vehicle, route, pos);
        let next = model.next_slot(vehicle, route, pos);
        removal.remove(ctx, prev, slot);
        removal.remove(ctx, slot, next);
        removal.add(ctx, prev, next);

        let mut reduced = route.to_vec();
        reduced.remove(pos);

        let mut best: Option<Move> = None;
        for target in 0..state.num_vehicles() {
            let target_route: &[usize] = if target == vehicle {
                &reduced
            } else {
                state.route(target)
            };
            for to in 0..=target_route.len() {
                if target == vehicle && to == pos {
                    continue;
                }
                let (a, b) = insertion_neighbors(model, target, target_route, to);
                let mut insertion = ArcDelta::default();
                insertion.remove(ctx, a, b);
                insertion.add(ctx, a, slot);
                insertion.add(ctx, slot, b);

                let score = if target == vehicle {
                    let combined = ArcDelta {
                        distance: removal.distance + insertion.distance,
                        guided: removal.guided + insertion.guided,
                    };
                    ctx.improves(state, &[(vehicle, combined)], 0)
                } else {
                    ctx.improves(state, &[(vehicle, removal), (target, insertion)], 0)
                };

                if let Some(score) = score {
                    if best.map_or(true, |b| score.augmented < b.score.augmented) {
                        best = Some(Move {
                            kind: MoveKind::Relocate {
                                from: (vehicle, pos),
                                to: (target, to),
                            },
                            score,
                        });
                    }
                }
            }
        }
        if best.is_some() {
            return best;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{DistanceMatrix, Rounding};
    use crate::evaluation::CostModel;
    use crate::index::RouteIndexSpace;
    use crate::models::Location;
    use crate::search::ArcPenalties;

    #[test]
    fn test_relocate_to_nearer_depot() {
        let locations = vec![
            Location::depot("D1", 0.0, 0.0),
            Location::depot("D2", 100.0, 0.0),
            Location::customer("C1", 99.0, 0.0),
        ];
        let dm = DistanceMatrix::from_locations(&locations, Rounding::Truncate);
        let space = RouteIndexSpace::new(3, 2, &[0, 1], &[0, 1]);
        let model = CostModel::new(&dm, &space, 5000, 0, 1000);
        let penalties = ArcPenalties::new();
        let ctx = MoveContext::new(&model, &penalties);
        let mut state = SearchState::new(&model, vec![vec![0], vec![]], vec![]);

        let mv = find_relocate(&ctx, &state, &[0]).expect("improving move");
        assert_eq!(
            mv.kind,
            MoveKind::Relocate {
                from: (0, 0),
                to: (1, 0)
            }
        );
        assert_eq!(mv.score.objective, 2 - 198);

        mv.apply(&model, &mut state);
        assert_eq!(state.route_distances(), &[0, 2]);
        assert_eq!(state.position_of(0), Some((1, 0)));
    }

    #[test]
    fn test_relocate_within_route() {
        let locations = vec![
            Location::depot("D1", 0.0, 0.0),
            Location::customer("C1", 1.0, 0.0),
            Location::customer("C2", 2.0, 0.0),
            Location::customer("C3", 3.0, 0.0),
        ];
        let dm = DistanceMatrix::from_locations(&locations, Rounding::Truncate);
        let space = RouteIndexSpace::new(4, 1, &[0], &[0]);
        let model = CostModel::new(&dm, &space, 5000, 0, 1000);
        let penalties = ArcPenalties::new();
        let ctx = MoveContext::new(&model, &penalties);
        // D -> C3 -> C1 -> C2 -> D = 3 + 2 + 1 + 2
        let mut state = SearchState::new(&model, vec![vec![2, 0, 1]], vec![]);
        assert_eq!(state.route_distances()[0], 8);

        let mv = find_relocate(&ctx, &state, &[0, 1, 2]).expect("improving move");
        assert!(matches!(mv.kind, MoveKind::Relocate { from, to } if from.0 == 0 && to.0 == 0));
        let before = state.route_distances()[0];
        mv.apply(&model, &mut state);
        assert_eq!(state.route_distances()[0], before + mv.score.objective);
        assert!(state.route_distances()[0] < 8);
    }

    #[test]
    fn test_relocate_none_at_optimum() {
        let locations = vec![
            Location::depot("D1", 0.0, 0.0),
            Location::customer("C1", 1.0, 0.0),
            Location::customer("C2", 2.0, 0.0),
        ];
        let dm = DistanceMatrix::from_locations(&locations, Rounding::Truncate);
        let space = RouteIndexSpace::new(3, 1, &[0], &[0]);
        let model = CostModel::new(&dm, &space, 5000, 0, 1000);
        let penalties = ArcPenalties::new();
        let ctx = MoveContext::new(&model, &penalties);
        let state = SearchState::new(&model, vec![vec![0, 1]], vec![]);
        assert_eq!(find_relocate(&ctx, &state, &[0, 1]), None);
    }

    #[test]
    fn test_relocate_skips_dropped() {
        let locations = vec![
            Location::depot("D1", 0.0, 0.0),
            Location::customer("C1", 1.0, 0.0),
        ];
        let dm = DistanceMatrix::from_locations(&locations, Rounding::Truncate);
        let space = RouteIndexSpace::new(2, 1, &[0], &[0]);
        let model = CostModel::new(&dm, &space, 5000, 0, 1000);
        let penalties = ArcPenalties::new();
        let ctx = MoveContext::new(&model, &penalties);
        let state = SearchState::all_dropped(&model);
        assert_eq!(find_relocate(&ctx, &state, &[0]), None);
    }
}
