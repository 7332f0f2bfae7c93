//! Inter-route customer exchange.
//!
//! # Algorithm
//!
//! Swaps two customers served by different vehicles. Each route loses the
//! two arcs around its customer and gains the two arcs around the other
//! one, so both route deltas are computed in constant time.
//!
//! # Complexity
//!
//! O(n²) per call where n = routed customers.
//!
//! # Reference
//!
//! Osman, I.H. (1993). "Metastrategy simulated annealing and tabu search
//! algorithms for the vehicle routing problem", *Annals of Operations
//! Research* 41, 421-451.

use crate::search::SearchState;

use super::{ArcDelta, Move, MoveContext, MoveKind};

/// Finds an improving swap of two customers on different routes.
///
/// Customers are tried in `order`; dropped slots are skipped.
pub fn find_swap(ctx: &MoveContext<'_, '_>, state: &SearchState, order: &[usize]) -> Option<Move> {
    let model = ctx.model();
    for &a in order {
        let Some((va, pa)) = state.position_of(a) else {
            continue;
        };
        let route_a = state.route(va);
        let prev_a = model.prev_slot(va, route_a, pa);
        let next_a = model.next_slot(va, route_a, pa);

        for vb in (0..state.num_vehicles()).filter(|&v| v != va) {
            let route_b = state.route(vb);
            for (pb, &b) in route_b.iter().enumerate() {
                let prev_b = model.prev_slot(vb, route_b, pb);
                let next_b = model.next_slot(vb, route_b, pb);

                let mut delta_a = ArcDelta::default();
                delta_a.remove(ctx, prev_a, a);
                delta_a.remove(ctx, a, next_a);
                delta_a.add(ctx, prev_a, b);
                delta_a.add(ctx, b, next_a);

                let mut delta_b = ArcDelta::default();
                delta_b.remove(ctx, prev_b, b);
                delta_b.remove(ctx, b, next_b);
                delta_b.add(ctx, prev_b, a);
                delta_b.add(ctx, a, next_b);

                if let Some(score) = ctx.improves(state, &[(va, delta_a), (vb, delta_b)], 0) {
                    return Some(Move {
                        kind: MoveKind::Swap {
                            a: (va, pa),
                            b: (vb, pb),
                        },
                        score,
                    });
                }
            }
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

    fn crossed() -> (DistanceMatrix, RouteIndexSpace) {
        // C1 sits next to D2 and C2 next to D1.
        let locations = vec![
            Location::depot("D1", 0.0, 0.0),
            Location::depot("D2", 100.0, 0.0),
            Location::customer("C1", 99.0, 0.0),
            Location::customer("C2", 1.0, 0.0),
        ];
        let dm = DistanceMatrix::from_locations(&locations, Rounding::Truncate);
        let space = RouteIndexSpace::new(4, 2, &[0, 1], &[0, 1]);
        (dm, space)
    }

    #[test]
    fn test_swap_crossed_customers() {
        let (dm, space) = crossed();
        let model = CostModel::new(&dm, &space, 5000, 0, 1000);
        let penalties = ArcPenalties::new();
        let ctx = MoveContext::new(&model, &penalties);
        let mut state = SearchState::new(&model, vec![vec![0], vec![1]], vec![]);

        let mv = find_swap(&ctx, &state, &[0, 1]).expect("improving swap");
        assert_eq!(
            mv.kind,
            MoveKind::Swap {
                a: (0, 0),
                b: (1, 0)
            }
        );
        assert_eq!(mv.score.objective, 4 - 396);

        mv.apply(&model, &mut state);
        assert_eq!(state.routes(), &[vec![1], vec![0]]);
        assert_eq!(state.route_distances(), &[2, 2]);
        assert_eq!(state.position_of(0), Some((1, 0)));
        assert_eq!(state.position_of(1), Some((0, 0)));
    }

    #[test]
    fn test_swap_none_when_sorted() {
        let (dm, space) = crossed();
        let model = CostModel::new(&dm, &space, 5000, 0, 1000);
        let penalties = ArcPenalties::new();
        let ctx = MoveContext::new(&model, &penalties);
        let state = SearchState::new(&model, vec![vec![1], vec![0]], vec![]);
        assert_eq!(find_swap(&ctx, &state, &[0, 1]), None);
    }
}
