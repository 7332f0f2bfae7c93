//! Insertion of dropped customers.
//!
//! Scans dropped customers in slot order and, for the first one that can be
//! placed at all, returns its best feasible position over every route. The
//! missed-visit penalty is recovered by the move, so any feasible insertion
//! normally improves the objective.

use crate::search::SearchState;

use super::{insertion_neighbors, ArcDelta, Move, MoveContext, MoveKind};

/// Finds the best improving insertion of a dropped customer.
pub fn find_insertion(ctx: &MoveContext<'_, '_>, state: &SearchState) -> Option<Move> {
    let model = ctx.model();
    for &slot in state.dropped() {
        let mut best: Option<Move> = None;
        for vehicle in 0..state.num_vehicles() {
            let route = state.route(vehicle);
            for pos in 0..=route.len() {
                let (prev, next) = insertion_neighbors(model, vehicle, route, pos);
                let mut delta = ArcDelta::default();
                delta.remove(ctx, prev, next);
                delta.add(ctx, prev, slot);
                delta.add(ctx, slot, next);

                if let Some(score) = ctx.improves(state, &[(vehicle, delta)], 1) {
                    if best.map_or(true, |b| score.augmented < b.score.augmented) {
                        best = Some(Move {
                            kind: MoveKind::Insert { slot, vehicle, pos },
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
