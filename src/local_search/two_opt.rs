//! Intra-route 2-opt improvement.
//!
//! # Algorithm
//!
//! For positions `i < j` of a route, reversing `r[i..=j]` replaces the arcs
//! `(prev, r[i])` and `(r[j], next)` with `(prev, r[j])` and `(r[i], next)`:
//!
//! ```text
//! delta = d(prev, r[j]) + d(r[i], next) - d(prev, r[i]) - d(r[j], next)
//! ```
//!
//! where `prev` is the start depot when `i = 0` and `next` is the end depot
//! when `j` is the last position. The first improving pair is returned.
//!
//! # Complexity
//!
//! O(n²) per route per call.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use crate::search::SearchState;

use super::{ArcDelta, Move, MoveContext, MoveKind};

/// Finds an improving segment reversal in any route.
pub fn find_two_opt(ctx: &MoveContext<'_, '_>, state: &SearchState) -> Option<Move> {
    let model = ctx.model();
    for vehicle in 0..state.num_vehicles() {
        let route = state.route(vehicle);
        for i in 0..route.len() {
            let prev = model.prev_slot(vehicle, route, i);
            for j in (i + 1)..route.len() {
                let next = model.next_slot(vehicle, route, j);

                let mut delta = ArcDelta::default();
                delta.remove(ctx, prev, route[i]);
                delta.remove(ctx, route[j], next);
                delta.add(ctx, prev, route[j]);
                delta.add(ctx, route[i], next);

                if let Some(score) = ctx.improves(state, &[(vehicle, delta)], 0) {
                    return Some(Move {
                        kind: MoveKind::TwoOpt { vehicle, i, j },
                        score,
                    });
                }
            }
        }
    }
    None
}
