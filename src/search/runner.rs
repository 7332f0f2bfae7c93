//! Construction then improvement under a cooperative deadline.
//!
//! # Algorithm
//!
//! The run is an explicit state machine `Construction -> Improvement -> Done`.
//! Construction builds an initial state with the configured first-solution
//! strategy. Each improvement step shuffles the customer scan order, then
//! applies the first improving move from insertion, relocate, swap, and
//! two-opt, tried in that order. When no move improves:
//!
//! - greedy descent stops;
//! - guided local search penalizes the maximum-utility arcs of the current
//!   state and keeps descending on the augmented objective.
//!
//! The best state under the true objective is kept throughout. The loop ends
//! on the time budget, on `max_iterations`, or when guided penalties stop
//! producing moves.

use std::time::{Duration, Instant};

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::config::{FirstSolutionStrategy, ImprovementStrategy, SolverConfig};
use crate::constructive::{cheapest_insertion, path_cheapest_arc};
use crate::evaluation::CostModel;
use crate::local_search::{find_insertion, find_relocate, find_swap, find_two_opt, Move, MoveContext};
use crate::models::CostBreakdown;

use super::{ArcPenalties, SearchState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Construction,
    Improvement,
    Done,
}

/// Result of a search run.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Best state found under the true objective.
    pub best: SearchState,
    /// Objective terms of `best`.
    pub cost: CostBreakdown,
    /// Improvement steps performed (moves plus penalty rounds).
    pub iterations: usize,
    /// Wall-clock time spent.
    pub elapsed: Duration,
}

/// Runs construction and improvement for one cost model.
///
/// # Examples
///
/// ```
/// use depot_routing::config::SolverConfig;
/// use depot_routing::distance::{DistanceMatrix, Rounding};
/// use depot_routing::evaluation::CostModel;
/// use depot_routing::index::RouteIndexSpace;
/// use depot_routing::models::Location;
/// use depot_routing::search::SearchRunner;
///
/// let locations = vec![
///     Location::depot("D1", 0.0, 0.0),
///     Location::customer("C1", 3.0, 4.0),
///     Location::customer("C2", 6.0, 8.0),
/// ];
/// let dm = DistanceMatrix::from_locations(&locations, Rounding::Truncate);
/// let space = RouteIndexSpace::new(3, 1, &[0, 0], &[0, 0]);
/// let model = CostModel::new(&dm, &space, 5000, 100, 1_000_000);
/// let config = SolverConfig::default().with_max_iterations(Some(50));
///
/// let outcome = SearchRunner::new(&model, &config).run();
/// assert!(outcome.best.dropped().is_empty());
/// assert_eq!(outcome.cost.penalty, 0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SearchRunner<'a, 'm> {
    model: &'a CostModel<'m>,
    config: &'a SolverConfig,
}

impl<'a, 'm> SearchRunner<'a, 'm> {
    /// Creates a runner over `model` with the strategies and limits of `config`.
    pub fn new(model: &'a CostModel<'m>, config: &'a SolverConfig) -> Self {
        Self { model, config }
    }

    /// Runs the search to completion and returns the best state seen.
    pub fn run(&self) -> SearchOutcome {
        let model = self.model;
        let started = Instant::now();
        let deadline = started.checked_add(self.config.time_budget());
        let idle_limit = model.space().num_slots();

        let mut rng = StdRng::seed_from_u64(self.config.seed());
        let mut order: Vec<usize> = model.space().customer_slots().collect();
        let mut penalties = ArcPenalties::new();

        let mut phase = Phase::Construction;
        let mut current = SearchState::all_dropped(model);
        let mut best = current.clone();
        let mut best_objective = best.objective(model);
        let mut iterations = 0;
        let mut idle_rounds = 0;

        loop {
            match phase {
                Phase::Construction => {
                    current = match self.config.first_solution_strategy() {
                        FirstSolutionStrategy::PathCheapestArc => path_cheapest_arc(model),
                        FirstSolutionStrategy::CheapestInsertion => cheapest_insertion(model),
                    };
                    best = current.clone();
                    best_objective = best.objective(model);
                    debug!(
                        "construction done: objective={}, dropped={}",
                        best_objective,
                        best.dropped().len()
                    );
                    phase = Phase::Improvement;
                }
                Phase::Improvement => {
                    if deadline.is_some_and(|d| Instant::now() >= d) {
                        debug!("time budget reached after {iterations} iterations");
                        phase = Phase::Done;
                        continue;
                    }
                    if self.config.max_iterations().is_some_and(|max| iterations >= max) {
                        debug!("iteration limit reached");
                        phase = Phase::Done;
                        continue;
                    }
                    iterations += 1;
                    order.shuffle(&mut rng);

                    let ctx = MoveContext::new(model, &penalties);
                    if let Some(mv) = next_move(&ctx, &current, &order) {
                        mv.apply(model, &mut current);
                        idle_rounds = 0;
                        let objective = current.objective(model);
                        // Saturated objectives tie; fewer dropped customers win.
                        let improved = objective < best_objective
                            || (objective == best_objective
                                && current.dropped().len() < best.dropped().len());
                        if improved {
                            trace!("new best {objective} at iteration {iterations}");
                            best = current.clone();
                            best_objective = objective;
                        }
                        continue;
                    }

                    match self.config.improvement_strategy() {
                        ImprovementStrategy::GreedyDescent => {
                            debug!("local optimum reached: objective={best_objective}");
                            phase = Phase::Done;
                        }
                        ImprovementStrategy::GuidedLocalSearch => {
                            let penalized = penalties.penalize(model, &current, self.config.gls_lambda());
                            idle_rounds += 1;
                            debug!(
                                "penalty round: arcs={penalized}, lambda={:.3}, idle={idle_rounds}",
                                penalties.lambda()
                            );
                            if penalized == 0 || idle_rounds > idle_limit {
                                phase = Phase::Done;
                            }
                        }
                    }
                }
                Phase::Done => break,
            }
        }

        SearchOutcome {
            cost: best.cost(model),
            best,
            iterations,
            elapsed: started.elapsed(),
        }
    }
}

fn next_move(ctx: &MoveContext<'_, '_>, state: &SearchState, order: &[usize]) -> Option<Move> {
    find_insertion(ctx, state)
        .or_else(|| find_relocate(ctx, state, order))
        .or_else(|| find_swap(ctx, state, order))
        .or_else(|| find_two_opt(ctx, state))
}
