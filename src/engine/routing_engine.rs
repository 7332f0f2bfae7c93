//! Multi-depot routing engine.
//!
//! Ties the pipeline together: distance matrix, slot layout, cost model,
//! search, and decoding. One call owns all of its search state, so a single
//! engine can serve many problems, in parallel through
//! [`RoutingEngine::solve_batch`].

use log::{info, warn};
use rayon::prelude::*;

use crate::config::SolverConfig;
use crate::decoder::SolutionDecoder;
use crate::distance::DistanceMatrix;
use crate::error::{InfeasibleInstance, ValidationError};
use crate::evaluation::CostModel;
use crate::index::RouteIndexSpace;
use crate::models::{Location, ProblemInstance, Solution};
use crate::search::SearchRunner;

/// Missed-visit penalty the search uses when none is configured.
///
/// Without a configured penalty an unserved customer is a hard failure, but
/// the search still needs a dominating cost to steer towards full coverage.
pub const SEARCH_VISIT_PENALTY: i64 = 1_000_000;

/// Solves multi-depot routing problems with a fixed configuration.
///
/// # Examples
///
/// ```
/// use depot_routing::config::SolverConfig;
/// use depot_routing::engine::RoutingEngine;
/// use depot_routing::models::Location;
///
/// let config = SolverConfig::default()
///     .with_vehicle_count(2)
///     .with_max_iterations(Some(100));
/// let engine = RoutingEngine::new(config).unwrap();
///
/// let problem = engine
///     .build_problem(
///         vec![Location::depot("D1", 0.0, 0.0), Location::depot("D2", 50.0, 50.0)],
///         vec![
///             Location::customer("C1", 10.0, 10.0),
///             Location::customer("C2", 40.0, 35.0),
///         ],
///     )
///     .unwrap();
/// let solution = engine.solve(&problem).unwrap();
/// assert!(solution.is_complete());
/// assert!(solution.total_distance() > 0);
/// ```
#[derive(Debug, Clone)]
pub struct RoutingEngine {
    config: SolverConfig,
}

impl RoutingEngine {
    /// Creates an engine after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] reported by [`SolverConfig::validate`].
    pub fn new(config: SolverConfig) -> Result<Self, ValidationError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The engine's configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Builds a problem with the configured vehicle count.
    ///
    /// # Errors
    ///
    /// See [`ProblemInstance::build`].
    pub fn build_problem(
        &self,
        depots: Vec<Location>,
        customers: Vec<Location>,
    ) -> Result<ProblemInstance, ValidationError> {
        ProblemInstance::build(depots, customers, self.config.vehicle_count())
    }

    /// Solves one problem within the configured time budget.
    ///
    /// With a missed-visit penalty configured, customers the search could not
    /// place are listed in [`Solution::dropped`] and charged in its cost.
    ///
    /// # Errors
    ///
    /// Returns [`InfeasibleInstance`] if the missed-visit penalty is disabled
    /// and the best solution found leaves customers unserved.
    pub fn solve(&self, problem: &ProblemInstance) -> Result<Solution, InfeasibleInstance> {
        let config = &self.config;
        info!(
            "solving {}: {} depots, {} customers, {} vehicles",
            problem.id(),
            problem.num_depots(),
            problem.num_customers(),
            problem.vehicle_count()
        );

        let distances = DistanceMatrix::from_locations(problem.locations(), config.distance_rounding());
        debug_assert!(distances.is_symmetric());
        let space = RouteIndexSpace::from_problem(problem);
        let penalty = config.missed_visit_penalty().unwrap_or(SEARCH_VISIT_PENALTY);
        let longest_route = distances.max_entry().saturating_mul(problem.num_nodes() as i64);
        if penalty <= longest_route {
            warn!(
                "{}: missed-visit penalty {penalty} does not dominate route costs (up to {longest_route})",
                problem.id()
            );
        }
        let model = CostModel::new(
            &distances,
            &space,
            config.max_route_distance(),
            config.span_cost_weight(),
            penalty,
        );

        let outcome = SearchRunner::new(&model, config).run();
        debug_assert!(model.violations(outcome.best.routes(), &[]).is_empty());
        let assignment = outcome.best.to_assignment(&model);
        let solution = SolutionDecoder::new(problem, &model).decode(&assignment);

        info!(
            "solved {}: distance={}, cost={}, vehicles used={}, iterations={}, elapsed={:?}",
            problem.id(),
            solution.total_distance(),
            solution.total_cost(),
            solution.num_vehicles_used(),
            outcome.iterations,
            outcome.elapsed
        );

        if !solution.dropped().is_empty() {
            warn!(
                "{}: {} customer(s) unserved: {:?}",
                problem.id(),
                solution.dropped().len(),
                solution.dropped()
            );
            if config.missed_visit_penalty().is_none() {
                return Err(InfeasibleInstance {
                    unserved: solution.dropped().to_vec(),
                    max_route_distance: config.max_route_distance(),
                });
            }
        }
        Ok(solution)
    }

    /// Solves independent problems in parallel, one result per problem in
    /// input order.
    pub fn solve_batch(&self, problems: &[ProblemInstance]) -> Vec<Result<Solution, InfeasibleInstance>> {
        problems.par_iter().map(|problem| self.solve(problem)).collect()
    }
}
