//! Solver configuration.
//!
//! Every tunable of the engine is explicit here; nothing is hidden in the
//! search code. Defaults reproduce the classic multi-depot setup: a 5000
//! unit route cap, span coefficient 100, a 1,000,000 missed-visit penalty,
//! cheapest-arc construction and a 30 second guided local search.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::distance::Rounding;
use crate::error::ValidationError;

/// Heuristic used to build the first solution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirstSolutionStrategy {
    /// Extend the route end with the globally cheapest feasible arc.
    #[default]
    PathCheapestArc,
    /// Insert the customer with the cheapest feasible insertion anywhere.
    CheapestInsertion,
}

/// Metaheuristic used after construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImprovementStrategy {
    /// Local search with adaptive arc penalties to escape local optima.
    #[default]
    GuidedLocalSearch,
    /// Plain descent; stops at the first local optimum.
    GreedyDescent,
}

/// Engine configuration.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use depot_routing::config::{SolverConfig, ImprovementStrategy};
///
/// let config = SolverConfig::default()
///     .with_vehicle_count(4)
///     .with_time_budget(Duration::from_secs(2))
///     .with_improvement_strategy(ImprovementStrategy::GreedyDescent);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.max_route_distance(), 5000);
///
/// let parsed = SolverConfig::from_json_str(r#"{"vehicle_count": 3, "time_budget_seconds": 1.5}"#).unwrap();
/// assert_eq!(parsed.vehicle_count(), 3);
/// assert_eq!(parsed.time_budget(), Duration::from_millis(1500));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    vehicle_count: i64,
    max_route_distance: i64,
    span_cost_weight: i64,
    missed_visit_penalty: Option<i64>,
    #[serde(rename = "time_budget_seconds", with = "duration_secs")]
    time_budget: Duration,
    first_solution_strategy: FirstSolutionStrategy,
    improvement_strategy: ImprovementStrategy,
    distance_rounding: Rounding,
    gls_lambda: f64,
    max_iterations: Option<usize>,
    seed: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            vehicle_count: 1,
            max_route_distance: 5000,
            span_cost_weight: 100,
            missed_visit_penalty: Some(1_000_000),
            time_budget: Duration::from_secs(30),
            first_solution_strategy: FirstSolutionStrategy::default(),
            improvement_strategy: ImprovementStrategy::default(),
            distance_rounding: Rounding::default(),
            gls_lambda: 0.3,
            max_iterations: None,
            seed: 0,
        }
    }
}

impl SolverConfig {
    /// Parses and validates a JSON configuration. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidConfig`] for malformed JSON, or the
    /// matching variant if a value is out of range.
    pub fn from_json_str(json: &str) -> Result<Self, ValidationError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ValidationError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every value is in range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.vehicle_count <= 0 {
            return Err(ValidationError::NonPositiveVehicleCount(self.vehicle_count));
        }
        if self.max_route_distance <= 0 {
            return Err(ValidationError::NonPositiveMaxRouteDistance(
                self.max_route_distance,
            ));
        }
        if self.span_cost_weight < 0 {
            return Err(ValidationError::NegativeSpanCostWeight(self.span_cost_weight));
        }
        if let Some(penalty) = self.missed_visit_penalty {
            if penalty <= 0 {
                return Err(ValidationError::NonPositivePenalty(penalty));
            }
        }
        if self.time_budget.is_zero() {
            return Err(ValidationError::NonPositiveTimeBudget);
        }
        if !self.gls_lambda.is_finite() || self.gls_lambda < 0.0 {
            return Err(ValidationError::InvalidConfig(format!(
                "gls_lambda must be a non-negative number, got {}",
                self.gls_lambda
            )));
        }
        Ok(())
    }

    /// Sets the requested number of vehicles.
    pub fn with_vehicle_count(mut self, count: i64) -> Self {
        self.vehicle_count = count;
        self
    }

    /// Sets the per-vehicle route distance cap.
    pub fn with_max_route_distance(mut self, max: i64) -> Self {
        self.max_route_distance = max;
        self
    }

    /// Sets the span-balance coefficient.
    pub fn with_span_cost_weight(mut self, weight: i64) -> Self {
        self.span_cost_weight = weight;
        self
    }

    /// Sets the missed-visit penalty; `None` makes every visit mandatory.
    pub fn with_missed_visit_penalty(mut self, penalty: Option<i64>) -> Self {
        self.missed_visit_penalty = penalty;
        self
    }

    /// Sets the wall-clock search budget.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = budget;
        self
    }

    /// Sets the construction heuristic.
    pub fn with_first_solution_strategy(mut self, strategy: FirstSolutionStrategy) -> Self {
        self.first_solution_strategy = strategy;
        self
    }

    /// Sets the improvement metaheuristic.
    pub fn with_improvement_strategy(mut self, strategy: ImprovementStrategy) -> Self {
        self.improvement_strategy = strategy;
        self
    }

    /// Sets the distance rounding policy.
    pub fn with_distance_rounding(mut self, rounding: Rounding) -> Self {
        self.distance_rounding = rounding;
        self
    }

    /// Sets the guided local search penalty coefficient.
    pub fn with_gls_lambda(mut self, lambda: f64) -> Self {
        self.gls_lambda = lambda;
        self
    }

    /// Caps the number of improvement iterations.
    pub fn with_max_iterations(mut self, max: Option<usize>) -> Self {
        self.max_iterations = max;
        self
    }

    /// Sets the seed of the scan-order RNG.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Requested number of vehicles.
    pub fn vehicle_count(&self) -> i64 {
        self.vehicle_count
    }

    /// Per-vehicle route distance cap.
    pub fn max_route_distance(&self) -> i64 {
        self.max_route_distance
    }

    /// Span-balance coefficient.
    pub fn span_cost_weight(&self) -> i64 {
        self.span_cost_weight
    }

    /// Penalty per dropped customer, if dropping is allowed.
    pub fn missed_visit_penalty(&self) -> Option<i64> {
        self.missed_visit_penalty
    }

    /// Wall-clock search budget.
    pub fn time_budget(&self) -> Duration {
        self.time_budget
    }

    /// Construction heuristic.
    pub fn first_solution_strategy(&self) -> FirstSolutionStrategy {
        self.first_solution_strategy
    }

    /// Improvement metaheuristic.
    pub fn improvement_strategy(&self) -> ImprovementStrategy {
        self.improvement_strategy
    }

    /// Distance rounding policy.
    pub fn distance_rounding(&self) -> Rounding {
        self.distance_rounding
    }

    /// Guided local search penalty coefficient.
    pub fn gls_lambda(&self) -> f64 {
        self.gls_lambda
    }

    /// Improvement iteration cap, if any.
    pub fn max_iterations(&self) -> Option<usize> {
        self.max_iterations
    }

    /// Seed of the scan-order RNG.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

mod duration_secs {
    use std::time::Duration;

    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = SolverConfig::default();
        assert_eq!(c.vehicle_count(), 1);
        assert_eq!(c.max_route_distance(), 5000);
        assert_eq!(c.span_cost_weight(), 100);
        assert_eq!(c.missed_visit_penalty(), Some(1_000_000));
        assert_eq!(c.time_budget(), Duration::from_secs(30));
        assert_eq!(c.first_solution_strategy(), FirstSolutionStrategy::PathCheapestArc);
        assert_eq!(c.improvement_strategy(), ImprovementStrategy::GuidedLocalSearch);
        assert_eq!(c.distance_rounding(), Rounding::Truncate);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let c = SolverConfig::default()
            .with_max_route_distance(800)
            .with_span_cost_weight(0)
            .with_missed_visit_penalty(None)
            .with_first_solution_strategy(FirstSolutionStrategy::CheapestInsertion)
            .with_distance_rounding(Rounding::Nearest)
            .with_gls_lambda(0.5)
            .with_max_iterations(Some(10))
            .with_seed(7);
        assert_eq!(c.max_route_distance(), 800);
        assert_eq!(c.span_cost_weight(), 0);
        assert_eq!(c.missed_visit_penalty(), None);
        assert_eq!(c.first_solution_strategy(), FirstSolutionStrategy::CheapestInsertion);
        assert_eq!(c.distance_rounding(), Rounding::Nearest);
        assert_eq!(c.gls_lambda(), 0.5);
        assert_eq!(c.max_iterations(), Some(10));
        assert_eq!(c.seed(), 7);
    }

    #[test]
    fn test_validate_rejects() {
        let base = SolverConfig::default();
        assert_eq!(
            base.clone().with_vehicle_count(0).validate(),
            Err(ValidationError::NonPositiveVehicleCount(0))
        );
        assert_eq!(
            base.clone().with_max_route_distance(0).validate(),
            Err(ValidationError::NonPositiveMaxRouteDistance(0))
        );
        assert_eq!(
            base.clone().with_span_cost_weight(-1).validate(),
            Err(ValidationError::NegativeSpanCostWeight(-1))
        );
        assert_eq!(
            base.clone().with_missed_visit_penalty(Some(0)).validate(),
            Err(ValidationError::NonPositivePenalty(0))
        );
        assert_eq!(
            base.clone().with_time_budget(Duration::ZERO).validate(),
            Err(ValidationError::NonPositiveTimeBudget)
        );
        assert!(base.with_gls_lambda(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_from_json() {
        let c = SolverConfig::from_json_str(
            r#"{
                "vehicle_count": 4,
                "max_route_distance": 1200,
                "missed_visit_penalty": null,
                "first_solution_strategy": "cheapest_insertion",
                "improvement_strategy": "greedy_descent",
                "distance_rounding": "nearest",
                "time_budget_seconds": 0.25
            }"#,
        )
        .expect("valid config");
        assert_eq!(c.vehicle_count(), 4);
        assert_eq!(c.max_route_distance(), 1200);
        assert_eq!(c.missed_visit_penalty(), None);
        assert_eq!(c.first_solution_strategy(), FirstSolutionStrategy::CheapestInsertion);
        assert_eq!(c.improvement_strategy(), ImprovementStrategy::GreedyDescent);
        assert_eq!(c.distance_rounding(), Rounding::Nearest);
        assert_eq!(c.time_budget(), Duration::from_millis(250));
        // Unspecified keys keep their defaults.
        assert_eq!(c.span_cost_weight(), 100);
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(
            SolverConfig::from_json_str("{not json"),
            Err(ValidationError::InvalidConfig(_))
        ));
        assert!(matches!(
            SolverConfig::from_json_str(r#"{"time_budget_seconds": -1.0}"#),
            Err(ValidationError::InvalidConfig(_))
        ));
        assert_eq!(
            SolverConfig::from_json_str(r#"{"max_route_distance": -5}"#),
            Err(ValidationError::NonPositiveMaxRouteDistance(-5))
        );
    }

    #[test]
    fn test_json_round_trip_keys() {
        let json = serde_json::to_value(SolverConfig::default()).expect("serialize");
        assert_eq!(json["time_budget_seconds"], 30.0);
        assert_eq!(json["first_solution_strategy"], "path_cheapest_arc");
    }
}
