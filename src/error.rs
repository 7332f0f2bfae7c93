//! Error types for problem validation and search outcomes.

use thiserror::Error;

/// Malformed problem input or solver configuration.
///
/// Raised before any search is attempted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// The depot list is empty.
    #[error("problem must contain at least one depot")]
    NoDepots,
    /// The customer list is empty.
    #[error("problem must contain at least one customer")]
    NoCustomers,
    /// A location has a NaN or infinite coordinate.
    #[error("location `{id}` has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// Offending location id.
        id: String,
    },
    /// A coordinate is too large for integer cost accumulation.
    #[error("location `{id}` has a coordinate beyond +/-{limit:e}")]
    CoordinateOutOfRange {
        /// Offending location id.
        id: String,
        /// Largest accepted absolute coordinate.
        limit: f64,
    },
    /// Requested vehicle count is zero or negative.
    #[error("vehicle count must be positive, got {0}")]
    NonPositiveVehicleCount(i64),
    /// Two locations share the same id.
    #[error("location id `{0}` appears more than once")]
    DuplicateLocationId(String),
    /// An explicit vehicle-to-depot mapping does not fit the problem.
    #[error("depot assignment has {given} entries for {vehicles} vehicles (depots: {depots})")]
    InvalidDepotAssignment {
        /// Number of entries supplied.
        given: usize,
        /// Effective vehicle count.
        vehicles: usize,
        /// Number of depots available.
        depots: usize,
    },
    /// The search time budget is zero.
    #[error("time budget must be greater than zero")]
    NonPositiveTimeBudget,
    /// The route distance cap is zero or negative.
    #[error("max route distance must be positive, got {0}")]
    NonPositiveMaxRouteDistance(i64),
    /// The span cost weight is negative.
    #[error("span cost weight must not be negative, got {0}")]
    NegativeSpanCostWeight(i64),
    /// The missed-visit penalty is zero or negative.
    #[error("missed visit penalty must be positive, got {0}")]
    NonPositivePenalty(i64),
    /// The configuration could not be parsed.
    #[error("invalid solver configuration: {0}")]
    InvalidConfig(String),
}

/// No assignment serves every customer within the route distance cap.
///
/// Returned by [`RoutingEngine::solve`](crate::engine::RoutingEngine::solve)
/// only when the missed-visit penalty is disabled; with a penalty in place the
/// unserved customers are reported as dropped instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} customer(s) cannot be served within max route distance {max_route_distance}", .unserved.len())]
pub struct InfeasibleInstance {
    /// Ids of customers left unserved by the best solution found.
    pub unserved: Vec<String>,
    /// The distance cap that could not be met.
    pub max_route_distance: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::NoCustomers.to_string(),
            "problem must contain at least one customer"
        );
        assert_eq!(
            ValidationError::NonFiniteCoordinate { id: "C3".into() }.to_string(),
            "location `C3` has a non-finite coordinate"
        );
        assert_eq!(
            ValidationError::CoordinateOutOfRange {
                id: "C9".into(),
                limit: 1e12
            }
            .to_string(),
            "location `C9` has a coordinate beyond +/-1e12"
        );
        assert_eq!(
            ValidationError::NonPositiveVehicleCount(0).to_string(),
            "vehicle count must be positive, got 0"
        );
    }

    #[test]
    fn test_infeasible_message() {
        let err = InfeasibleInstance {
            unserved: vec!["C1".into(), "C2".into()],
            max_route_distance: 10,
        };
        assert_eq!(
            err.to_string(),
            "2 customer(s) cannot be served within max route distance 10"
        );
    }
}
