//! Validated multi-depot problem instance.

use std::collections::HashMap;

use serde::Serialize;

use super::{Location, LocationKind, Vehicle};
use crate::error::ValidationError;

/// Largest accepted absolute coordinate.
///
/// Keeps every arc below `3e12` cost units, so sums over millions of arcs
/// stay far from `i64::MAX`.
pub const MAX_COORDINATE: f64 = 1e12;

/// A validated multi-depot routing problem.
///
/// Locations are stored as `depots ++ customers`, so depot `i` is node `i`
/// and customer `j` is node `num_depots + j`. These node indices are the
/// rows and columns of the distance matrix.
///
/// # Examples
///
/// ```
/// use depot_routing::models::{Location, ProblemInstance};
///
/// let depots = vec![Location::depot("D1", 0.0, 0.0)];
/// let customers = vec![
///     Location::customer("C1", 1.0, 0.0),
///     Location::customer("C2", 2.0, 0.0),
/// ];
/// let problem = ProblemInstance::build(depots, customers, 5).unwrap();
/// // Never more vehicles than customers.
/// assert_eq!(problem.vehicle_count(), 2);
/// assert_eq!(problem.node_of("C2"), Some(2));
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ProblemInstance {
    id: String,
    locations: Vec<Location>,
    num_depots: usize,
    vehicles: Vec<Vehicle>,
    #[serde(skip)]
    node_index: HashMap<String, usize>,
}

impl ProblemInstance {
    /// Validates raw location lists and builds a problem instance.
    ///
    /// The effective vehicle count is `min(requested_vehicles, customers)`.
    /// Vehicles are assigned to depots round-robin (`vehicle_id mod depots`).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if either list is empty, a coordinate is
    /// non-finite or beyond [`MAX_COORDINATE`], an id is repeated, or
    /// `requested_vehicles <= 0`.
    pub fn build(
        depots: Vec<Location>,
        customers: Vec<Location>,
        requested_vehicles: i64,
    ) -> Result<Self, ValidationError> {
        if depots.is_empty() {
            return Err(ValidationError::NoDepots);
        }
        if customers.is_empty() {
            return Err(ValidationError::NoCustomers);
        }
        if requested_vehicles <= 0 {
            return Err(ValidationError::NonPositiveVehicleCount(requested_vehicles));
        }

        let num_depots = depots.len();
        let locations: Vec<Location> = depots
            .into_iter()
            .map(|d| d.with_kind(LocationKind::Depot))
            .chain(
                customers
                    .into_iter()
                    .map(|c| c.with_kind(LocationKind::Customer)),
            )
            .collect();

        let mut node_index = HashMap::with_capacity(locations.len());
        for (node, loc) in locations.iter().enumerate() {
            if !loc.has_finite_coordinates() {
                return Err(ValidationError::NonFiniteCoordinate {
                    id: loc.id().to_string(),
                });
            }
            if loc.x().abs() > MAX_COORDINATE || loc.y().abs() > MAX_COORDINATE {
                return Err(ValidationError::CoordinateOutOfRange {
                    id: loc.id().to_string(),
                    limit: MAX_COORDINATE,
                });
            }
            if node_index.insert(loc.id().to_string(), node).is_some() {
                return Err(ValidationError::DuplicateLocationId(loc.id().to_string()));
            }
        }

        let num_customers = locations.len() - num_depots;
        let vehicle_count = effective_vehicle_count(requested_vehicles, num_customers);
        let vehicles = (0..vehicle_count)
            .map(|v| Vehicle::new(v, v % num_depots))
            .collect();

        Ok(Self {
            id: String::from("problem"),
            locations,
            num_depots,
            vehicles,
            node_index,
        })
    }

    /// Sets the problem identifier reported in solutions.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Replaces the round-robin depot assignment with an explicit mapping.
    ///
    /// `depot_of_vehicle[v]` is the depot index vehicle `v` starts and ends at.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDepotAssignment`] if the mapping does
    /// not have one entry per vehicle or refers to a missing depot.
    pub fn with_depot_assignment(
        mut self,
        depot_of_vehicle: Vec<usize>,
    ) -> Result<Self, ValidationError> {
        let invalid = depot_of_vehicle.len() != self.vehicles.len()
            || depot_of_vehicle.iter().any(|&d| d >= self.num_depots);
        if invalid {
            return Err(ValidationError::InvalidDepotAssignment {
                given: depot_of_vehicle.len(),
                vehicles: self.vehicles.len(),
                depots: self.num_depots,
            });
        }
        self.vehicles = depot_of_vehicle
            .into_iter()
            .enumerate()
            .map(|(v, d)| Vehicle::new(v, d))
            .collect();
        Ok(self)
    }

    /// Problem identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// All locations, depots first.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Depot locations (nodes `0..num_depots`).
    pub fn depots(&self) -> &[Location] {
        &self.locations[..self.num_depots]
    }

    /// Customer locations (nodes `num_depots..`).
    pub fn customers(&self) -> &[Location] {
        &self.locations[self.num_depots..]
    }

    /// The fleet, one entry per effective vehicle.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Effective number of vehicles.
    pub fn vehicle_count(&self) -> usize {
        self.vehicles.len()
    }

    /// Number of depots.
    pub fn num_depots(&self) -> usize {
        self.num_depots
    }

    /// Number of customers.
    pub fn num_customers(&self) -> usize {
        self.locations.len() - self.num_depots
    }

    /// Number of physical nodes (depots + customers).
    pub fn num_nodes(&self) -> usize {
        self.locations.len()
    }

    /// Node index of the location with the given id.
    pub fn node_of(&self, id: &str) -> Option<usize> {
        self.node_index.get(id).copied()
    }

    /// Returns `true` if `node` is a depot.
    pub fn is_depot_node(&self, node: usize) -> bool {
        node < self.num_depots
    }
}

/// Vehicle count after clamping to the number of customers.
///
/// A vehicle without customers would only produce an empty route, so the
/// fleet never exceeds the customer count. Always at least 1 for valid input.
pub fn effective_vehicle_count(requested: i64, num_customers: usize) -> usize {
    let requested = usize::try_from(requested.max(1)).unwrap_or(usize::MAX);
    requested.min(num_customers).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn depots() -> Vec<Location> {
        vec![Location::depot("D1", 0.0, 0.0), Location::depot("D2", 50.0, 50.0)]
    }

    fn customers(n: usize) -> Vec<Location> {
        (0..n)
            .map(|i| Location::customer(format!("C{}", i + 1), i as f64, 1.0))
            .collect()
    }

    #[test]
    fn test_build_valid() {
        let p = ProblemInstance::build(depots(), customers(5), 2).expect("valid");
        assert_eq!(p.num_depots(), 2);
        assert_eq!(p.num_customers(), 5);
        assert_eq!(p.num_nodes(), 7);
        assert_eq!(p.vehicle_count(), 2);
        assert_eq!(p.id(), "problem");
    }

    #[test]
    fn test_build_no_customers() {
        let err = ProblemInstance::build(depots(), vec![], 2).unwrap_err();
        assert_eq!(err, ValidationError::NoCustomers);
    }

    #[test]
    fn test_build_no_depots() {
        let err = ProblemInstance::build(vec![], customers(3), 2).unwrap_err();
        assert_eq!(err, ValidationError::NoDepots);
    }

    #[test]
    fn test_build_non_positive_vehicles() {
        assert_eq!(
            ProblemInstance::build(depots(), customers(3), 0).unwrap_err(),
            ValidationError::NonPositiveVehicleCount(0)
        );
        assert_eq!(
            ProblemInstance::build(depots(), customers(3), -4).unwrap_err(),
            ValidationError::NonPositiveVehicleCount(-4)
        );
    }

    #[test]
    fn test_build_non_finite() {
        let mut cs = customers(2);
        cs.push(Location::customer("bad", f64::NAN, 0.0));
        let err = ProblemInstance::build(depots(), cs, 1).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NonFiniteCoordinate {
                id: "bad".to_string()
            }
        );
    }

    #[test]
    fn test_build_coordinate_out_of_range() {
        let cs = vec![Location::customer("far", 4e18, 0.0)];
        let depots = vec![Location::depot("D1", -4e18, 0.0)];
        let err = ProblemInstance::build(depots, cs, 1).unwrap_err();
        assert_eq!(
            err,
            ValidationError::CoordinateOutOfRange {
                id: "D1".to_string(),
                limit: MAX_COORDINATE
            }
        );

        let edge = vec![Location::customer("edge", MAX_COORDINATE, -MAX_COORDINATE)];
        assert!(ProblemInstance::build(vec![Location::depot("D1", 0.0, 0.0)], edge, 1).is_ok());
    }

    #[test]
    fn test_build_duplicate_id() {
        let cs = vec![
            Location::customer("C1", 1.0, 1.0),
            Location::customer("C1", 2.0, 2.0),
        ];
        let err = ProblemInstance::build(depots(), cs, 1).unwrap_err();
        assert_eq!(err, ValidationError::DuplicateLocationId("C1".to_string()));
    }

    #[test]
    fn test_vehicle_clamp() {
        let p = ProblemInstance::build(depots(), customers(3), 10).expect("valid");
        assert_eq!(p.vehicle_count(), 3);
    }

    #[test]
    fn test_round_robin_depots() {
        let p = ProblemInstance::build(depots(), customers(5), 5).expect("valid");
        let assigned: Vec<usize> = p.vehicles().iter().map(|v| v.start_depot()).collect();
        assert_eq!(assigned, vec![0, 1, 0, 1, 0]);
    }

    #[test]
    fn test_explicit_depot_assignment() {
        let p = ProblemInstance::build(depots(), customers(3), 3)
            .expect("valid")
            .with_depot_assignment(vec![1, 1, 0])
            .expect("valid mapping");
        let assigned: Vec<usize> = p.vehicles().iter().map(|v| v.start_depot()).collect();
        assert_eq!(assigned, vec![1, 1, 0]);
        assert!(p.vehicles().iter().all(|v| v.start_depot() == v.end_depot()));
    }

    #[test]
    fn test_invalid_depot_assignment() {
        let p = ProblemInstance::build(depots(), customers(3), 2).expect("valid");
        assert!(p.clone().with_depot_assignment(vec![0]).is_err());
        assert!(p.with_depot_assignment(vec![0, 2]).is_err());
    }

    #[test]
    fn test_kinds_normalized() {
        // A depot passed in the customer list is treated as a customer.
        let cs = vec![Location::depot("X", 1.0, 1.0)];
        let p = ProblemInstance::build(depots(), cs, 1).expect("valid");
        assert_eq!(p.customers()[0].kind(), LocationKind::Customer);
        assert!(p.depots().iter().all(|d| d.is_depot()));
    }

    #[test]
    fn test_node_lookup() {
        let p = ProblemInstance::build(depots(), customers(2), 1)
            .expect("valid")
            .with_id("Problem 1");
        assert_eq!(p.id(), "Problem 1");
        assert_eq!(p.node_of("D2"), Some(1));
        assert_eq!(p.node_of("C1"), Some(2));
        assert_eq!(p.node_of("missing"), None);
        assert!(p.is_depot_node(1));
        assert!(!p.is_depot_node(2));
    }

    proptest! {
        #[test]
        fn prop_vehicle_count_clamped(requested in 1i64..50, n in 1usize..30) {
            let count = effective_vehicle_count(requested, n);
            prop_assert_eq!(count, (requested as usize).min(n));
            prop_assert!(count >= 1);
        }
    }
}
