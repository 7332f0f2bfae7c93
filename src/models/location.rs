//! Depot and customer locations.

use serde::{Deserialize, Serialize};

/// Role of a location in a routing problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationKind {
    /// Start and end point of vehicle routes.
    Depot,
    /// A stop that must be visited by exactly one vehicle.
    Customer,
}

/// A depot or customer with 2-D coordinates.
///
/// Identity is the `id`; coordinates never change once built.
///
/// # Examples
///
/// ```
/// use depot_routing::models::{Location, LocationKind};
///
/// let depot = Location::depot("D1", 0.0, 0.0);
/// assert_eq!(depot.kind(), LocationKind::Depot);
///
/// let c = Location::customer("C1", 3.0, 4.0);
/// assert_eq!(c.id(), "C1");
/// assert!((depot.distance_to(&c) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    id: String,
    x: f64,
    y: f64,
    kind: LocationKind,
}

impl Location {
    /// Creates a location of the given kind.
    pub fn new(id: impl Into<String>, x: f64, y: f64, kind: LocationKind) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            kind,
        }
    }

    /// Creates a depot.
    pub fn depot(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self::new(id, x, y, LocationKind::Depot)
    }

    /// Creates a customer.
    pub fn customer(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self::new(id, x, y, LocationKind::Customer)
    }

    /// Location identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Depot or customer.
    pub fn kind(&self) -> LocationKind {
        self.kind
    }

    /// Returns `true` for depots.
    pub fn is_depot(&self) -> bool {
        self.kind == LocationKind::Depot
    }

    /// Returns `true` if both coordinates are finite.
    pub fn has_finite_coordinates(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance to another location.
    pub fn distance_to(&self, other: &Location) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Returns a copy of this location with a different role.
    pub(crate) fn with_kind(mut self, kind: LocationKind) -> Self {
        self.kind = kind;
        self
    }
}
