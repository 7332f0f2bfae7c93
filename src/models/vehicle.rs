//! Vehicle bound to a home depot.

use serde::{Deserialize, Serialize};

/// A vehicle that departs from and returns to its home depot.
///
/// Depots are referenced by their index in the problem's depot list. The
/// fleet is homogeneous: every vehicle shares the same cost structure and
/// distance cap.
///
/// # Examples
///
/// ```
/// use depot_routing::models::Vehicle;
///
/// let v = Vehicle::new(3, 1);
/// assert_eq!(v.id(), 3);
/// assert_eq!(v.start_depot(), 1);
/// assert_eq!(v.end_depot(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    id: usize,
    start_depot: usize,
    end_depot: usize,
}

impl Vehicle {
    /// Creates a vehicle that starts and ends at `depot`.
    pub fn new(id: usize, depot: usize) -> Self {
        Self {
            id,
            start_depot: depot,
            end_depot: depot,
        }
    }

    /// Vehicle ID.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Depot index the vehicle departs from.
    pub fn start_depot(&self) -> usize {
        self.start_depot
    }

    /// Depot index the vehicle returns to.
    pub fn end_depot(&self) -> usize {
        self.end_depot
    }
}
