//! Dense integer distance matrix.

use serde::{Deserialize, Serialize};

use crate::models::Location;

/// How Euclidean distances are converted to integer cost units.
///
/// Integer costs keep accumulation exact during search. `Truncate` matches
/// legacy outputs that cut the fractional part; `Nearest` is closer to the
/// true geometry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rounding {
    /// Drop the fractional part.
    #[default]
    Truncate,
    /// Round half away from zero.
    Nearest,
}

impl Rounding {
    /// Converts a non-negative real distance to cost units.
    pub fn apply(self, distance: f64) -> i64 {
        match self {
            Rounding::Truncate => distance.trunc() as i64,
            Rounding::Nearest => distance.round() as i64,
        }
    }
}

/// A dense n×n matrix of integer travel costs, stored in row-major order.
///
/// Built over `depots ++ customers`, so row `i` is node `i` of the problem.
///
/// # Examples
///
/// ```
/// use depot_routing::models::Location;
/// use depot_routing::distance::{DistanceMatrix, Rounding};
///
/// let locations = vec![
///     Location::depot("D1", 0.0, 0.0),
///     Location::customer("C1", 3.0, 4.0),
///     Location::customer("C2", 1.0, 1.0),
/// ];
/// let dm = DistanceMatrix::from_locations(&locations, Rounding::Truncate);
/// assert_eq!(dm.get(0, 1), 5);
/// assert_eq!(dm.get(0, 2), 1); // sqrt(2) truncated
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    data: Vec<i64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0; size * size],
            size,
        }
    }

    /// Computes a Euclidean cost matrix from location coordinates.
    ///
    /// Only the upper triangle is computed and then mirrored, so the result
    /// is symmetric with a zero diagonal regardless of input order.
    pub fn from_locations(locations: &[Location], rounding: Rounding) -> Self {
        let n = locations.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = rounding.apply(locations[i].distance_to(&locations[j]));
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Returns the cost from node `from` to node `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> i64 {
        self.data[from * self.size + to]
    }

    /// Sets the cost from node `from` to node `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: i64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of nodes in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if `get(i, j) == get(j, i)` for every pair.
    pub fn is_symmetric(&self) -> bool {
        (0..self.size).all(|i| ((i + 1)..self.size).all(|j| self.get(i, j) == self.get(j, i)))
    }

    /// Largest entry, or 0 for an empty matrix.
    pub fn max_entry(&self) -> i64 {
        self.data.iter().copied().max().unwrap_or(0)
    }
}
