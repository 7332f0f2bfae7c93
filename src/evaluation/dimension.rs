//! Accumulated-distance dimension.

/// A per-vehicle accumulator of transit cost with a hard ceiling.
///
/// The cumulative value is zero at the vehicle's start slot and grows by the
/// transit cost of every arc. A route is feasible only if no cumulative
/// value exceeds the capacity. Transit costs are non-negative, so checking
/// the final value is enough; [`is_within_capacity`](Self::is_within_capacity)
/// still checks every position.
///
/// # Examples
///
/// ```
/// use depot_routing::evaluation::DistanceDimension;
///
/// let dim = DistanceDimension::new(100);
/// let cumuls = dim.cumuls([30, 40, 20]);
/// assert_eq!(cumuls, vec![0, 30, 70, 90]);
/// assert!(dim.is_within_capacity(&cumuls));
/// assert!(!dim.is_within_capacity(&dim.cumuls([60, 60])));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistanceDimension {
    capacity: i64,
}

impl DistanceDimension {
    /// Creates a dimension capped at `capacity` cost units.
    pub fn new(capacity: i64) -> Self {
        Self { capacity }
    }

    /// Maximum cumulative value.
    pub fn capacity(&self) -> i64 {
        self.capacity
    }

    /// Cumulative values at each slot given the transit of each arc.
    ///
    /// Returns one more value than there are arcs; the first is always zero.
    pub fn cumuls(&self, transits: impl IntoIterator<Item = i64>) -> Vec<i64> {
        let mut cumul = 0;
        std::iter::once(0)
            .chain(transits.into_iter().map(|t| {
                cumul += t;
                cumul
            }))
            .collect()
    }

    /// Returns `true` if no cumulative value exceeds the capacity.
    pub fn is_within_capacity(&self, cumuls: &[i64]) -> bool {
        cumuls.iter().all(|&c| c <= self.capacity)
    }

    /// Returns `true` if a route of the given total distance fits.
    pub fn admits(&self, distance: i64) -> bool {
        distance <= self.capacity
    }
}
