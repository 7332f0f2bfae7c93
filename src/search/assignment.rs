//! Successor encoding of a solved assignment.

use crate::index::RouteIndexSpace;

/// A solution as a successor map over visit slots.
///
/// `next(slot)` is the slot visited right after `slot`. End slots and
/// unperformed customer slots have no successor. An idle vehicle's start
/// slot points directly at its end slot.
///
/// # Examples
///
/// ```
/// use depot_routing::index::RouteIndexSpace;
/// use depot_routing::search::Assignment;
///
/// // 1 depot, 2 customers (slots 0, 1), 2 vehicles.
/// let space = RouteIndexSpace::new(3, 1, &[0, 0], &[0, 0]);
/// let assignment = Assignment::from_routes(&space, &[vec![1, 0], vec![]]);
/// assert_eq!(assignment.next(space.start_slot(0)), Some(1));
/// assert_eq!(assignment.route_slots(&space, 0), vec![2, 1, 0, 3]);
/// assert_eq!(assignment.route_slots(&space, 1), vec![4, 5]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    next: Vec<Option<usize>>,
}

impl Assignment {
    /// Encodes per-vehicle customer slot sequences.
    pub fn from_routes(space: &RouteIndexSpace, routes: &[Vec<usize>]) -> Self {
        let mut next = vec![None; space.num_slots()];
        for (vehicle, route) in routes.iter().enumerate() {
            let mut prev = space.start_slot(vehicle);
            for &slot in route {
                next[prev] = Some(slot);
                prev = slot;
            }
            next[prev] = Some(space.end_slot(vehicle));
        }
        Self { next }
    }

    /// Successor of `slot`.
    pub fn next(&self, slot: usize) -> Option<usize> {
        self.next.get(slot).copied().flatten()
    }

    /// Returns `true` if a customer slot is visited by some vehicle.
    pub fn is_performed(&self, slot: usize) -> bool {
        self.next(slot).is_some()
    }

    /// Slots of a vehicle's route from its start slot to its end slot.
    ///
    /// The walk is bounded by the number of slots, so a malformed map cannot
    /// loop forever.
    pub fn route_slots(&self, space: &RouteIndexSpace, vehicle: usize) -> Vec<usize> {
        let end = space.end_slot(vehicle);
        let mut slots = vec![space.start_slot(vehicle)];
        let mut current = slots[0];
        while current != end && slots.len() <= self.next.len() {
            match self.next(current) {
                Some(succ) => {
                    slots.push(succ);
                    current = succ;
                }
                None => break,
            }
        }
        slots
    }

    /// Customer slots no vehicle visits.
    pub fn unperformed(&self, space: &RouteIndexSpace) -> Vec<usize> {
        space
            .customer_slots()
            .filter(|&slot| !self.is_performed(slot))
            .collect()
    }
}
