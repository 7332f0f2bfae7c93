//! Visit-slot indexing over vehicles and physical nodes.

use crate::models::ProblemInstance;

/// Maps abstract visit slots to physical nodes.
///
/// A physical depot may be shared by many vehicles, so each vehicle gets its
/// own start and end slot bound to its depot node. Customers own exactly one
/// slot each, claimed by whichever vehicle visits them.
///
/// Layout: customer slots come first, in node order; then, for each vehicle,
/// its start slot followed by its end slot.
///
/// # Examples
///
/// ```
/// use depot_routing::index::RouteIndexSpace;
///
/// // 2 depots (nodes 0, 1), 3 customers (nodes 2..5), 3 vehicles.
/// let space = RouteIndexSpace::new(5, 2, &[0, 1, 0], &[0, 1, 0]);
/// assert_eq!(space.num_slots(), 3 + 2 * 3);
/// assert_eq!(space.slot_to_node(0), 2);
/// assert_eq!(space.start_slot(1), 5);
/// assert_eq!(space.slot_to_node(space.end_slot(1)), 1);
/// assert_eq!(space.node_to_slot(4), Some(2));
/// assert_eq!(space.node_to_slot(0), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteIndexSpace {
    slot_nodes: Vec<usize>,
    num_depots: usize,
    num_customers: usize,
    num_vehicles: usize,
}

impl RouteIndexSpace {
    /// Builds the slot layout.
    ///
    /// `starts[v]` and `ends[v]` are the depot nodes of vehicle `v`.
    ///
    /// # Panics
    ///
    /// Panics if `starts` and `ends` differ in length or refer to a
    /// non-depot node.
    pub fn new(num_nodes: usize, num_depots: usize, starts: &[usize], ends: &[usize]) -> Self {
        assert_eq!(starts.len(), ends.len(), "one start and one end per vehicle");
        assert!(
            starts.iter().chain(ends).all(|&d| d < num_depots),
            "vehicle endpoints must be depot nodes"
        );

        let num_customers = num_nodes - num_depots;
        let mut slot_nodes: Vec<usize> = (num_depots..num_nodes).collect();
        slot_nodes.reserve(2 * starts.len());
        for (&start, &end) in starts.iter().zip(ends) {
            slot_nodes.push(start);
            slot_nodes.push(end);
        }

        Self {
            slot_nodes,
            num_depots,
            num_customers,
            num_vehicles: starts.len(),
        }
    }

    /// Builds the slot layout for a problem's fleet.
    pub fn from_problem(problem: &ProblemInstance) -> Self {
        let starts: Vec<usize> = problem.vehicles().iter().map(|v| v.start_depot()).collect();
        let ends: Vec<usize> = problem.vehicles().iter().map(|v| v.end_depot()).collect();
        Self::new(problem.num_nodes(), problem.num_depots(), &starts, &ends)
    }

    /// Physical node bound to `slot`.
    pub fn slot_to_node(&self, slot: usize) -> usize {
        self.slot_nodes[slot]
    }

    /// Slot owned by a customer node; `None` for depots and unknown nodes.
    pub fn node_to_slot(&self, node: usize) -> Option<usize> {
        if node >= self.num_depots && node < self.num_depots + self.num_customers {
            Some(node - self.num_depots)
        } else {
            None
        }
    }

    /// Start slot of `vehicle`.
    pub fn start_slot(&self, vehicle: usize) -> usize {
        self.num_customers + 2 * vehicle
    }

    /// End slot of `vehicle`.
    pub fn end_slot(&self, vehicle: usize) -> usize {
        self.num_customers + 2 * vehicle + 1
    }

    /// Returns `true` if `slot` belongs to a customer.
    pub fn is_customer_slot(&self, slot: usize) -> bool {
        slot < self.num_customers
    }

    /// Returns `true` if `slot` is some vehicle's start slot.
    pub fn is_start(&self, slot: usize) -> bool {
        !self.is_customer_slot(slot) && (slot - self.num_customers) % 2 == 0
    }

    /// Returns `true` if `slot` is some vehicle's end slot.
    pub fn is_end(&self, slot: usize) -> bool {
        !self.is_customer_slot(slot) && (slot - self.num_customers) % 2 == 1
    }

    /// Vehicle owning a start or end slot.
    pub fn vehicle_of(&self, slot: usize) -> Option<usize> {
        if self.is_customer_slot(slot) || slot >= self.slot_nodes.len() {
            None
        } else {
            Some((slot - self.num_customers) / 2)
        }
    }

    /// Iterator over all customer slots.
    pub fn customer_slots(&self) -> std::ops::Range<usize> {
        0..self.num_customers
    }

    /// Total number of slots.
    pub fn num_slots(&self) -> usize {
        self.slot_nodes.len()
    }

    /// Number of customer slots.
    pub fn num_customers(&self) -> usize {
        self.num_customers
    }

    /// Number of vehicles.
    pub fn num_vehicles(&self) -> usize {
        self.num_vehicles
    }
}
