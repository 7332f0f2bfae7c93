//! Assignment to [`Solution`] decoding.

use crate::evaluation::CostModel;
use crate::models::{ProblemInstance, Route, Solution, Stop};
use crate::search::Assignment;

/// Decodes successor maps into routes of location ids.
///
/// Each vehicle's path is walked from its start slot to its end slot,
/// recording the location id and the cumulative distance at every stop.
/// Vehicles that go straight from start to end are not reported.
///
/// # Examples
///
/// ```
/// use depot_routing::decoder::SolutionDecoder;
/// use depot_routing::distance::{DistanceMatrix, Rounding};
/// use depot_routing::evaluation::CostModel;
/// use depot_routing::index::RouteIndexSpace;
/// use depot_routing::models::{Location, ProblemInstance};
/// use depot_routing::search::Assignment;
///
/// let problem = ProblemInstance::build(
///     vec![Location::depot("D1", 0.0, 0.0)],
///     vec![Location::customer("C1", 3.0, 4.0)],
///     1,
/// )
/// .unwrap();
/// let dm = DistanceMatrix::from_locations(problem.locations(), Rounding::Truncate);
/// let space = RouteIndexSpace::from_problem(&problem);
/// let model = CostModel::new(&dm, &space, 5000, 100, 1_000_000);
///
/// let assignment = Assignment::from_routes(&space, &[vec![0]]);
/// let solution = SolutionDecoder::new(&problem, &model).decode(&assignment);
/// assert_eq!(solution.routes()[0].location_ids(), vec!["D1", "C1", "D1"]);
/// assert_eq!(solution.total_distance(), 10);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SolutionDecoder<'a, 'm> {
    problem: &'a ProblemInstance,
    model: &'a CostModel<'m>,
}

impl<'a, 'm> SolutionDecoder<'a, 'm> {
    /// Creates a decoder for assignments over `model`'s slot layout.
    pub fn new(problem: &'a ProblemInstance, model: &'a CostModel<'m>) -> Self {
        Self { problem, model }
    }

    /// Builds the solution for `assignment`.
    pub fn decode(&self, assignment: &Assignment) -> Solution {
        let space = self.model.space();
        let locations = self.problem.locations();

        let mut routes = Vec::new();
        let mut distances = Vec::with_capacity(space.num_vehicles());
        for (vehicle, info) in self.problem.vehicles().iter().enumerate() {
            let slots = assignment.route_slots(space, vehicle);
            let transits = slots.windows(2).map(|w| self.model.transit(w[0], w[1]));
            let cumuls = self.model.dimension().cumuls(transits);
            distances.push(cumuls.last().copied().unwrap_or(0));

            if slots.len() <= 2 {
                continue;
            }
            let stops = slots
                .iter()
                .zip(cumuls)
                .map(|(&slot, cumulative_distance)| {
                    let node = space.slot_to_node(slot);
                    Stop {
                        location_id: locations[node].id().to_string(),
                        node,
                        cumulative_distance,
                    }
                })
                .collect();
            let depot_id = locations[info.start_depot()].id();
            routes.push(Route::new(info.id(), depot_id, stops));
        }

        let dropped: Vec<String> = assignment
            .unperformed(space)
            .into_iter()
            .map(|slot| locations[space.slot_to_node(slot)].id().to_string())
            .collect();
        let cost = self.model.breakdown(&distances, dropped.len());

        Solution::new(
            self.problem.id(),
            routes,
            locations.to_vec(),
            dropped,
            cost,
        )
    }
}
