use serde::Serialize;

use crate::{
    location::{DEPOT, LocationIdx},
    problem::SequencingProblem,
    travel_cost_matrix::Cost,
};

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct RouteStop {
    pub location_id: LocationIdx,
    /// Cumulative travel cost when arriving at this stop
    pub cumulative_cost: Cost,
}

/// Depot anchored tour. The stops start at the depot with a cumulative cost of
/// zero and end with the return to the depot.
///
/// An empty route means no ordering is available.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct Route {
    stops: Vec<RouteStop>,
}

impl Route {
    pub fn empty() -> Self {
        Route { stops: Vec::new() }
    }

    /// Builds the route from a visiting order starting at the depot, closing it
    /// with the return arc.
    pub(crate) fn from_visit_order(problem: &SequencingProblem, order: &[LocationIdx]) -> Self {
        let mut stops = Vec::with_capacity(order.len() + 1);
        let mut cumulative_cost = 0.0;
        let mut previous = DEPOT;

        for &location_id in order.iter().chain(std::iter::once(&DEPOT)) {
            if !stops.is_empty() {
                cumulative_cost += problem.travel_cost(previous, location_id);
            }
            stops.push(RouteStop {
                location_id,
                cumulative_cost,
            });
            previous = location_id;
        }

        Route { stops }
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn stops(&self) -> &[RouteStop] {
        &self.stops
    }

    /// Closed tour, `[0, .., 0]`.
    pub fn tour(&self) -> Vec<usize> {
        self.stops.iter().map(|stop| stop.location_id.get()).collect()
    }

    /// Permutation of all location indices starting at the depot, without the
    /// return to the depot.
    pub fn visit_order(&self) -> Vec<usize> {
        self.stops
            .split_last()
            .map(|(_, visits)| visits.iter().map(|stop| stop.location_id.get()).collect())
            .unwrap_or_default()
    }

    pub fn total_cost(&self) -> Cost {
        self.stops
            .last()
            .map(|stop| stop.cumulative_cost)
            .unwrap_or(0.0)
    }

    /// Location names in visiting order, without the return to the depot.
    pub fn location_names<'a>(&self, problem: &'a SequencingProblem) -> Vec<&'a str> {
        self.visit_order()
            .into_iter()
            .map(|index| problem.location(index.into()).name())
            .collect()
    }
}
