use fixedbitset::FixedBitSet;
use tracing::{Level, debug, instrument, warn};

use crate::{
    error::SequencerError,
    location::{DEPOT, Location, LocationIdx},
    problem::SequencingProblem,
    route::Route,
    time_window::TimeWindow,
    travel_cost_matrix::Cost,
};

pub struct SequencerParams {
    /// Upper bound of the cumulative cost dimension, only binding on the
    /// return to the depot.
    pub horizon: Cost,

    /// Maximum number of partial tour extensions before giving up.
    pub search_limit: usize,
}

impl Default for SequencerParams {
    fn default() -> Self {
        SequencerParams {
            horizon: Cost::INFINITY,
            search_limit: 100_000,
        }
    }
}

/// Path-cheapest-arc construction for the single vehicle TSP with time windows.
///
/// The tour is grown from the depot by always trying the cheapest arc to an
/// unvisited location first. Dead ends backtrack to the previous choice. The
/// first complete feasible tour is returned as-is, there is no improvement phase.
#[derive(Default)]
pub struct Sequencer {
    params: SequencerParams,
}

enum SearchOutcome {
    Found,
    Exhausted,
    LimitReached,
}

struct Search<'a> {
    problem: &'a SequencingProblem,
    params: &'a SequencerParams,
    visited: FixedBitSet,
    path: Vec<LocationIdx>,
    cumulative_costs: Vec<Cost>,
    expanded: usize,
}

impl<'a> Search<'a> {
    fn new(problem: &'a SequencingProblem, params: &'a SequencerParams) -> Self {
        let num_locations = problem.num_locations();
        let mut visited = FixedBitSet::with_capacity(num_locations);
        visited.insert(DEPOT.get());

        let mut path = Vec::with_capacity(num_locations);
        path.push(DEPOT);

        let mut cumulative_costs = Vec::with_capacity(num_locations);
        cumulative_costs.push(0.0);

        Search {
            problem,
            params,
            visited,
            path,
            cumulative_costs,
            expanded: 0,
        }
    }

    fn tail(&self) -> (LocationIdx, Cost) {
        // The path always holds the depot
        let tail = self.path[self.path.len() - 1];
        let cumulative_cost = self.cumulative_costs[self.cumulative_costs.len() - 1];
        (tail, cumulative_cost)
    }

    /// Unvisited locations ordered by the cost of the arc from `from`, ties
    /// broken by index.
    fn candidates(&self, from: LocationIdx) -> Vec<LocationIdx> {
        let mut candidates: Vec<LocationIdx> = self
            .problem
            .location_indices()
            .filter(|location_id| !self.visited.contains(location_id.get()))
            .collect();

        candidates.sort_by(|&a, &b| {
            self.problem
                .travel_cost(from, a)
                .total_cmp(&self.problem.travel_cost(from, b))
                .then(a.cmp(&b))
        });

        candidates
    }

    /// Costs never decrease along the tour, so once an unvisited location's
    /// window is closed no extension can reach it in time.
    fn has_expired_location(&self, cumulative_cost: Cost) -> bool {
        self.problem
            .location_indices()
            .filter(|location_id| !self.visited.contains(location_id.get()))
            .any(|location_id| {
                self.problem
                    .time_window(location_id)
                    .has_expired(cumulative_cost)
            })
    }

    fn extend(&mut self) -> SearchOutcome {
        let (tail, cumulative_cost) = self.tail();

        if self.path.len() == self.problem.num_locations() {
            let back_at_depot = cumulative_cost + self.problem.travel_cost(tail, DEPOT);
            return if back_at_depot <= self.params.horizon {
                SearchOutcome::Found
            } else {
                SearchOutcome::Exhausted
            };
        }

        if self.has_expired_location(cumulative_cost) {
            return SearchOutcome::Exhausted;
        }

        for next in self.candidates(tail) {
            let arrival = cumulative_cost + self.problem.travel_cost(tail, next);
            if arrival > self.params.horizon || !self.problem.time_window(next).is_satisfied(arrival)
            {
                continue;
            }

            self.expanded += 1;
            if self.expanded > self.params.search_limit {
                return SearchOutcome::LimitReached;
            }

            self.visited.insert(next.get());
            self.path.push(next);
            self.cumulative_costs.push(arrival);

            match self.extend() {
                SearchOutcome::Exhausted => {
                    self.visited.set(next.get(), false);
                    self.path.pop();
                    self.cumulative_costs.pop();
                }
                outcome => return outcome,
            }
        }

        SearchOutcome::Exhausted
    }
}

impl Sequencer {
    pub fn new(params: SequencerParams) -> Self {
        Sequencer { params }
    }

    /// Returns the first feasible tour, or an empty route when none exists or
    /// the search limit is hit.
    #[instrument(skip_all, level = Level::DEBUG, fields(locations = problem.num_locations()))]
    pub fn solve(&self, problem: &SequencingProblem) -> Route {
        if !problem.time_window(DEPOT).is_satisfied(0.0) {
            debug!("Depot window excludes departure at 0, no route available");
            return Route::empty();
        }

        let mut search = Search::new(problem, &self.params);

        match search.extend() {
            SearchOutcome::Found => {
                let route = Route::from_visit_order(problem, &search.path);
                debug!(
                    "Found route {:?} with cost {} after {} extensions",
                    route.tour(),
                    route.total_cost(),
                    search.expanded
                );
                route
            }
            SearchOutcome::Exhausted => {
                debug!(
                    "No feasible route after {} extensions",
                    search.expanded
                );
                Route::empty()
            }
            SearchOutcome::LimitReached => {
                warn!(
                    "Sequencer gave up after {} extensions, no route available",
                    self.params.search_limit
                );
                Route::empty()
            }
        }
    }
}

/// Sequences `locations` with the default parameters.
///
/// Malformed input is an error. An instance with no feasible ordering is not,
/// it yields an empty route and the caller falls back to the input order.
pub fn sequence<L>(
    locations: &[L],
    travel_times: &[Vec<Cost>],
    time_windows: &[(Cost, Cost)],
) -> Result<Route, SequencerError>
where
    L: AsRef<str>,
{
    let problem = SequencingProblem::new(
        locations
            .iter()
            .map(|location| Location::new(location.as_ref()))
            .collect(),
        travel_times.to_vec(),
        time_windows.iter().copied().map(TimeWindow::from).collect(),
    )?;

    Ok(Sequencer::default().solve(&problem))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_problem(travel_costs: Vec<Vec<Cost>>, time_windows: Vec<TimeWindow>) -> SequencingProblem {
        let locations = (0..travel_costs.len())
            .map(|index| Location::new(format!("L{index}")))
            .collect();
        SequencingProblem::new(locations, travel_costs, time_windows).unwrap()
    }

    #[test]
    fn test_single_location_tour() {
        let problem = create_problem(vec![vec![0.0]], vec![TimeWindow::UNBOUNDED]);

        let route = Sequencer::default().solve(&problem);

        assert_eq!(route.tour(), vec![0, 0]);
        assert_eq!(route.visit_order(), vec![0]);
        assert_eq!(route.total_cost(), 0.0);
    }

    #[test]
    fn test_follows_cheapest_arc() {
        let problem = create_problem(
            vec![
                vec![0.0, 9.0, 1.0, 5.0],
                vec![9.0, 0.0, 2.0, 1.0],
                vec![1.0, 2.0, 0.0, 7.0],
                vec![5.0, 1.0, 7.0, 0.0],
            ],
            vec![TimeWindow::UNBOUNDED; 4],
        );

        let route = Sequencer::default().solve(&problem);

        assert_eq!(route.tour(), vec![0, 2, 1, 3, 0]);
        assert_eq!(route.total_cost(), 1.0 + 2.0 + 1.0 + 5.0);
    }

    #[test]
    fn test_ties_broken_by_index() {
        let problem = create_problem(vec![vec![0.0; 4]; 4], vec![TimeWindow::UNBOUNDED; 4]);

        let route = Sequencer::default().solve(&problem);

        assert_eq!(route.tour(), vec![0, 1, 2, 3, 0]);
    }

    #[test]
    fn test_depot_window_excluding_zero_is_infeasible() {
        let problem = create_problem(
            vec![vec![0.0, 1.0], vec![1.0, 0.0]],
            vec![TimeWindow::new(5.0, 10.0), TimeWindow::UNBOUNDED],
        );

        assert!(Sequencer::default().solve(&problem).is_empty());
    }

    #[test]
    fn test_horizon_bounds_return_to_depot() {
        let problem = create_problem(
            vec![vec![0.0, 1.0], vec![50.0, 0.0]],
            vec![TimeWindow::UNBOUNDED; 2],
        );

        let bounded = Sequencer::new(SequencerParams {
            horizon: 10.0,
            ..SequencerParams::default()
        });

        assert!(bounded.solve(&problem).is_empty());
        assert_eq!(Sequencer::default().solve(&problem).tour(), vec![0, 1, 0]);
    }

    #[test]
    fn test_search_limit_gives_up() {
        let problem = create_problem(vec![vec![0.0; 3]; 3], vec![TimeWindow::UNBOUNDED; 3]);

        let sequencer = Sequencer::new(SequencerParams {
            search_limit: 1,
            ..SequencerParams::default()
        });

        assert!(sequencer.solve(&problem).is_empty());
    }

    #[test]
    fn test_sequence_rejects_malformed_input() {
        let result = sequence(&["Start", "A"], &[vec![0.0, 1.0], vec![1.0, 0.0]], &[(0.0, 10.0)]);

        assert_eq!(
            result.unwrap_err(),
            SequencerError::TimeWindowCount {
                expected: 2,
                actual: 1
            }
        );
    }
}
