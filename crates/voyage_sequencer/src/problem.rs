use crate::{
    error::SequencerError,
    location::{Location, LocationIdx},
    time_window::TimeWindow,
    travel_cost_matrix::{Cost, TravelCostMatrix},
};

/// Validated input of the sequencer: `locations[0]` is the depot, there is
/// one matrix row/column and one time window per location.
#[derive(Debug, Clone)]
pub struct SequencingProblem {
    locations: Vec<Location>,
    travel_costs: TravelCostMatrix,
    time_windows: Vec<TimeWindow>,
}

impl SequencingProblem {
    pub fn new(
        locations: Vec<Location>,
        travel_costs: Vec<Vec<Cost>>,
        time_windows: Vec<TimeWindow>,
    ) -> Result<Self, SequencerError> {
        let num_locations = locations.len();
        if num_locations == 0 {
            return Err(SequencerError::NoLocations);
        }

        if travel_costs.len() != num_locations {
            return Err(SequencerError::MatrixRowCount {
                expected: num_locations,
                actual: travel_costs.len(),
            });
        }

        let travel_costs = TravelCostMatrix::from_rows(travel_costs)?;

        if time_windows.len() != num_locations {
            return Err(SequencerError::TimeWindowCount {
                expected: num_locations,
                actual: time_windows.len(),
            });
        }

        if let Some((index, window)) = time_windows
            .iter()
            .enumerate()
            .find(|(_, window)| !window.is_valid())
        {
            return Err(SequencerError::InvalidTimeWindow {
                index,
                earliest: window.earliest(),
                latest: window.latest(),
            });
        }

        Ok(SequencingProblem {
            locations,
            travel_costs,
            time_windows,
        })
    }

    pub fn location(&self, index: LocationIdx) -> &Location {
        &self.locations[index]
    }

    pub fn num_locations(&self) -> usize {
        self.locations.len()
    }

    pub fn time_window(&self, index: LocationIdx) -> &TimeWindow {
        &self.time_windows[index.get()]
    }

    #[inline(always)]
    pub fn travel_cost(&self, from: LocationIdx, to: LocationIdx) -> Cost {
        self.travel_costs.travel_cost(from, to)
    }

    pub fn location_indices(&self) -> impl Iterator<Item = LocationIdx> + '_ {
        (0..self.locations.len()).map(LocationIdx::new)
    }

    /// Names of all locations in input order, used when no route is available.
    pub fn location_names(&self) -> Vec<&str> {
        self.locations.iter().map(Location::name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locations(names: &[&str]) -> Vec<Location> {
        names.iter().map(|&name| Location::new(name)).collect()
    }

    #[test]
    fn test_rejects_empty_problem() {
        let result = SequencingProblem::new(vec![], vec![], vec![]);

        assert_eq!(result.unwrap_err(), SequencerError::NoLocations);
    }

    #[test]
    fn test_rejects_matrix_row_mismatch() {
        let result = SequencingProblem::new(
            locations(&["Start", "A"]),
            vec![vec![0.0, 1.0]],
            vec![TimeWindow::UNBOUNDED; 2],
        );

        assert_eq!(
            result.unwrap_err(),
            SequencerError::MatrixRowCount {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_rejects_time_window_count_mismatch() {
        let result = SequencingProblem::new(
            locations(&["Start", "A"]),
            vec![vec![0.0, 1.0], vec![1.0, 0.0]],
            vec![TimeWindow::UNBOUNDED],
        );

        assert_eq!(
            result.unwrap_err(),
            SequencerError::TimeWindowCount {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_rejects_inverted_time_window() {
        let result = SequencingProblem::new(
            locations(&["Start", "A"]),
            vec![vec![0.0, 1.0], vec![1.0, 0.0]],
            vec![TimeWindow::UNBOUNDED, TimeWindow::new(30.0, 10.0)],
        );

        assert_eq!(
            result.unwrap_err(),
            SequencerError::InvalidTimeWindow {
                index: 1,
                earliest: 30.0,
                latest: 10.0
            }
        );
    }

    #[test]
    fn test_accessors() {
        let problem = SequencingProblem::new(
            locations(&["Start", "A", "B"]),
            vec![vec![0.0, 1.0, 2.0], vec![1.0, 0.0, 3.0], vec![2.0, 3.0, 0.0]],
            vec![TimeWindow::UNBOUNDED; 3],
        )
        .unwrap();

        assert_eq!(problem.num_locations(), 3);
        assert_eq!(problem.location(2.into()).name(), "B");
        assert_eq!(problem.travel_cost(1.into(), 2.into()), 3.0);
        assert_eq!(problem.location_names(), vec!["Start", "A", "B"]);
    }
}
