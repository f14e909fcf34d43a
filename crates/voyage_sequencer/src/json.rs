use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::SequencerError, location::Location, problem::SequencingProblem,
    time_window::TimeWindow, travel_cost_matrix::Cost,
};

/// Wire form of a sequencing problem, as read from request bodies and files.
///
/// ```json
/// {
///   "locations": ["Start", "Place A", "End"],
///   "travel_times": [[0, 10, 40], [10, 0, 35], [40, 35, 0]],
///   "time_windows": [[0, 100], [10, 50], [40, 80]]
/// }
/// ```
#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone)]
pub struct JsonSequencingProblem {
    /// Stop names, the first one is the depot
    pub locations: Vec<Location>,

    /// Square matrix of travel costs, `travel_times[from][to]`
    pub travel_times: Vec<Vec<Cost>>,

    /// `[earliest, latest]` cumulative cost per location
    pub time_windows: Vec<(Cost, Cost)>,
}

impl JsonSequencingProblem {
    pub fn build_problem(&self) -> Result<SequencingProblem, SequencerError> {
        SequencingProblem::new(
            self.locations.clone(),
            self.travel_times.clone(),
            self.time_windows
                .iter()
                .copied()
                .map(TimeWindow::from)
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_problem_from_json() {
        let json = r#"{
            "locations": ["Start", "A", "End"],
            "travel_times": [[0, 10, 40], [10, 0, 35], [40, 35, 0]],
            "time_windows": [[0, 100], [10, 50], [40, 80]]
        }"#;

        let problem = serde_json::from_str::<JsonSequencingProblem>(json)
            .unwrap()
            .build_problem()
            .unwrap();

        assert_eq!(problem.location_names(), vec!["Start", "A", "End"]);
        assert_eq!(problem.travel_cost(2.into(), 1.into()), 35.0);
        assert_eq!(problem.time_window(1.into()), &TimeWindow::new(10.0, 50.0));
    }

    #[test]
    fn test_build_problem_validates() {
        let json = r#"{
            "locations": ["Start", "A"],
            "travel_times": [[0, 10], [10, 0]],
            "time_windows": [[0, 100]]
        }"#;

        let result = serde_json::from_str::<JsonSequencingProblem>(json)
            .unwrap()
            .build_problem();

        assert!(matches!(result, Err(SequencerError::TimeWindowCount { .. })));
    }
}
