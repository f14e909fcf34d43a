use serde::{Deserialize, Serialize};

use crate::travel_cost_matrix::Cost;

/// Interval of cumulative travel cost at which a location may be reached.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(from = "(Cost, Cost)", into = "(Cost, Cost)")]
pub struct TimeWindow {
    earliest: Cost,
    latest: Cost,
}

impl TimeWindow {
    pub const UNBOUNDED: TimeWindow = TimeWindow {
        earliest: 0.0,
        latest: Cost::INFINITY,
    };

    pub fn new(earliest: Cost, latest: Cost) -> Self {
        TimeWindow { earliest, latest }
    }

    pub fn earliest(&self) -> Cost {
        self.earliest
    }

    pub fn latest(&self) -> Cost {
        self.latest
    }

    pub fn is_valid(&self) -> bool {
        !self.earliest.is_nan() && !self.latest.is_nan() && self.earliest <= self.latest
    }
}

impl TimeWindow {
    /// There is no waiting: arriving before `earliest` is as bad as arriving late.
    pub fn is_satisfied(&self, cumulative: Cost) -> bool {
        cumulative >= self.earliest && cumulative <= self.latest
    }

    pub fn has_expired(&self, cumulative: Cost) -> bool {
        cumulative > self.latest
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        TimeWindow::UNBOUNDED
    }
}

impl From<(Cost, Cost)> for TimeWindow {
    fn from((earliest, latest): (Cost, Cost)) -> Self {
        TimeWindow::new(earliest, latest)
    }
}

impl From<TimeWindow> for (Cost, Cost) {
    fn from(window: TimeWindow) -> Self {
        (window.earliest, window.latest)
    }
}
