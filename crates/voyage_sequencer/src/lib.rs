//! Single vehicle route sequencing with time windows.
//!
//! Given a handful of stops, a travel cost matrix and a window per stop, the
//! [`Sequencer`](sequencer::Sequencer) builds a depot anchored tour with a
//! path-cheapest-arc construction and accepts the first feasible tour it finds.
//! An infeasible instance yields an empty [`Route`](route::Route), never an error.

pub mod error;
pub mod json;
pub mod location;
pub mod problem;
pub mod route;
pub mod sequencer;
pub mod time_window;
pub mod travel_cost_matrix;

pub use error::SequencerError;
pub use location::{DEPOT, Location, LocationIdx};
pub use problem::SequencingProblem;
pub use route::{Route, RouteStop};
pub use sequencer::{Sequencer, SequencerParams, sequence};
pub use time_window::TimeWindow;
pub use travel_cost_matrix::{Cost, TravelCostMatrix};
