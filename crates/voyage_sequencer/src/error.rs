use thiserror::Error;

/// Malformed sequencing input. Infeasible instances are not errors, they
/// produce an empty route.
#[derive(Debug, Error, PartialEq)]
pub enum SequencerError {
    #[error("at least one location (the depot) is required")]
    NoLocations,

    #[error("travel cost matrix must have {expected} rows, got {actual}")]
    MatrixRowCount { expected: usize, actual: usize },

    #[error("travel cost matrix row {row} must have {expected} columns, got {actual}")]
    MatrixColumnCount {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("travel cost from {from} to {to} must be a non-negative finite number, got {value}")]
    InvalidCost { from: usize, to: usize, value: f64 },

    #[error("expected {expected} time windows, got {actual}")]
    TimeWindowCount { expected: usize, actual: usize },

    #[error("time window of location {index} is invalid: earliest {earliest} is after latest {latest}")]
    InvalidTimeWindow {
        index: usize,
        earliest: f64,
        latest: f64,
    },
}
