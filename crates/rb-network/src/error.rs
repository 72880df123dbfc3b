//! Network-subsystem error type.

use thiserror::Error;

/// Errors produced by `rb-network`.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("station {0:?} listed more than once")]
    DuplicateStation(String),

    #[error("station {0:?} not found in network")]
    UnknownStation(String),

    #[error("no path from {from:?} to {to:?}")]
    NoPath { from: String, to: String },

    #[error("invalid distance {value} between {from:?} and {to:?}")]
    InvalidDistance { from: String, to: String, value: f64 },

    #[error("distance matrix has {rows} rows for {stations} stations")]
    RowCount { stations: usize, rows: usize },

    #[error("distance matrix row {row} has {got} entries for {stations} stations")]
    RowLength { stations: usize, row: usize, got: usize },
}

pub type NetworkResult<T> = Result<T, NetworkError>;
