//! Shared error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`, so configuration problems surface unchanged at
//! every layer.

use thiserror::Error;

/// The base error type for `rb-core` and a common variant for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("station {0:?} not found")]
    UnknownStation(String),

    #[error("station {0:?} listed more than once")]
    DuplicateStation(String),
}

/// Shorthand result type for `rb-core`.
pub type CoreResult<T> = Result<T, CoreError>;
