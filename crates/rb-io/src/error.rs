//! Error types for rb-io.

use rb_core::CoreError;
use rb_dispatch::DispatchError;
use rb_network::NetworkError;
use thiserror::Error;

/// Errors that can occur while loading input or writing output files.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A field was present but could not be interpreted.
    #[error("parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// Alias for `Result<T, DataError>`.
pub type DataResult<T> = Result<T, DataError>;
