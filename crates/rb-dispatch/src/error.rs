use rb_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("start station {0:?} is not in the inventory")]
    UnknownStartStation(String),

    #[error("a fleet needs at least one vehicle")]
    NoVehicles,

    #[error("an explicit start station only applies to the single-vehicle engine")]
    StartStationForFleet,
}

pub type DispatchResult<T> = Result<T, DispatchError>;
