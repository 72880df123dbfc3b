//! `rb-core` — foundational types for the `rebal` rebalancing simulator.
//!
//! This crate is a dependency of every other `rb-*` crate.  It has no `rb-*`
//! dependencies and only `thiserror` (plus optional `serde`) from outside.
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`ids`]     | `NodeId`, `EdgeId`, `StationId`, `VehicleId`              |
//! | [`geo`]     | `Point2` (planar coordinate, Euclidean distance)          |
//! | [`config`]  | `DispatchConfig`, `ScoringParams`, `ScoreWeights`, …      |
//! | [`error`]   | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{
    DEFAULT_CAPACITY, DEFAULT_SPEED, DispatchConfig, ImbalanceBasis, ScoreWeights, ScoringParams,
};
pub use error::{CoreError, CoreResult};
pub use geo::Point2;
pub use ids::{EdgeId, NodeId, StationId, VehicleId};
