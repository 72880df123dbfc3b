//! `rb-network` — station graph and shortest-path distance index.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`network`]  | `StationNetwork` (CSR), `StationNetworkBuilder`            |
//! | [`shortest`] | `PathSearch` trait, `Dijkstra`, `ShortestTree`, `StationPath` |
//! | [`matrix`]   | `DistanceMatrix` (all-pairs shortest distances)            |
//! | [`error`]    | `NetworkError`, `NetworkResult<T>`                         |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Builds distance-matrix rows on Rayon's thread pool.       |

pub mod error;
pub mod matrix;
pub mod network;
pub mod shortest;


pub use error::{NetworkError, NetworkResult};
pub use matrix::DistanceMatrix;
pub use network::{StationNetwork, StationNetworkBuilder};
pub use shortest::{Dijkstra, PathSearch, ShortestTree, StationPath};
