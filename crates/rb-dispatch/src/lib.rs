//! `rb-dispatch` — greedy rebalancing simulation.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`inventory`] | `Inventory` (shared station counts), `Transfer`             |
//! | [`scorer`]    | `PriorityScorer`, `ScoredPair`, `priority`                  |
//! | [`single`]    | `DispatchEngine`: one vehicle, stops at a dead end          |
//! | [`multi`]     | `MultiVehicleDispatchEngine`: fleet, round-robin rounds     |
//! | [`engine`]    | `Dispatcher` trait, `Engine` enum                           |
//! | [`builder`]   | `DispatchBuilder`                                           |
//! | [`observer`]  | `DispatchObserver`, `NoopObserver`                          |
//! | [`record`]    | `DispatchRecord`, `DispatchRun`, `Termination`              |
//! | [`vehicle`]   | `Vehicle`                                                   |
//!
//! # Invariants
//!
//! - `inventory.total() + Σ vehicle loads` is constant over a run.
//! - Every load stays within `[0, capacity]`.
//! - A run executes at most `max_steps` steps/rounds.
//! - Identical inputs give identical record sequences: evaluation order is
//!   round, then ascending `VehicleId`, then the scorer's stable tie-break.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use rb_dispatch::{DispatchBuilder, Dispatcher, Inventory, NoopObserver};
//! use rb_network::DistanceMatrix;
//!
//! let matrix = DistanceMatrix::all_pairs_shortest(&network);
//! let mut inventory = Inventory::from_counts([("A", 10), ("B", -4), ("C", -6)])?;
//! let run = DispatchBuilder::new(&matrix).build()?.run(&mut inventory, &mut NoopObserver)?;
//! ```

pub mod builder;
pub mod engine;
pub mod error;
pub mod inventory;
pub mod multi;
pub mod observer;
pub mod record;
pub mod scorer;
pub mod single;
pub mod vehicle;


pub use builder::DispatchBuilder;
pub use engine::{Dispatcher, Engine};
pub use error::{DispatchError, DispatchResult};
pub use inventory::{Inventory, Transfer};
pub use multi::MultiVehicleDispatchEngine;
pub use observer::{DispatchObserver, NoopObserver};
pub use record::{DispatchRecord, DispatchRun, Termination};
pub use scorer::{PriorityScorer, ScoredPair, priority};
pub use single::DispatchEngine;
pub use vehicle::Vehicle;
