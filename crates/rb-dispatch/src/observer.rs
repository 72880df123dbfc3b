//! Dispatch observer trait for progress reporting and data collection.

use rb_core::VehicleId;

use crate::inventory::Inventory;
use crate::record::{DispatchRecord, Termination};
use crate::vehicle::Vehicle;

/// Callbacks invoked by the engines at key points of a run.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: invariant checker
///
/// ```rust,ignore
/// struct Conservation { expected: i64 }
///
/// impl DispatchObserver for Conservation {
///     fn on_dispatch(&mut self, _r: &DispatchRecord, inv: &Inventory, fleet: &[Vehicle]) {
///         let on_board: i64 = fleet.iter().map(|v| v.load as i64).sum();
///         assert_eq!(inv.total() + on_board, self.expected);
///     }
/// }
/// ```
pub trait DispatchObserver {
    /// Called once after vehicles are placed and loaded, before step 1.
    fn on_run_start(&mut self, _inventory: &Inventory, _vehicles: &[Vehicle]) {}

    /// Called at the start of every step (single engine) or round (fleet).
    fn on_round_start(&mut self, _round: u32) {}

    /// Called right after a move was applied.  `inventory` and `vehicles`
    /// already reflect the move.
    fn on_dispatch(
        &mut self,
        _record:    &DispatchRecord,
        _inventory: &Inventory,
        _vehicles:  &[Vehicle],
    ) {}

    /// Fleet engine: `vehicle` found no feasible move this round.
    fn on_idle(&mut self, _round: u32, _vehicle: VehicleId) {}

    /// Called once when the run stops, for whatever reason.
    fn on_run_end(&mut self, _termination: Termination, _inventory: &Inventory) {}
}

/// A [`DispatchObserver`] that does nothing.
pub struct NoopObserver;

impl DispatchObserver for NoopObserver {}
