//! Dispatch log types.

use rb_core::{StationId, VehicleId};

use crate::inventory::{Inventory, Transfer};
use crate::scorer::ScoredPair;
use crate::vehicle::Vehicle;

/// One applied move.  Append-only; engines never revise a record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DispatchRecord {
    /// 1-based step (single engine) or round (fleet engine).
    pub step:           u32,
    pub vehicle:        VehicleId,
    pub from:           StationId,
    pub to:             StationId,
    pub picked_up:      u32,
    pub dropped_off:    u32,
    pub load_after:     u32,
    /// Score of the pair that justified the move.
    pub score:          f64,
    pub travel_time:    f64,
    /// Origin count after the move.
    pub from_inventory: i64,
    /// Destination count after the move.
    pub to_inventory:   i64,
}

impl DispatchRecord {
    pub(crate) fn new(
        step:      u32,
        vehicle:   VehicleId,
        pair:      &ScoredPair,
        transfer:  &Transfer,
        inventory: &Inventory,
    ) -> Self {
        Self {
            step,
            vehicle,
            from:           pair.from,
            to:             pair.to,
            picked_up:      transfer.picked_up,
            dropped_off:    transfer.dropped_off,
            load_after:     transfer.load_after,
            score:          pair.score,
            travel_time:    pair.travel_time,
            from_inventory: inventory.count(pair.from),
            to_inventory:   inventory.count(pair.to),
        }
    }
}

/// Why a run stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Termination {
    /// `max_steps` steps or rounds were executed.
    StepLimit,
    /// Single engine: no scorable pair leaves the vehicle's location.
    NoOutgoingPair,
    /// No pair scored at all during initialisation (empty or fully
    /// disconnected inventory), so the vehicle(s) never started.
    NoCandidatePairs,
    /// Fleet engine: every vehicle is both empty and full (capacity 0).
    NoActiveVehicle,
    /// Fleet engine: a whole round passed without any vehicle moving.  The
    /// state is unchanged, so every later round would be idle too.
    Stalled,
}

/// Complete result of one engine run.
#[derive(Debug, Clone)]
pub struct DispatchRun {
    /// All records in the order they were applied (round, then vehicle id).
    pub records:     Vec<DispatchRecord>,
    /// Final vehicle states, each holding its own route.
    pub vehicles:    Vec<Vehicle>,
    /// Steps or rounds executed.
    pub steps:       u32,
    pub termination: Termination,
}

impl DispatchRun {
    /// Units still on board across the fleet.
    pub fn fleet_load(&self) -> i64 {
        self.vehicles.iter().map(|v| i64::from(v.load)).sum()
    }

    pub fn total_picked_up(&self) -> u64 {
        self.records.iter().map(|r| u64::from(r.picked_up)).sum()
    }

    pub fn total_dropped_off(&self) -> u64 {
        self.records.iter().map(|r| u64::from(r.dropped_off)).sum()
    }

    /// Records produced by `vehicle`, in order.
    pub fn records_for(&self, vehicle: VehicleId) -> impl Iterator<Item = &DispatchRecord> + '_ {
        self.records.iter().filter(move |r| r.vehicle == vehicle)
    }
}
