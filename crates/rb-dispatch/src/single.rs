//! Single-vehicle greedy dispatch.
//!
//! # Lifecycle
//!
//! ```text
//! INITIALIZING ─▶ STEPPING ─▶ TERMINATED
//! ```
//!
//! - **Initializing**: place the vehicle at the explicit start station, or
//!   at the origin of the best-ranked pair scored with `Nc = 0`.  The zero
//!   load is used even when `initial_load` is non-zero, which biases the
//!   first choice toward origins next to surplus stations.
//! - **Stepping**: rank the pairs leaving the current station with the
//!   actual load, take the best, apply the transfer rule, move.
//! - **Terminated**: `max_steps` reached, or nothing leaves the current
//!   station.  Unlike the fleet engine, a dead end ends the run.

use std::slice;

use tracing::{debug, info};

use rb_core::{DispatchConfig, StationId, VehicleId};
use rb_network::DistanceMatrix;

use crate::inventory::Inventory;
use crate::observer::DispatchObserver;
use crate::record::{DispatchRecord, DispatchRun, Termination};
use crate::scorer::PriorityScorer;
use crate::vehicle::Vehicle;
use crate::{DispatchError, DispatchResult};

/// Greedy single-vehicle engine.
pub struct DispatchEngine<'m> {
    matrix: &'m DistanceMatrix,
    config: DispatchConfig,
    start:  Option<String>,
}

impl<'m> DispatchEngine<'m> {
    /// Validate `config` and create an engine that picks its own start.
    pub fn new(matrix: &'m DistanceMatrix, config: DispatchConfig) -> DispatchResult<Self> {
        config.validate()?;
        Ok(Self { matrix, config, start: None })
    }

    /// Start at `station` instead of the best-ranked origin.  Checked
    /// against the inventory when the run starts.
    pub fn with_start(mut self, station: impl Into<String>) -> Self {
        self.start = Some(station.into());
        self
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Run to termination, mutating `inventory` in place.
    pub fn run<O: DispatchObserver>(
        &self,
        inventory: &mut Inventory,
        observer:  &mut O,
    ) -> DispatchResult<DispatchRun> {
        let scorer   = PriorityScorer::new(self.matrix, inventory, self.config.scoring);
        let capacity = self.config.capacity;

        let mut vehicle = Vehicle::new(VehicleId(0));
        vehicle.load = self.config.initial_load;

        // ── Initializing ──────────────────────────────────────────────────
        let start = match self.pick_start(&scorer, inventory)? {
            Some(s) => s,
            None => {
                info!("no scorable station pair; vehicle never leaves the depot");
                observer.on_run_start(inventory, slice::from_ref(&vehicle));
                return Ok(finish(Vec::new(), vehicle, 0, Termination::NoCandidatePairs, inventory, observer));
            }
        };
        vehicle.location = Some(start);
        info!(start = inventory.name(start), load = vehicle.load, "single-vehicle dispatch started");
        observer.on_run_start(inventory, slice::from_ref(&vehicle));

        // ── Stepping ──────────────────────────────────────────────────────
        let mut records     = Vec::new();
        let mut steps       = 0;
        let mut termination = Termination::StepLimit;

        for step in 1..=self.config.max_steps {
            let here = vehicle.location.unwrap_or(start);
            observer.on_round_start(step);

            let ranked = scorer.rank_from(inventory, here, &[vehicle.load]);
            let Some(best) = ranked.first() else {
                debug!(step, at = inventory.name(here), "no outgoing pair");
                termination = Termination::NoOutgoingPair;
                break;
            };

            let transfer = inventory.transfer(best.from, best.to, vehicle.load, capacity);
            vehicle.load     = transfer.load_after;
            vehicle.location = Some(best.to);

            let record = DispatchRecord::new(step, vehicle.id, best, &transfer, inventory);
            debug!(
                step,
                from        = inventory.name(record.from),
                to          = inventory.name(record.to),
                picked_up   = record.picked_up,
                dropped_off = record.dropped_off,
                load        = record.load_after,
                score       = record.score,
                "dispatch"
            );
            vehicle.route.push(record);
            records.push(record);
            steps = step;
            observer.on_dispatch(&record, inventory, slice::from_ref(&vehicle));
        }

        Ok(finish(records, vehicle, steps, termination, inventory, observer))
    }

    fn pick_start(&self, scorer: &PriorityScorer, inventory: &Inventory) -> DispatchResult<Option<StationId>> {
        match &self.start {
            Some(name) => inventory
                .station(name)
                .map(Some)
                .ok_or_else(|| DispatchError::UnknownStartStation(name.clone())),
            None => Ok(scorer.rank(inventory, &[0]).first().map(|p| p.from)),
        }
    }
}

fn finish<O: DispatchObserver>(
    records:     Vec<DispatchRecord>,
    vehicle:     Vehicle,
    steps:       u32,
    termination: Termination,
    inventory:   &Inventory,
    observer:    &mut O,
) -> DispatchRun {
    info!(steps, ?termination, load = vehicle.load, "single-vehicle dispatch finished");
    observer.on_run_end(termination, inventory);
    DispatchRun { records, vehicles: vec![vehicle], steps, termination }
}
