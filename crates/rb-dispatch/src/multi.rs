//! Multi-vehicle greedy dispatch over one shared inventory.
//!
//! # Round loop
//!
//! ```text
//! place vehicles round-robin over stations sorted by count (desc),
//! each loading min(surplus, capacity) at its depot
//!
//! for round in 1..=max_steps:
//!   ① Active   — any vehicle able to pick up or drop off?  none → stop
//!   ② Rank     — one shared ranking, scored with every vehicle's load
//!   ③ Apply    — for each active vehicle in ascending VehicleId order:
//!                  best ranked pair leaving its station that is feasible
//!                  for its own load against the *current* inventory
//!                  → transfer, move, log;  none → idle this round
//!   ④ Progress — nobody moved → stop (state unchanged, so every later
//!                round would be idle as well)
//! ```
//!
//! The apply phase is strictly sequential: a later vehicle sees counts
//! already changed by earlier vehicles in the same round, while the ranking
//! itself stays as computed in ②.  Reordering vehicles changes results.

use std::cmp::Reverse;

use tracing::{debug, info};

use rb_core::{DispatchConfig, StationId, VehicleId};
use rb_network::DistanceMatrix;

use crate::inventory::Inventory;
use crate::observer::DispatchObserver;
use crate::record::{DispatchRecord, DispatchRun, Termination};
use crate::scorer::{PriorityScorer, ScoredPair};
use crate::vehicle::Vehicle;
use crate::{DispatchError, DispatchResult};

/// Greedy fleet engine.
pub struct MultiVehicleDispatchEngine<'m> {
    matrix:   &'m DistanceMatrix,
    config:   DispatchConfig,
    vehicles: usize,
}

impl<'m> MultiVehicleDispatchEngine<'m> {
    /// Validate `config` and create an engine for `vehicles` vehicles.
    pub fn new(matrix: &'m DistanceMatrix, config: DispatchConfig, vehicles: usize) -> DispatchResult<Self> {
        config.validate()?;
        if vehicles == 0 {
            return Err(DispatchError::NoVehicles);
        }
        Ok(Self { matrix, config, vehicles })
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    pub fn vehicle_count(&self) -> usize {
        self.vehicles
    }

    /// Run to termination, mutating `inventory` in place.
    pub fn run<O: DispatchObserver>(
        &self,
        inventory: &mut Inventory,
        observer:  &mut O,
    ) -> DispatchResult<DispatchRun> {
        let scorer   = PriorityScorer::new(self.matrix, inventory, self.config.scoring);
        let capacity = self.config.capacity;

        let mut vehicles: Vec<Vehicle> = (0..self.vehicles)
            .map(|k| Vehicle::new(VehicleId(k as u32)))
            .collect();

        if inventory.is_empty() {
            info!("empty inventory; fleet not placed");
            observer.on_run_start(inventory, &vehicles);
            return Ok(finish(Vec::new(), vehicles, 0, Termination::NoCandidatePairs, inventory, observer));
        }

        place_vehicles(inventory, &mut vehicles, capacity);
        info!(
            vehicles = vehicles.len(),
            on_board = vehicles.iter().map(|v| u64::from(v.load)).sum::<u64>(),
            "fleet dispatch started"
        );
        observer.on_run_start(inventory, &vehicles);

        let mut records     = Vec::new();
        let mut rounds      = 0;
        let mut termination = Termination::StepLimit;

        for round in 1..=self.config.max_steps {
            // ── ① Active ──────────────────────────────────────────────────
            let active: Vec<usize> = (0..vehicles.len())
                .filter(|&k| vehicles[k].is_active(capacity))
                .collect();
            if active.is_empty() {
                termination = Termination::NoActiveVehicle;
                break;
            }
            observer.on_round_start(round);
            rounds = round;

            // ── ② Rank ────────────────────────────────────────────────────
            let loads: Vec<u32> = vehicles.iter().map(|v| v.load).collect();
            let ranked = scorer.rank(inventory, &loads);

            // ── ③ Apply ───────────────────────────────────────────────────
            let mut moved = false;
            for k in active {
                let Some(here) = vehicles[k].location else { continue };
                let load = vehicles[k].load;

                let Some(best) = ranked
                    .iter()
                    .find(|p| p.from == here && feasible(p, load, capacity, inventory))
                else {
                    debug!(round, vehicle = k, at = inventory.name(here), "idle");
                    observer.on_idle(round, vehicles[k].id);
                    continue;
                };

                let transfer = inventory.transfer(best.from, best.to, load, capacity);
                let vehicle = &mut vehicles[k];
                vehicle.load     = transfer.load_after;
                vehicle.location = Some(best.to);

                let record = DispatchRecord::new(round, vehicle.id, best, &transfer, inventory);
                vehicle.route.push(record);
                debug!(
                    round,
                    vehicle     = k,
                    from        = inventory.name(record.from),
                    to          = inventory.name(record.to),
                    picked_up   = record.picked_up,
                    dropped_off = record.dropped_off,
                    load        = record.load_after,
                    score       = record.score,
                    "dispatch"
                );
                records.push(record);
                moved = true;
                observer.on_dispatch(&record, inventory, &vehicles);
            }

            // ── ④ Progress ────────────────────────────────────────────────
            if !moved {
                termination = Termination::Stalled;
                break;
            }
        }

        Ok(finish(records, vehicles, rounds, termination, inventory, observer))
    }
}

/// Assign depots round-robin over stations sorted by count, most surplus
/// first (ties keep inventory order), and load each vehicle there.
///
/// Vehicles sharing a depot load one after another, so the second only
/// gets what the first left behind.
fn place_vehicles(inventory: &mut Inventory, vehicles: &mut [Vehicle], capacity: u32) {
    let mut order: Vec<StationId> = inventory.ids().collect();
    order.sort_by_key(|&s| Reverse(inventory.count(s)));

    for (k, vehicle) in vehicles.iter_mut().enumerate() {
        let depot = order[k % order.len()];
        vehicle.location = Some(depot);
        vehicle.load = inventory.load_depot(depot, capacity);
    }
}

/// A pair is feasible for a vehicle if it can pick up at the origin or
/// drop off at the destination.
fn feasible(pair: &ScoredPair, load: u32, capacity: u32, inventory: &Inventory) -> bool {
    (load < capacity && inventory.count(pair.from) > 0)
        || (load > 0 && inventory.count(pair.to) < 0)
}

fn finish<O: DispatchObserver>(
    records:     Vec<DispatchRecord>,
    vehicles:    Vec<Vehicle>,
    rounds:      u32,
    termination: Termination,
    inventory:   &Inventory,
    observer:    &mut O,
) -> DispatchRun {
    info!(rounds, ?termination, records = records.len(), "fleet dispatch finished");
    observer.on_run_end(termination, inventory);
    DispatchRun { records, vehicles, steps: rounds, termination }
}
