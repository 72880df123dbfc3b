//! Common interface over the single-vehicle and fleet engines.

use rb_core::DispatchConfig;

use crate::inventory::Inventory;
use crate::multi::MultiVehicleDispatchEngine;
use crate::observer::DispatchObserver;
use crate::record::DispatchRun;
use crate::single::DispatchEngine;
use crate::DispatchResult;

/// Anything that can run a dispatch simulation against an inventory.
///
/// Both engines share the scorer and the transfer rule; they differ only in
/// how vehicles are placed and how a step picks its move.
pub trait Dispatcher {
    fn run<O: DispatchObserver>(
        &self,
        inventory: &mut Inventory,
        observer:  &mut O,
    ) -> DispatchResult<DispatchRun>;

    fn config(&self) -> &DispatchConfig;

    fn vehicle_count(&self) -> usize;
}

impl Dispatcher for DispatchEngine<'_> {
    fn run<O: DispatchObserver>(&self, inventory: &mut Inventory, observer: &mut O) -> DispatchResult<DispatchRun> {
        DispatchEngine::run(self, inventory, observer)
    }

    fn config(&self) -> &DispatchConfig {
        DispatchEngine::config(self)
    }

    fn vehicle_count(&self) -> usize {
        1
    }
}

impl Dispatcher for MultiVehicleDispatchEngine<'_> {
    fn run<O: DispatchObserver>(&self, inventory: &mut Inventory, observer: &mut O) -> DispatchResult<DispatchRun> {
        MultiVehicleDispatchEngine::run(self, inventory, observer)
    }

    fn config(&self) -> &DispatchConfig {
        MultiVehicleDispatchEngine::config(self)
    }

    fn vehicle_count(&self) -> usize {
        MultiVehicleDispatchEngine::vehicle_count(self)
    }
}

/// Engine chosen at runtime by [`DispatchBuilder`](crate::DispatchBuilder).
pub enum Engine<'m> {
    Single(DispatchEngine<'m>),
    Fleet(MultiVehicleDispatchEngine<'m>),
}

impl Dispatcher for Engine<'_> {
    fn run<O: DispatchObserver>(&self, inventory: &mut Inventory, observer: &mut O) -> DispatchResult<DispatchRun> {
        match self {
            Engine::Single(e) => e.run(inventory, observer),
            Engine::Fleet(e)  => e.run(inventory, observer),
        }
    }

    fn config(&self) -> &DispatchConfig {
        match self {
            Engine::Single(e) => e.config(),
            Engine::Fleet(e)  => e.config(),
        }
    }

    fn vehicle_count(&self) -> usize {
        match self {
            Engine::Single(_) => 1,
            Engine::Fleet(e)  => e.vehicle_count(),
        }
    }
}
