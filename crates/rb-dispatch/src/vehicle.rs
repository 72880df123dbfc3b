//! Service vehicle state.

use rb_core::{StationId, VehicleId};

use crate::record::DispatchRecord;

/// A rebalancing vehicle.  Invariant: `0 ≤ load ≤ capacity`.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub id:       VehicleId,
    /// `None` until the engine places the vehicle.
    pub location: Option<StationId>,
    pub load:     u32,
    /// Moves made by this vehicle, in order.
    pub route:    Vec<DispatchRecord>,
}

impl Vehicle {
    pub fn new(id: VehicleId) -> Self {
        Self { id, location: None, load: 0, route: Vec::new() }
    }

    #[inline]
    pub fn can_pick_up(&self, capacity: u32) -> bool {
        self.load < capacity
    }

    #[inline]
    pub fn can_drop_off(&self) -> bool {
        self.load > 0
    }

    /// Able to either pick up or drop off.  Only a zero-capacity vehicle is
    /// ever inactive.
    #[inline]
    pub fn is_active(&self, capacity: u32) -> bool {
        self.can_pick_up(capacity) || self.can_drop_off()
    }
}
