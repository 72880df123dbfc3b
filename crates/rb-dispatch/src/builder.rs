//! Fluent builder for constructing an [`Engine`].

use rb_core::DispatchConfig;
use rb_network::DistanceMatrix;

use crate::engine::Engine;
use crate::multi::MultiVehicleDispatchEngine;
use crate::single::DispatchEngine;
use crate::{DispatchError, DispatchResult};

/// Fluent builder for [`Engine`], parameterised by vehicle count.
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default                                          |
/// |----------------------|--------------------------------------------------|
/// | `.vehicles(n)`       | 1 → single-vehicle engine; > 1 → fleet engine    |
/// | `.config(c)`         | `DispatchConfig::single_vehicle()` / `fleet()`   |
/// | `.start_station(s)`  | best-ranked origin (single engine only)          |
///
/// # Example
///
/// ```rust,ignore
/// let engine = DispatchBuilder::new(&matrix)
///     .vehicles(3)
///     .build()?;
/// let run = engine.run(&mut inventory, &mut NoopObserver)?;
/// ```
pub struct DispatchBuilder<'m> {
    matrix:   &'m DistanceMatrix,
    config:   Option<DispatchConfig>,
    vehicles: usize,
    start:    Option<String>,
}

impl<'m> DispatchBuilder<'m> {
    pub fn new(matrix: &'m DistanceMatrix) -> Self {
        Self { matrix, config: None, vehicles: 1, start: None }
    }

    /// Override the preset picked from the vehicle count.
    pub fn config(mut self, config: DispatchConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn vehicles(mut self, n: usize) -> Self {
        self.vehicles = n;
        self
    }

    /// Fixed start station for the single-vehicle engine.
    pub fn start_station(mut self, name: impl Into<String>) -> Self {
        self.start = Some(name.into());
        self
    }

    /// Validate inputs and return the engine matching the vehicle count.
    pub fn build(self) -> DispatchResult<Engine<'m>> {
        match self.vehicles {
            0 => Err(DispatchError::NoVehicles),
            1 => {
                let config = self.config.unwrap_or_else(DispatchConfig::single_vehicle);
                let mut engine = DispatchEngine::new(self.matrix, config)?;
                if let Some(start) = self.start {
                    engine = engine.with_start(start);
                }
                Ok(Engine::Single(engine))
            }
            n => {
                if self.start.is_some() {
                    return Err(DispatchError::StartStationForFleet);
                }
                let config = self.config.unwrap_or_else(DispatchConfig::fleet);
                Ok(Engine::Fleet(MultiVehicleDispatchEngine::new(self.matrix, config, n)?))
            }
        }
    }
}
