//! TOML run configuration.
//!
//! Every key is optional.  The vehicle count picks the preset
//! (`DispatchConfig::single_vehicle()` for 1, `fleet()` otherwise) and the
//! remaining keys override it field by field:
//!
//! ```toml
//! vehicles      = 3
//! capacity      = 15
//! max_steps     = 50
//! speed         = 416.7
//! basis         = "load_difference"   # or "station_difference"
//!
//! [weights]
//! a = 0.5
//! b = 0.2
//! c = 0.1
//! ```
//!
//! Unknown keys are rejected so typos do not silently fall back to defaults.

use std::path::Path;

use serde::Deserialize;

use rb_core::{DispatchConfig, ImbalanceBasis, ScoreWeights};
use rb_dispatch::DispatchBuilder;
use rb_network::DistanceMatrix;

use crate::DataResult;

/// Overrides read from a TOML file.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub vehicles:        Option<usize>,
    /// Single-vehicle engine only.
    pub start_station:   Option<String>,
    pub capacity:        Option<u32>,
    pub max_steps:       Option<u32>,
    pub initial_load:    Option<u32>,
    pub speed:           Option<f64>,
    pub basis:           Option<ImbalanceBasis>,
    pub imbalance_scale: Option<f64>,
    pub load_epsilon:    Option<f64>,
    /// Missing coefficients keep their default.
    pub weights:         Option<ScoreWeights>,
}

impl RunConfig {
    /// Read and parse a TOML file.
    pub fn load(path: &Path) -> DataResult<Self> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    pub fn from_toml_str(s: &str) -> DataResult<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Vehicle count, defaulting to one.
    pub fn vehicle_count(&self) -> usize {
        self.vehicles.unwrap_or(1)
    }

    /// The preset for the vehicle count with every present key applied,
    /// validated.
    pub fn dispatch_config(&self) -> DataResult<DispatchConfig> {
        let mut config = match self.vehicle_count() {
            0 | 1 => DispatchConfig::single_vehicle(),
            _     => DispatchConfig::fleet(),
        };

        if let Some(v) = self.capacity        { config.capacity = v; }
        if let Some(v) = self.max_steps       { config.max_steps = v; }
        if let Some(v) = self.initial_load    { config.initial_load = v; }
        if let Some(v) = self.speed           { config.scoring.speed = v; }
        if let Some(v) = self.basis           { config.scoring.basis = v; }
        if let Some(v) = self.imbalance_scale { config.scoring.imbalance_scale = v; }
        if let Some(v) = self.load_epsilon    { config.scoring.load_epsilon = v; }
        if let Some(v) = self.weights         { config.scoring.weights = v; }

        config.validate()?;
        Ok(config)
    }

    /// A [`DispatchBuilder`] configured from this file.
    pub fn builder<'m>(&self, matrix: &'m DistanceMatrix) -> DataResult<DispatchBuilder<'m>> {
        let mut builder = DispatchBuilder::new(matrix)
            .vehicles(self.vehicle_count())
            .config(self.dispatch_config()?);
        if let Some(start) = &self.start_station {
            builder = builder.start_station(start.clone());
        }
        Ok(builder)
    }
}
