//! Dispatch and scoring configuration.
//!
//! # Presets
//!
//! The two engines ship with different defaults:
//!
//! | Field            | `single_vehicle()`   | `fleet()`          |
//! |------------------|----------------------|--------------------|
//! | `max_steps`      | 10                   | 100                |
//! | imbalance basis  | `StationDifference`  | `LoadDifference`   |
//!
//! Everything else (capacity 20, speed 416.7, `a = b = c = 0.2`) is shared.
//! Applications typically start from a preset and override individual
//! fields from a config file.

use crate::{CoreError, CoreResult};

/// Default vehicle capacity, in units (bikes).
pub const DEFAULT_CAPACITY: u32 = 20;

/// Default distance-to-time divisor: distance units per time unit
/// (metres per minute for the surveyed layouts, ≈ 25 km/h).
pub const DEFAULT_SPEED: f64 = 416.7;

/// Default normalisation divisor applied to the imbalance and load terms.
pub const DEFAULT_IMBALANCE_SCALE: f64 = 25.0;

/// Added to the carried load before dividing so an empty vehicle still
/// yields a finite load term.
pub const DEFAULT_LOAD_EPSILON: f64 = 0.001;

// ── ScoreWeights ──────────────────────────────────────────────────────────────

/// Coefficients of the three score terms.  No normalisation is required:
/// they need not sum to 1 and may be negative.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScoreWeights {
    /// Travel-time weight (`a / t_ij`).
    pub a: f64,
    /// Imbalance weight.
    pub b: f64,
    /// Load-interaction weight.
    pub c: f64,
}

impl ScoreWeights {
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self { a: 0.2, b: 0.2, c: 0.2 }
    }
}

// ── ImbalanceBasis ────────────────────────────────────────────────────────────

/// What the imbalance term compares against the destination inventory.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ImbalanceBasis {
    /// `(N_i − N_j) / scale`: origin inventory minus destination inventory.
    #[default]
    StationDifference,
    /// `(Nc − N_j) / scale`: carried load minus destination inventory.
    LoadDifference,
}

// ── ScoringParams ─────────────────────────────────────────────────────────────

/// Everything the priority scorer needs besides live state.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScoringParams {
    pub weights: ScoreWeights,
    /// Distance units per time unit; `t_ij = distance / speed`.
    pub speed: f64,
    pub basis: ImbalanceBasis,
    pub imbalance_scale: f64,
    pub load_epsilon: f64,
}

impl ScoringParams {
    /// Convert a matrix distance into travel time.
    #[inline]
    pub fn travel_time(&self, distance: f64) -> f64 {
        distance / self.speed
    }
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            weights:         ScoreWeights::default(),
            speed:           DEFAULT_SPEED,
            basis:           ImbalanceBasis::StationDifference,
            imbalance_scale: DEFAULT_IMBALANCE_SCALE,
            load_epsilon:    DEFAULT_LOAD_EPSILON,
        }
    }
}

// ── DispatchConfig ────────────────────────────────────────────────────────────

/// Engine configuration shared by the single-vehicle and fleet engines.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DispatchConfig {
    pub scoring: ScoringParams,

    /// Maximum units a vehicle can carry.  Default: 20.
    pub capacity: u32,

    /// Hard cap on steps (single engine) or rounds (fleet engine).  The only
    /// guarantee of termination: greedy cycles are possible.
    pub max_steps: u32,

    /// Load the single vehicle starts with.  Ignored by the fleet engine,
    /// whose vehicles load up at their depots.
    pub initial_load: u32,
}

impl DispatchConfig {
    /// Preset for the single-vehicle engine.
    pub fn single_vehicle() -> Self {
        Self {
            scoring:      ScoringParams::default(),
            capacity:     DEFAULT_CAPACITY,
            max_steps:    10,
            initial_load: 0,
        }
    }

    /// Preset for the multi-vehicle engine.
    pub fn fleet() -> Self {
        Self {
            scoring: ScoringParams {
                basis: ImbalanceBasis::LoadDifference,
                ..ScoringParams::default()
            },
            capacity:     DEFAULT_CAPACITY,
            max_steps:    100,
            initial_load: 0,
        }
    }

    pub fn with_weights(mut self, a: f64, b: f64, c: f64) -> Self {
        self.scoring.weights = ScoreWeights::new(a, b, c);
        self
    }

    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Reject values that would make scores non-finite or break the
    /// capacity invariant.
    pub fn validate(&self) -> CoreResult<()> {
        let s = &self.scoring;
        if !(s.speed.is_finite() && s.speed > 0.0) {
            return Err(CoreError::Config(format!("speed must be positive and finite, got {}", s.speed)));
        }
        let w = &s.weights;
        if !(w.a.is_finite() && w.b.is_finite() && w.c.is_finite()) {
            return Err(CoreError::Config(format!("weights must be finite, got {w:?}")));
        }
        if !(s.imbalance_scale.is_finite() && s.imbalance_scale != 0.0) {
            return Err(CoreError::Config(format!(
                "imbalance_scale must be finite and non-zero, got {}",
                s.imbalance_scale
            )));
        }
        if !(s.load_epsilon.is_finite() && s.load_epsilon > 0.0) {
            return Err(CoreError::Config(format!(
                "load_epsilon must be positive and finite, got {}",
                s.load_epsilon
            )));
        }
        if self.initial_load > self.capacity {
            return Err(CoreError::Config(format!(
                "initial load {} exceeds capacity {}",
                self.initial_load, self.capacity
            )));
        }
        Ok(())
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self::single_vehicle()
    }
}
