//! Station inventory state and the transfer rule.
//!
//! `Inventory` is the one piece of mutable state shared by every vehicle in
//! a run.  All unit movement goes through [`Inventory::transfer`] (or the
//! depot loading used at fleet start), which is what keeps
//! `Σ counts + Σ loads` constant.
//!
//! Station order is insertion order.  The scorer iterates stations in this
//! order, so it doubles as the tie-break order for equal scores.

use rustc_hash::FxHashMap;

use rb_core::{CoreError, StationId};

use crate::DispatchResult;

/// Units moved by one [`Inventory::transfer`] call.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct Transfer {
    /// Vehicle load after both stations were visited.
    pub load_after:  u32,
    /// Units taken from surplus stations (origin and destination combined).
    pub picked_up:   u32,
    /// Units left at deficit stations (origin and destination combined).
    pub dropped_off: u32,
}

/// Ordered map from station name to signed count (positive = surplus,
/// negative = deficit).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Inventory {
    names:  Vec<String>,
    counts: Vec<i64>,
    index:  FxHashMap<String, StationId>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(name, count)` pairs in iteration order.
    ///
    /// A name appearing twice is an error rather than a silent overwrite.
    pub fn from_counts<I, S>(counts: I) -> DispatchResult<Self>
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        let mut inv = Self::new();
        for (name, count) in counts {
            inv.insert(name, count)?;
        }
        Ok(inv)
    }

    /// Append a station and return its slot.
    pub fn insert(&mut self, name: impl Into<String>, count: i64) -> DispatchResult<StationId> {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(CoreError::DuplicateStation(name).into());
        }
        let id = StationId(self.names.len() as u32);
        self.index.insert(name.clone(), id);
        self.names.push(name);
        self.counts.push(count);
        Ok(id)
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn station(&self, name: &str) -> Option<StationId> {
        self.index.get(name).copied()
    }

    pub fn name(&self, id: StationId) -> &str {
        &self.names[id.index()]
    }

    #[inline]
    pub fn count(&self, id: StationId) -> i64 {
        self.counts[id.index()]
    }

    pub fn count_of(&self, name: &str) -> Option<i64> {
        self.station(name).map(|id| self.count(id))
    }

    /// Station slots in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = StationId> + '_ {
        (0..self.names.len()).map(|i| StationId(i as u32))
    }

    /// `(slot, name, count)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (StationId, &str, i64)> + '_ {
        self.names
            .iter()
            .zip(&self.counts)
            .enumerate()
            .map(|(i, (name, &count))| (StationId(i as u32), name.as_str(), count))
    }

    /// Net units held by stations.  Together with the fleet's loads this is
    /// the conserved quantity of a run.
    pub fn total(&self) -> i64 {
        self.counts.iter().sum()
    }

    /// Sum of positive counts.
    pub fn surplus(&self) -> i64 {
        self.counts.iter().filter(|&&c| c > 0).sum()
    }

    /// Sum of negative counts, as a positive number.
    pub fn deficit(&self) -> i64 {
        -self.counts.iter().filter(|&&c| c < 0).sum::<i64>()
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Apply the transfer rule for a move from `from` to `to` with a vehicle
    /// carrying `load` of at most `capacity` units.
    ///
    /// Each station is visited once, origin first:
    ///
    /// 1. load below capacity and station in surplus → pick up
    ///    `min(count, capacity − load)`;
    /// 2. otherwise, station in deficit and load non-zero → drop off
    ///    `min(−count, load)`.
    ///
    /// The destination sees the load as updated by the origin.
    pub fn transfer(&mut self, from: StationId, to: StationId, load: u32, capacity: u32) -> Transfer {
        debug_assert!(load <= capacity);
        let mut t = Transfer { load_after: load, ..Transfer::default() };
        self.exchange(from, capacity, &mut t);
        self.exchange(to, capacity, &mut t);
        t
    }

    fn exchange(&mut self, station: StationId, capacity: u32, t: &mut Transfer) {
        let count = &mut self.counts[station.index()];
        if t.load_after < capacity && *count > 0 {
            let n = (*count).min(i64::from(capacity - t.load_after)) as u32;
            *count -= i64::from(n);
            t.load_after += n;
            t.picked_up += n;
        } else if *count < 0 && t.load_after > 0 {
            let n = (-*count).min(i64::from(t.load_after)) as u32;
            *count += i64::from(n);
            t.load_after -= n;
            t.dropped_off += n;
        }
    }

    /// Load a vehicle at its depot: take `min(surplus, capacity)` units,
    /// where surplus is the positive part of the current count.  Returns the
    /// units taken.
    pub fn load_depot(&mut self, station: StationId, capacity: u32) -> u32 {
        let count = &mut self.counts[station.index()];
        let n = (*count).clamp(0, i64::from(capacity)) as u32;
        *count -= i64::from(n);
        n
    }
}
