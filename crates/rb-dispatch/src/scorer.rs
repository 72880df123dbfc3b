//! Dispatch priority scoring.
//!
//! ```text
//! score(i, j, Nc) = a / t_ij
//!                 + b · imbalance / scale
//!                 + c · (2 · N_j / (Nc + ε)) / scale
//!
//! imbalance = N_i − N_j   (ImbalanceBasis::StationDifference)
//!           = Nc  − N_j   (ImbalanceBasis::LoadDifference)
//! ```
//!
//! With several candidate loads (one per vehicle) a pair scores the best
//! value over all of them; the ranking says what is worth doing for *some*
//! vehicle, not for a particular one.
//!
//! Travel times are resolved once per run: every ordered inventory pair is
//! looked up in the distance matrix by name and cached.  Pairs with a
//! missing station, no path, or a zero travel time never appear in a
//! ranking.

use std::cmp::Ordering;

use tracing::debug;

use rb_core::{ImbalanceBasis, ScoringParams, StationId};
use rb_network::DistanceMatrix;

use crate::inventory::Inventory;

/// Score of one ordered station pair.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScoredPair {
    pub from:        StationId,
    pub to:          StationId,
    pub travel_time: f64,
    pub score:       f64,
}

/// Score for a single candidate load.  Pure; used by [`PriorityScorer`] and
/// handy on its own for sensitivity checks.
#[inline]
pub fn priority(params: &ScoringParams, travel_time: f64, origin: i64, destination: i64, load: u32) -> f64 {
    let w = &params.weights;
    let (ni, nj, nc) = (origin as f64, destination as f64, f64::from(load));
    let imbalance = match params.basis {
        ImbalanceBasis::StationDifference => ni - nj,
        ImbalanceBasis::LoadDifference    => nc - nj,
    };
    let load_term = 2.0 * nj / (nc + params.load_epsilon);
    w.a / travel_time + w.b * imbalance / params.imbalance_scale + w.c * load_term / params.imbalance_scale
}

/// Ranks station pairs for one run over a fixed station set.
pub struct PriorityScorer {
    params: ScoringParams,
    n:      usize,
    /// `travel[i * n + j]`, `None` when the pair is not scorable.
    travel: Vec<Option<f64>>,
}

impl PriorityScorer {
    /// Resolve travel times for every ordered pair of `inventory` stations.
    pub fn new(matrix: &DistanceMatrix, inventory: &Inventory, params: ScoringParams) -> Self {
        let n = inventory.len();
        let nodes: Vec<_> = inventory.iter().map(|(_, name, _)| matrix.node(name)).collect();

        let mut travel = vec![None; n * n];
        let mut skipped = 0usize;
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let t = match (nodes[i], nodes[j]) {
                    (Some(a), Some(b)) => matrix
                        .distance(a, b)
                        .map(|d| params.travel_time(d))
                        .filter(|t| t.is_finite() && *t > 0.0),
                    _ => None,
                };
                if t.is_none() {
                    skipped += 1;
                }
                travel[i * n + j] = t;
            }
        }

        let missing = nodes.iter().filter(|n| n.is_none()).count();
        if missing > 0 || skipped > 0 {
            debug!(missing_stations = missing, skipped_pairs = skipped, "unscorable station pairs");
        }
        Self { params, n, travel }
    }

    pub fn params(&self) -> &ScoringParams {
        &self.params
    }

    pub fn station_count(&self) -> usize {
        self.n
    }

    /// Cached travel time, `None` for self-pairs and unscorable pairs.
    #[inline]
    pub fn travel_time(&self, from: StationId, to: StationId) -> Option<f64> {
        self.travel[from.index() * self.n + to.index()]
    }

    /// Best score for `from → to` over `loads`.  `None` if the pair is not
    /// scorable or `loads` is empty.
    pub fn score(&self, inventory: &Inventory, from: StationId, to: StationId, loads: &[u32]) -> Option<f64> {
        let t = self.travel_time(from, to)?;
        let (ni, nj) = (inventory.count(from), inventory.count(to));
        loads
            .iter()
            .map(|&nc| priority(&self.params, t, ni, nj, nc))
            .reduce(f64::max)
    }

    /// All scorable pairs, best first.  Equal scores keep inventory order
    /// (origin, then destination).
    pub fn rank(&self, inventory: &Inventory, loads: &[u32]) -> Vec<ScoredPair> {
        debug_assert_eq!(inventory.len(), self.n);
        let mut pairs = Vec::new();
        for from in inventory.ids() {
            self.push_from(inventory, from, loads, &mut pairs);
        }
        sort_desc(&mut pairs);
        pairs
    }

    /// Pairs leaving `from`, best first.  Same relative order as filtering
    /// [`rank`](Self::rank) by origin.
    pub fn rank_from(&self, inventory: &Inventory, from: StationId, loads: &[u32]) -> Vec<ScoredPair> {
        debug_assert_eq!(inventory.len(), self.n);
        let mut pairs = Vec::new();
        self.push_from(inventory, from, loads, &mut pairs);
        sort_desc(&mut pairs);
        pairs
    }

    fn push_from(&self, inventory: &Inventory, from: StationId, loads: &[u32], out: &mut Vec<ScoredPair>) {
        for to in inventory.ids() {
            let Some(travel_time) = self.travel_time(from, to) else { continue };
            let Some(score) = self.score(inventory, from, to, loads) else { continue };
            out.push(ScoredPair { from, to, travel_time, score });
        }
    }
}

/// Stable sort, highest score first.  `-0.0` and `0.0` compare equal, so
/// such pairs keep inventory order.  Scores are finite after `validate`.
fn sort_desc(pairs: &mut [ScoredPair]) {
    pairs.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
}
