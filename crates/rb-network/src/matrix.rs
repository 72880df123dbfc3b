//! All-pairs shortest-distance matrix.
//!
//! Computed once per network and read-only afterwards.  Storage is a dense
//! row-major `Vec<f64>` with `f64::INFINITY` marking unreachable pairs; the
//! public accessors turn that into `None` so callers treat a missing
//! distance as "no route" rather than as a number.
//!
//! Cost: one Dijkstra per station, O(V · E log V) overall.

use rustc_hash::FxHashMap;
use tracing::debug;

use rb_core::NodeId;

use crate::network::StationNetwork;
use crate::shortest::{Dijkstra, PathSearch};
use crate::{NetworkError, NetworkResult};

/// Square station × station table of shortest-path distances.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    names: Vec<String>,
    index: FxHashMap<String, NodeId>,
    dist:  Vec<f64>,
}

impl DistanceMatrix {
    // ── Construction ──────────────────────────────────────────────────────

    /// Run [`Dijkstra`] from every station of `network`.
    pub fn all_pairs_shortest(network: &StationNetwork) -> Self {
        Self::all_pairs_with(network, &Dijkstra)
    }

    /// Like [`all_pairs_shortest`](Self::all_pairs_shortest) with a custom
    /// search.
    pub fn all_pairs_with<S: PathSearch>(network: &StationNetwork, search: &S) -> Self {
        let n = network.node_count();

        #[cfg(not(feature = "parallel"))]
        let rows: Vec<Vec<f64>> = (0..n)
            .map(|s| search.shortest_from(network, NodeId(s as u32)).dist)
            .collect();

        #[cfg(feature = "parallel")]
        let rows: Vec<Vec<f64>> = {
            use rayon::prelude::*;
            (0..n)
                .into_par_iter()
                .map(|s| search.shortest_from(network, NodeId(s as u32)).dist)
                .collect()
        };

        let dist: Vec<f64> = rows.into_iter().flatten().collect();
        debug_assert_eq!(dist.len(), n * n);

        let names = network.names.clone();
        let index = build_index(&names);
        debug!(stations = n, "built all-pairs distance matrix");
        Self { names, index, dist }
    }

    /// Build from precomputed rows (e.g. a matrix loaded from disk).
    ///
    /// `rows[i][j]` is the distance from `names[i]` to `names[j]`; use
    /// `f64::INFINITY` for unreachable pairs.  Negative and NaN entries are
    /// rejected.  The matrix is not required to be symmetric.
    pub fn from_rows(names: Vec<String>, rows: Vec<Vec<f64>>) -> NetworkResult<Self> {
        let n = names.len();
        if rows.len() != n {
            return Err(NetworkError::RowCount { stations: n, rows: rows.len() });
        }

        let mut index = FxHashMap::with_capacity_and_hasher(n, Default::default());
        for (i, name) in names.iter().enumerate() {
            if index.insert(name.clone(), NodeId(i as u32)).is_some() {
                return Err(NetworkError::DuplicateStation(name.clone()));
            }
        }

        let mut dist = Vec::with_capacity(n * n);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(NetworkError::RowLength { stations: n, row: i, got: row.len() });
            }
            for (j, value) in row.into_iter().enumerate() {
                if value.is_nan() || value < 0.0 {
                    return Err(NetworkError::InvalidDistance {
                        from: names[i].clone(),
                        to:   names[j].clone(),
                        value,
                    });
                }
                dist.push(value);
            }
        }

        Ok(Self { names, index, dist })
    }

    // ── Dimensions & lookup ───────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Station names in row order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn name(&self, node: NodeId) -> &str {
        &self.names[node.index()]
    }

    pub fn node(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    // ── Distances ─────────────────────────────────────────────────────────

    /// Shortest distance between two rows, or `None` if unreachable.
    #[inline]
    pub fn distance(&self, from: NodeId, to: NodeId) -> Option<f64> {
        let d = self.dist[from.index() * self.len() + to.index()];
        d.is_finite().then_some(d)
    }

    /// Shortest distance between two named stations.  `None` if either name
    /// is absent or no path exists.
    pub fn distance_between(&self, from: &str, to: &str) -> Option<f64> {
        self.distance(self.node(from)?, self.node(to)?)
    }

    /// Raw row for `from` (unreachable entries are `f64::INFINITY`).
    pub fn row(&self, from: NodeId) -> &[f64] {
        let n = self.len();
        &self.dist[from.index() * n..(from.index() + 1) * n]
    }

    /// `true` if `d(i, j)` and `d(j, i)` agree within `tolerance` for every
    /// pair (both unreachable counts as agreeing).
    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        let n = self.len();
        (0..n).all(|i| {
            (i + 1..n).all(|j| {
                let a = self.dist[i * n + j];
                let b = self.dist[j * n + i];
                a == b || (a - b).abs() <= tolerance
            })
        })
    }
}

fn build_index(names: &[String]) -> FxHashMap<String, NodeId> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| (name.clone(), NodeId(i as u32)))
        .collect()
}
