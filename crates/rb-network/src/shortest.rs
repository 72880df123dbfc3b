//! Single-source shortest paths.
//!
//! # Pluggability
//!
//! [`DistanceMatrix`](crate::DistanceMatrix) builds its rows through the
//! [`PathSearch`] trait, so a different search (A*, contraction
//! hierarchies) can be dropped in without touching the matrix code.  The
//! default [`Dijkstra`] is plenty for station counts in the hundreds.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rb_core::NodeId;

use crate::network::StationNetwork;
use crate::{NetworkError, NetworkResult};

// ── StationPath ───────────────────────────────────────────────────────────────

/// An ordered station sequence from source to destination.
#[derive(Debug, Clone, PartialEq)]
pub struct StationPath {
    /// Stations visited in order, including both endpoints.
    pub nodes: Vec<NodeId>,
    /// Sum of link lengths along `nodes`.
    pub distance: f64,
}

impl StationPath {
    /// `true` if the source and destination are the same station.
    pub fn is_trivial(&self) -> bool {
        self.nodes.len() <= 1
    }
}

// ── ShortestTree ──────────────────────────────────────────────────────────────

/// Result of one single-source search: distance and predecessor per node.
#[derive(Debug, Clone)]
pub struct ShortestTree {
    pub source: NodeId,
    /// `dist[v]` = shortest distance from `source`; `f64::INFINITY` when
    /// unreachable.
    pub dist: Vec<f64>,
    /// `prev[v]` = node preceding `v` on its shortest path;
    /// `NodeId::INVALID` for the source and unreached nodes.
    pub prev: Vec<NodeId>,
}

impl ShortestTree {
    /// Distance to `to`, or `None` if unreachable.
    pub fn distance_to(&self, to: NodeId) -> Option<f64> {
        let d = self.dist[to.index()];
        d.is_finite().then_some(d)
    }

    /// Reconstruct the station sequence to `to` from predecessor links.
    pub fn path_to(&self, to: NodeId) -> Option<StationPath> {
        let distance = self.distance_to(to)?;
        let mut nodes = vec![to];
        let mut cur = to;
        while cur != self.source {
            cur = self.prev[cur.index()];
            if cur == NodeId::INVALID {
                return None;
            }
            nodes.push(cur);
        }
        nodes.reverse();
        Some(StationPath { nodes, distance })
    }
}

// ── PathSearch trait ──────────────────────────────────────────────────────────

/// Pluggable single-source shortest-path search.
///
/// Implementations must be `Send + Sync` so matrix rows can be computed on
/// Rayon workers with the `parallel` feature.
pub trait PathSearch: Send + Sync {
    fn shortest_from(&self, network: &StationNetwork, source: NodeId) -> ShortestTree;
}

// ── Dijkstra ──────────────────────────────────────────────────────────────────

/// Dijkstra's algorithm over the CSR station graph using link length as
/// cost.  Lengths are non-negative by construction.
pub struct Dijkstra;

impl PathSearch for Dijkstra {
    fn shortest_from(&self, network: &StationNetwork, source: NodeId) -> ShortestTree {
        dijkstra(network, source)
    }
}

impl StationNetwork {
    /// Shortest path between two named stations.
    pub fn shortest_path(&self, from: &str, to: &str) -> NetworkResult<StationPath> {
        let src = self.node(from).ok_or_else(|| NetworkError::UnknownStation(from.to_owned()))?;
        let dst = self.node(to).ok_or_else(|| NetworkError::UnknownStation(to.to_owned()))?;
        dijkstra(self, src)
            .path_to(dst)
            .ok_or_else(|| NetworkError::NoPath { from: from.to_owned(), to: to.to_owned() })
    }
}

/// Frontier entry.  Ordered so `BinaryHeap` (a max-heap) pops the smallest
/// cost first; ties pop the lower `NodeId` first for deterministic order.
#[derive(Copy, Clone, PartialEq)]
struct Frontier {
    cost: f64,
    node: NodeId,
}

impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn dijkstra(network: &StationNetwork, source: NodeId) -> ShortestTree {
    let n = network.node_count();
    let mut dist    = vec![f64::INFINITY; n];
    let mut prev    = vec![NodeId::INVALID; n];
    let mut settled = vec![false; n];

    dist[source.index()] = 0.0;

    let mut heap = BinaryHeap::new();
    heap.push(Frontier { cost: 0.0, node: source });

    while let Some(Frontier { cost, node }) = heap.pop() {
        // Finalised nodes are never revisited; later entries are stale.
        if settled[node.index()] {
            continue;
        }
        settled[node.index()] = true;

        for (neighbor, length) in network.neighbors(node) {
            if settled[neighbor.index()] {
                continue;
            }
            let new_cost = cost + length;
            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev[neighbor.index()] = node;
                heap.push(Frontier { cost: new_cost, node: neighbor });
            }
        }
    }

    ShortestTree { source, dist, prev }
}
