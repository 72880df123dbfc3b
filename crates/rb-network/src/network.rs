//! Station graph representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing
//! half-edges.  Given a `NodeId n`, its outgoing edges occupy:
//!
//! ```text
//! edge_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! Every undirected link is stored as two half-edges, one per direction, so
//! the Dijkstra inner loop is a contiguous scan and distances come out
//! symmetric.
//!
//! Stations are addressed by `NodeId` internally and by name at the API
//! boundary; the name index is an `FxHashMap`.

use rustc_hash::FxHashMap;

use rb_core::{EdgeId, NodeId, Point2};

use crate::{NetworkError, NetworkResult};

// ── StationNetwork ────────────────────────────────────────────────────────────

/// Undirected station graph in CSR format.
///
/// Fields are `pub` for direct indexed access in the search loop.  Do not
/// construct directly; use [`StationNetworkBuilder`].
#[derive(Debug)]
pub struct StationNetwork {
    // ── Node data ─────────────────────────────────────────────────────────
    /// Station name of each node.  Indexed by `NodeId`.
    pub names: Vec<String>,

    /// Planar position of each node.  Indexed by `NodeId`.
    pub positions: Vec<Point2>,

    // ── CSR adjacency ─────────────────────────────────────────────────────
    /// Row pointer; length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    /// Source node of each half-edge, so an `EdgeId` resolves to both
    /// endpoints without a search of `node_out_start`.
    pub edge_from: Vec<NodeId>,

    /// Destination node of each half-edge.
    pub edge_to: Vec<NodeId>,

    /// Euclidean length of each half-edge.
    pub edge_length: Vec<f64>,

    index: FxHashMap<String, NodeId>,
}

impl StationNetwork {
    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    /// Number of directed half-edges (twice the number of links).
    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    /// `NodeId` of the station called `name`, if present.
    pub fn node(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    pub fn name(&self, node: NodeId) -> &str {
        &self.names[node.index()]
    }

    pub fn position(&self, node: NodeId) -> Point2 {
        self.positions[node.index()]
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing half-edges from `node`.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    /// Iterator over `(neighbor, length)` pairs adjacent to `node`.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.out_edges(node)
            .map(|e| (self.edge_to[e.index()], self.edge_length[e.index()]))
    }
}

// ── StationNetworkBuilder ─────────────────────────────────────────────────────

/// Construct a [`StationNetwork`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use rb_core::Point2;
/// use rb_network::StationNetworkBuilder;
///
/// let mut b = StationNetworkBuilder::new();
/// let gate = b.add_station("East Gate", Point2::new(0.0, 0.0)).unwrap();
/// let hall = b.add_station("Dining Hall", Point2::new(300.0, 400.0)).unwrap();
/// b.add_link(gate, hall);
/// let net = b.build();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.edge_count(), 2); // one half-edge per direction
/// ```
pub struct StationNetworkBuilder {
    names:     Vec<String>,
    positions: Vec<Point2>,
    index:     FxHashMap<String, NodeId>,
    raw_edges: Vec<RawEdge>,
}

struct RawEdge {
    from:   NodeId,
    to:     NodeId,
    length: f64,
}

impl StationNetworkBuilder {
    pub fn new() -> Self {
        Self {
            names:     Vec::new(),
            positions: Vec::new(),
            index:     FxHashMap::default(),
            raw_edges: Vec::new(),
        }
    }

    /// Pre-allocate for the expected number of stations and links.
    pub fn with_capacity(stations: usize, links: usize) -> Self {
        Self {
            names:     Vec::with_capacity(stations),
            positions: Vec::with_capacity(stations),
            index:     FxHashMap::with_capacity_and_hasher(stations, Default::default()),
            raw_edges: Vec::with_capacity(links * 2),
        }
    }

    /// Add a station and return its `NodeId` (sequential from 0).
    pub fn add_station(&mut self, name: impl Into<String>, pos: Point2) -> NetworkResult<NodeId> {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(NetworkError::DuplicateStation(name));
        }
        let id = NodeId(self.names.len() as u32);
        self.index.insert(name.clone(), id);
        self.names.push(name);
        self.positions.push(pos);
        Ok(id)
    }

    /// Look up a station added earlier.
    pub fn node(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    /// Add an undirected link weighted by the Euclidean distance between the
    /// two stations' positions.
    pub fn add_link(&mut self, a: NodeId, b: NodeId) {
        let length = self.positions[a.index()].distance(self.positions[b.index()]);
        self.push_link(a, b, length);
    }

    /// Like [`add_link`](Self::add_link) but addressed by station name.
    pub fn add_link_by_name(&mut self, a: &str, b: &str) -> NetworkResult<()> {
        let na = self.node(a).ok_or_else(|| NetworkError::UnknownStation(a.to_owned()))?;
        let nb = self.node(b).ok_or_else(|| NetworkError::UnknownStation(b.to_owned()))?;
        self.add_link(na, nb);
        Ok(())
    }

    /// Add an undirected link with an explicit length.  Negative and NaN
    /// lengths are rejected.
    pub fn add_weighted_link(&mut self, a: NodeId, b: NodeId, length: f64) -> NetworkResult<()> {
        if length.is_nan() || length < 0.0 {
            return Err(NetworkError::InvalidDistance {
                from:  self.names[a.index()].clone(),
                to:    self.names[b.index()].clone(),
                value: length,
            });
        }
        self.push_link(a, b, length);
        Ok(())
    }

    pub fn station_count(&self) -> usize { self.names.len() }
    pub fn link_count(&self) -> usize { self.raw_edges.len() / 2 }

    fn push_link(&mut self, a: NodeId, b: NodeId, length: f64) {
        self.raw_edges.push(RawEdge { from: a, to: b, length });
        self.raw_edges.push(RawEdge { from: b, to: a, length });
    }

    /// Consume the builder and produce a [`StationNetwork`].
    ///
    /// Time complexity: O(E log E) for the edge sort.
    pub fn build(self) -> StationNetwork {
        let node_count = self.names.len();
        let edge_count = self.raw_edges.len();

        // Stable sort keeps insertion order among a node's neighbors.
        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| e.from.0);

        let edge_from:   Vec<NodeId> = raw.iter().map(|e| e.from).collect();
        let edge_to:     Vec<NodeId> = raw.iter().map(|e| e.to).collect();
        let edge_length: Vec<f64>    = raw.iter().map(|e| e.length).collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edge_count);

        StationNetwork {
            names: self.names,
            positions: self.positions,
            node_out_start,
            edge_from,
            edge_to,
            edge_length,
            index: self.index,
        }
    }
}

impl Default for StationNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
