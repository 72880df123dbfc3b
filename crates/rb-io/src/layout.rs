//! Station layout loader: points + edges → [`StationNetwork`].
//!
//! # CSV formats
//!
//! Points, one row per station:
//!
//! ```csv
//! name,x,y
//! Library,0,0
//! Gym,300,0
//! ```
//!
//! Edges, one row per undirected link.  Weights are the Euclidean distance
//! between the two points; both names must appear in the points file.
//!
//! ```csv
//! from,to
//! Library,Gym
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use rb_core::Point2;
use rb_network::{StationNetwork, StationNetworkBuilder};

use crate::DataResult;

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct PointRecord {
    name: String,
    x:    f64,
    y:    f64,
}

#[derive(Deserialize)]
struct EdgeRecord {
    from: String,
    to:   String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a station network from a points CSV and an edges CSV.
pub fn load_network_csv(points: &Path, edges: &Path) -> DataResult<StationNetwork> {
    load_network_reader(File::open(points)?, File::open(edges)?)
}

/// Like [`load_network_csv`] but accepts any `Read` sources.
pub fn load_network_reader<P: Read, E: Read>(points: P, edges: E) -> DataResult<StationNetwork> {
    let mut builder = StationNetworkBuilder::new();

    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(points);
    for row in reader.deserialize::<PointRecord>() {
        let row = row?;
        builder.add_station(row.name, Point2::new(row.x, row.y))?;
    }

    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(edges);
    for row in reader.deserialize::<EdgeRecord>() {
        let row = row?;
        builder.add_link_by_name(&row.from, &row.to)?;
    }

    info!(stations = builder.station_count(), links = builder.link_count(), "loaded station layout");
    Ok(builder.build())
}
