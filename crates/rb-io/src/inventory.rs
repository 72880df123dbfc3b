//! Inventory loader.
//!
//! # CSV format
//!
//! ```csv
//! location,count
//! Library,7
//! Gym,-3
//! Dorms,4.0
//! ```
//!
//! | `count` value            | Result                               |
//! |--------------------------|--------------------------------------|
//! | integer, non-zero        | station added                        |
//! | integral float (`4.0`)   | station added with the integer value |
//! | `0`                      | skipped with a warning (balanced)    |
//! | blank, text, `3.5`       | skipped with a warning               |
//!
//! Row order becomes inventory order, which is the scorer's tie-break
//! order.  A location listed twice is an error.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use rb_dispatch::Inventory;

use crate::DataResult;

#[derive(Deserialize)]
struct InventoryRecord {
    location: String,
    #[serde(default)]
    count:    String,
}

/// Load an [`Inventory`] from a CSV file.
pub fn load_inventory_csv(path: &Path) -> DataResult<Inventory> {
    load_inventory_reader(File::open(path)?)
}

/// Like [`load_inventory_csv`] but accepts any `Read` source.
pub fn load_inventory_reader<R: Read>(reader: R) -> DataResult<Inventory> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut inventory = Inventory::new();
    let mut skipped = 0usize;
    for result in csv_reader.deserialize::<InventoryRecord>() {
        let row = result?;
        match parse_count(&row.count) {
            Some(0) => {
                warn!(location = %row.location, "skipping balanced station");
                skipped += 1;
            }
            Some(n) => {
                inventory.insert(row.location, n)?;
            }
            None => {
                warn!(location = %row.location, count = %row.count, "skipping non-integer inventory count");
                skipped += 1;
            }
        }
    }

    info!(stations = inventory.len(), skipped, net = inventory.total(), "loaded inventory");
    Ok(inventory)
}

/// Integer value of `s`, accepting integral floats.  `None` for anything
/// else.
fn parse_count(s: &str) -> Option<i64> {
    if let Ok(n) = s.parse::<i64>() {
        return Some(n);
    }
    let f = s.parse::<f64>().ok()?;
    (f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64).then_some(f as i64)
}
