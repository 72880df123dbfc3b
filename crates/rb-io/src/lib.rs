//! `rb-io` — file input and output for the rebal simulator.
//!
//! | Module        | Reads                                   | Writes                  |
//! |---------------|-----------------------------------------|-------------------------|
//! | [`layout`]    | points + edges CSV → `StationNetwork`   |                         |
//! | [`inventory`] | `location,count` CSV → `Inventory`      |                         |
//! | [`matrix`]    | distance-matrix CSV                     | distance-matrix CSV     |
//! | [`records`]   |                                         | dispatch-log CSV        |
//! | [`config`]    | TOML → `RunConfig` → `DispatchBuilder`  |                         |
//!
//! # Usage
//!
//! ```rust,ignore
//! use rb_io::{CsvDispatchObserver, RecordWriter, RunConfig, load_inventory_csv, read_matrix_csv};
//!
//! let matrix    = read_matrix_csv(Path::new("matrix.csv"))?;
//! let mut inv   = load_inventory_csv(Path::new("inventory.csv"))?;
//! let engine    = RunConfig::load(Path::new("run.toml"))?.builder(&matrix)?.build()?;
//! let mut obs   = CsvDispatchObserver::new(RecordWriter::create(Path::new("records.csv"))?);
//! engine.run(&mut inv, &mut obs)?;
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod config;
pub mod error;
pub mod inventory;
pub mod layout;
pub mod matrix;
pub mod records;

#[cfg(test)]
mod tests;

pub use config::RunConfig;
pub use error::{DataError, DataResult};
pub use inventory::{load_inventory_csv, load_inventory_reader};
pub use layout::{load_network_csv, load_network_reader};
pub use matrix::{read_matrix_csv, read_matrix_reader, write_matrix_csv, write_matrix_writer};
pub use records::{CsvDispatchObserver, RecordWriter, write_records_csv};
