//! Distance-matrix CSV reader and writer.
//!
//! # CSV format
//!
//! ```csv
//! ,A,B,C
//! A,0.00,10.00,inf
//! B,10.00,0.00,15.00
//! C,inf,15.00,0.00
//! ```
//!
//! The header's first cell is empty; the remaining cells name the columns.
//! Row labels must list the same stations in the same order.  Values are
//! written with two decimals; `inf` (any case) or an empty cell means
//! unreachable.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use tracing::info;

use rb_core::NodeId;
use rb_network::DistanceMatrix;

use crate::{DataError, DataResult};

const UNREACHABLE: &str = "inf";

/// Read a distance matrix from a CSV file.
pub fn read_matrix_csv(path: &Path) -> DataResult<DistanceMatrix> {
    read_matrix_reader(File::open(path)?)
}

/// Like [`read_matrix_csv`] but accepts any `Read` source.
pub fn read_matrix_reader<R: Read>(reader: R) -> DataResult<DistanceMatrix> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let names: Vec<String> = csv_reader.headers()?.iter().skip(1).map(str::to_owned).collect();

    let mut rows = Vec::with_capacity(names.len());
    for (i, record) in csv_reader.records().enumerate() {
        let record = record?;
        let label = record.get(0).unwrap_or_default();
        match names.get(i) {
            Some(expected) if expected == label => {}
            Some(expected) => {
                return Err(DataError::Parse(format!(
                    "matrix row {i} is labelled {label:?}, expected {expected:?}"
                )));
            }
            None => {
                return Err(DataError::Parse(format!("extra matrix row {label:?}")));
            }
        }
        let row = record
            .iter()
            .skip(1)
            .map(|cell| parse_distance(cell, label))
            .collect::<DataResult<Vec<f64>>>()?;
        rows.push(row);
    }

    let matrix = DistanceMatrix::from_rows(names, rows)?;
    info!(stations = matrix.len(), "read distance matrix");
    Ok(matrix)
}

/// Write `matrix` to a CSV file, creating or truncating it.
pub fn write_matrix_csv(matrix: &DistanceMatrix, path: &Path) -> DataResult<()> {
    write_matrix_writer(matrix, File::create(path)?)
}

/// Like [`write_matrix_csv`] but accepts any `Write` sink.
pub fn write_matrix_writer<W: Write>(matrix: &DistanceMatrix, writer: W) -> DataResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = Vec::with_capacity(matrix.len() + 1);
    header.push(String::new());
    header.extend(matrix.names().iter().cloned());
    csv_writer.write_record(&header)?;

    for (i, name) in matrix.names().iter().enumerate() {
        let mut row = Vec::with_capacity(matrix.len() + 1);
        row.push(name.clone());
        row.extend(matrix.row(NodeId(i as u32)).iter().map(|&d| format_distance(d)));
        csv_writer.write_record(&row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_distance(cell: &str, row: &str) -> DataResult<f64> {
    if cell.is_empty() || cell.eq_ignore_ascii_case(UNREACHABLE) {
        return Ok(f64::INFINITY);
    }
    cell.parse::<f64>()
        .map_err(|_| DataError::Parse(format!("invalid distance {cell:?} in row {row:?}")))
}

fn format_distance(d: f64) -> String {
    if d.is_finite() { format!("{d:.2}") } else { UNREACHABLE.to_owned() }
}
