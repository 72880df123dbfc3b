//! Dispatch-log CSV output.
//!
//! One row per [`DispatchRecord`], stations written by name:
//!
//! ```csv
//! vehicle_id,step,from,to,picked_up,dropped_off,load_after,score,travel_time,from_inventory,to_inventory
//! 0,1,B,A,10,0,10,159.908,10,-4,0
//! ```
//!
//! [`RecordWriter`] writes rows from a finished [`DispatchRun`];
//! [`CsvDispatchObserver`] streams them while the engine runs.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use rb_core::VehicleId;
use rb_dispatch::{DispatchObserver, DispatchRecord, DispatchRun, Inventory, Termination, Vehicle};

use crate::{DataError, DataResult};

const HEADER: [&str; 11] = [
    "vehicle_id",
    "step",
    "from",
    "to",
    "picked_up",
    "dropped_off",
    "load_after",
    "score",
    "travel_time",
    "from_inventory",
    "to_inventory",
];

// ── RecordWriter ──────────────────────────────────────────────────────────────

/// Writes dispatch records as CSV rows.
pub struct RecordWriter<W: Write> {
    writer:   csv::Writer<W>,
    rows:     usize,
    finished: bool,
}

impl RecordWriter<File> {
    /// Create (or truncate) `path` and write the header row.
    pub fn create(path: &Path) -> DataResult<Self> {
        Self::new(File::create(path)?)
    }
}

impl<W: Write> RecordWriter<W> {
    /// Wrap `sink` and write the header row.
    pub fn new(sink: W) -> DataResult<Self> {
        let mut writer = csv::Writer::from_writer(sink);
        writer.write_record(HEADER)?;
        Ok(Self { writer, rows: 0, finished: false })
    }

    /// Write one record.  `inventory` resolves station slots to names.
    pub fn write(&mut self, record: &DispatchRecord, inventory: &Inventory) -> DataResult<()> {
        self.writer.write_record(&[
            record.vehicle.0.to_string(),
            record.step.to_string(),
            inventory.name(record.from).to_owned(),
            inventory.name(record.to).to_owned(),
            record.picked_up.to_string(),
            record.dropped_off.to_string(),
            record.load_after.to_string(),
            record.score.to_string(),
            record.travel_time.to_string(),
            record.from_inventory.to_string(),
            record.to_inventory.to_string(),
        ])?;
        self.rows += 1;
        Ok(())
    }

    /// Write every record of `run`, in log order.
    pub fn write_run(&mut self, run: &DispatchRun, inventory: &Inventory) -> DataResult<()> {
        for record in &run.records {
            self.write(record, inventory)?;
        }
        Ok(())
    }

    pub fn rows_written(&self) -> usize {
        self.rows
    }

    /// Flush buffered rows.  Idempotent.
    pub fn finish(&mut self) -> DataResult<()> {
        if self.finished {
            return Ok(());
        }
        self.writer.flush()?;
        self.finished = true;
        Ok(())
    }

    /// Flush and return the underlying sink.
    pub fn into_inner(self) -> DataResult<W> {
        self.writer.into_inner().map_err(|e| DataError::Io(e.into_error()))
    }
}

/// Write all records of a finished run to `path`.
pub fn write_records_csv(run: &DispatchRun, inventory: &Inventory, path: &Path) -> DataResult<()> {
    let mut writer = RecordWriter::create(path)?;
    writer.write_run(run, inventory)?;
    writer.finish()
}

// ── CsvDispatchObserver ───────────────────────────────────────────────────────

/// A [`DispatchObserver`] that streams every applied move to a
/// [`RecordWriter`].
///
/// Observer methods cannot fail, so the first write error is stored.  After
/// the run returns, check it with [`take_error`][Self::take_error].
pub struct CsvDispatchObserver<W: Write> {
    writer:     RecordWriter<W>,
    idle:       usize,
    last_error: Option<DataError>,
}

impl<W: Write> CsvDispatchObserver<W> {
    pub fn new(writer: RecordWriter<W>) -> Self {
        Self { writer, idle: 0, last_error: None }
    }

    /// Take the stored write error (if any).  `None` if all writes
    /// succeeded.
    pub fn take_error(&mut self) -> Option<DataError> {
        self.last_error.take()
    }

    pub fn rows_written(&self) -> usize {
        self.writer.rows_written()
    }

    /// Vehicle-rounds spent idle.
    pub fn idle_count(&self) -> usize {
        self.idle
    }

    pub fn into_writer(self) -> RecordWriter<W> {
        self.writer
    }

    fn store_err(&mut self, result: DataResult<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: Write> DispatchObserver for CsvDispatchObserver<W> {
    fn on_dispatch(&mut self, record: &DispatchRecord, inventory: &Inventory, _vehicles: &[Vehicle]) {
        let result = self.writer.write(record, inventory);
        self.store_err(result);
    }

    fn on_idle(&mut self, _round: u32, _vehicle: VehicleId) {
        self.idle += 1;
    }

    fn on_run_end(&mut self, _termination: Termination, _inventory: &Inventory) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
