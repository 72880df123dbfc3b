//! campus — end-to-end demo for the rebal simulator.
//!
//! Builds an eight-station campus layout, computes the distance matrix,
//! then rebalances the same morning inventory twice: once with a single
//! van and once with a fleet.  Matrix and dispatch logs are written to
//! `output/campus/`.
//!
//! An optional TOML file (first argument) overrides the fleet run's
//! configuration.  Set `RUST_LOG=debug` to see every move.

mod network;

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rb_dispatch::{DispatchBuilder, DispatchRun, Dispatcher, Inventory, NoopObserver};
use rb_io::{CsvDispatchObserver, RecordWriter, RunConfig, load_inventory_reader, write_matrix_csv, write_records_csv};
use rb_network::DistanceMatrix;

use network::build_network;

// ── Constants ─────────────────────────────────────────────────────────────────

const FLEET_SIZE: usize = 3;
const OUTPUT_DIR: &str  = "output/campus";

// ── Inventory CSV ─────────────────────────────────────────────────────────────

// Bikes above (+) or below (−) each dock's target at 08:00.
// Transit Hub is balanced and gets skipped on load.
const INVENTORY_CSV: &str = "\
location,count\n\
Library,9\n\
Union,-5\n\
Gym,6\n\
Dorms North,-8\n\
Dorms South,12\n\
Engineering,-7\n\
Stadium,-4\n\
Transit Hub,0\n\
";

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== campus — bike-share rebalancing ===");
    println!();

    // 1. Network and distance matrix.
    let net = build_network()?;
    let t0 = Instant::now();
    let matrix = DistanceMatrix::all_pairs_shortest(&net);
    info!(stations = matrix.len(), elapsed_us = t0.elapsed().as_micros() as u64, "distance matrix ready");

    let out = Path::new(OUTPUT_DIR);
    std::fs::create_dir_all(out)?;
    write_matrix_csv(&matrix, &out.join("matrix.csv"))?;

    // 2. Morning inventory.
    let inventory = load_inventory_reader(Cursor::new(INVENTORY_CSV))?;
    println!(
        "Inventory: {} stations, surplus {}, deficit {}",
        inventory.len(),
        inventory.surplus(),
        inventory.deficit()
    );
    println!();

    // 3. Single van, streamed to CSV while it runs.
    let mut single_inv = inventory.clone();
    let engine = DispatchBuilder::new(&matrix).build()?;
    let mut obs = CsvDispatchObserver::new(RecordWriter::create(&out.join("single_records.csv"))?);
    let run = engine.run(&mut single_inv, &mut obs)?;
    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }
    print_run("Single van", &run, &single_inv);

    // 4. Fleet, optionally configured from TOML, written after the run.
    let run_config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => RunConfig::load(&path)?,
        None => RunConfig { vehicles: Some(FLEET_SIZE), ..RunConfig::default() },
    };
    let mut fleet_inv = inventory.clone();
    let engine = run_config.builder(&matrix)?.build()?;
    let run = engine.run(&mut fleet_inv, &mut NoopObserver)?;
    write_records_csv(&run, &fleet_inv, &out.join("fleet_records.csv"))?;
    print_run(&format!("Fleet of {}", engine.vehicle_count()), &run, &fleet_inv);

    Ok(())
}

fn print_run(title: &str, run: &DispatchRun, inventory: &Inventory) {
    println!("── {title} ──");
    println!(
        "{} steps, {:?}; picked up {}, dropped off {}, {} still on board",
        run.steps,
        run.termination,
        run.total_picked_up(),
        run.total_dropped_off(),
        run.fleet_load()
    );
    println!("{:<6} {:<5} {:<13} {:<13} {:>4} {:>4} {:>5}", "Van", "Step", "From", "To", "Up", "Down", "Load");
    println!("{}", "-".repeat(56));
    for r in &run.records {
        println!(
            "{:<6} {:<5} {:<13} {:<13} {:>4} {:>4} {:>5}",
            r.vehicle.0,
            r.step,
            inventory.name(r.from),
            inventory.name(r.to),
            r.picked_up,
            r.dropped_off,
            r.load_after,
        );
    }
    println!();
    println!("{:<13} {:>6}", "Station", "Final");
    for (_, name, count) in inventory.iter() {
        println!("{name:<13} {count:>6}");
    }
    println!();
}
