//! xray quickstart: a complete fluorescence run from scratch.
//!
//! Demonstrates:
//!   1. Constructing the target/detector geometry
//!   2. Seeding a fluorescence event source over it
//!   3. Running the same events sequentially and on several workers
//!   4. Persisting the merged histograms as CSV files
//!
//! Run with:
//!   cargo run --example quickstart

use xray_core::units::BestUnit;
use xray_engine::{FluorescenceConfig, FluorescenceSource, RunConfig, RunManager};
use xray_geometry::{Geometry, GeometryConfig};
use xray_hist::CsvDirectory;

// ─── Run parameters ─────────────────────────────────────────────

const EVENTS: u64 = 100_000;
const SEED: u64 = 42;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ─── Geometry and source ────────────────────────────────────

    let geometry = Geometry::construct(&GeometryConfig::default())?;
    println!("{}", geometry.materials());

    let source = FluorescenceSource::new(
        geometry.clone(),
        FluorescenceConfig {
            seed: SEED,
            ..FluorescenceConfig::default()
        },
    )?;

    // ─── Runs ───────────────────────────────────────────────────

    let out_dir = std::env::temp_dir().join("xray-quickstart");
    let mut sink = CsvDirectory::new(&out_dir);
    let mut manager = RunManager::new(RunConfig::default(), &geometry)?;

    let sequential = manager.run_sequential(&source, EVENTS, &mut sink)?;
    let parallel = manager.run(&source, EVENTS, &mut sink)?;

    for summary in [&sequential, &parallel] {
        println!(
            "run {}: {} workers, {} us",
            summary.run,
            summary.metrics.workers.len(),
            summary.metrics.total_us
        );
        if let Some(report) = &summary.outcome.report {
            print!("{report}");
        }
    }

    let totals = parallel.metrics.totals();
    println!(
        "{} of {} events put a fluorescence photon on the detector",
        totals.fluorescence_hits, totals.events
    );
    if let Some(fluo) = parallel.outcome.histograms.get("EDetFluo") {
        let peak = fluo
            .counts()
            .iter()
            .enumerate()
            .skip(1)
            .max_by_key(|(_, n)| **n)
            .map(|(i, _)| fluo.bin_centre(i));
        if let Some(peak) = peak {
            println!("fluorescence peak near {}", BestUnit::energy(peak));
        }
    }
    println!("histograms written to {}", out_dir.display());
    Ok(())
}
