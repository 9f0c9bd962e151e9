//! SNPTracker - synthetic test data generator
//!
//! Writes 57 reference/sample FASTA pairs with known SNPs and indels, plus a
//! manifest, so the detector can be checked against planted mutations.
//!
//! ## Usage
//!
//! ```bash
//! generate_test_data                       # writes to test_data/
//! generate_test_data -o fixtures --seed 7  # reproducible run
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, Level};
use rand::rngs::StdRng;
use rand::SeedableRng;
use simple_logger::init_with_level;

use snptracker::synthetic::{generate_datasets, save_datasets};

/// Generate synthetic reference/sample pairs with known variants
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Output directory
    #[arg(short = 'o', long = "outdir", value_name = "PATH", default_value = "test_data")]
    outdir: PathBuf,

    /// Seed for a reproducible run (random when omitted)
    #[arg(long = "seed", value_name = "SEED")]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    init_with_level(Level::Info)?;
    let args = Args::parse();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let datasets = generate_datasets(&mut rng);
    save_datasets(&args.outdir, &datasets)
        .with_context(|| format!("Failed to write datasets to {}", args.outdir.display()))?;

    info!("Data written to {}/", args.outdir.display());
    info!("Run: snptracker -r <file> -s <sequence>");
    Ok(())
}
