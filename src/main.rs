//! SNPTracker - SNP detector
//!
//! Compares a reference sequence with a sample and reports point mutations
//! (transitions and transversions) plus trailing insertions or deletions.
//!
//! ## Usage
//!
//! ```bash
//! snptracker -r ACTGCTAGCTAGCTA -s ACTGCTGGCTAGATA
//! snptracker -r reference.fasta -s sample.fasta -o report.txt
//! snptracker -r reference.fasta -s ACTG --no-file
//! ```

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::io;

use anyhow::Result;
use clap::Parser;
use log::info;
use simple_logger::init_with_level;

use snptracker::cli::{run, Args};

fn main() -> Result<()> {
    let start = std::time::Instant::now();
    let args = Args::parse();
    init_with_level(args.log_level())?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    run(&args, &mut handle)?;

    info!("Elapsed time: {:?}", start.elapsed());
    Ok(())
}
