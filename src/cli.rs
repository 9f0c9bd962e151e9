//! Command-line interface and the analysis pipeline behind it.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, Level};

use crate::fasta::SequenceSource;
use crate::model::Variant;
use crate::report::{write_console_report, write_report_file};
use crate::variant::detect_variants;

/// Report file written when `--output` is not given.
pub const DEFAULT_REPORT_FILE: &str = "snps_report.txt";

/// SNPTracker - Detect SNPs between a reference and a sample sequence
///
/// Each of --reference and --sample is either a FASTA file (only the first
/// record is used) or the sequence itself. Sequences are compared base for
/// base without alignment; a length difference is reported as trailing
/// insertions or deletions.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Reference sequence, or a FASTA file containing it
    #[arg(short = 'r', long = "reference", value_name = "SEQ|FILE")]
    pub reference: String,

    /// Sample sequence, or a FASTA file containing it
    #[arg(short = 's', long = "sample", value_name = "SEQ|FILE")]
    pub sample: String,

    /// Report file to write
    #[arg(short = 'o', long = "output", value_name = "FILE", default_value = DEFAULT_REPORT_FILE)]
    pub output: PathBuf,

    /// Print the report to the console only, without writing a file
    #[arg(long = "no-file")]
    pub no_file: bool,

    /// Enable debug logging
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Args {
    /// Parses arguments without the program name, as tests do.
    pub fn from(args: Vec<String>) -> Self {
        Args::try_from_args(args).unwrap_or_else(|e| e.exit())
    }

    /// Fallible variant of [`Args::from`].
    pub fn try_from_args(args: Vec<String>) -> Result<Self, clap::Error> {
        let mut full_args = vec![env!("CARGO_PKG_NAME").to_string()];
        full_args.extend(args);

        Args::try_parse_from(full_args)
    }

    pub fn log_level(&self) -> Level {
        if self.verbose {
            Level::Debug
        } else {
            Level::Info
        }
    }
}

/// Loads both inputs, detects variants, prints the console report to `out`
/// and writes the report file unless disabled.
pub fn run<W: Write>(args: &Args, out: &mut W) -> Result<Vec<Variant>> {
    let reference = SequenceSource::resolve(&args.reference)
        .load()
        .with_context(|| format!("Failed to load reference: {}", args.reference))?;
    let sample = SequenceSource::resolve(&args.sample)
        .load()
        .with_context(|| format!("Failed to load sample: {}", args.sample))?;

    info!(
        "Comparing {} ({} bp) with {} ({} bp)",
        reference.label(),
        reference.len(),
        sample.label(),
        sample.len()
    );

    let reference = reference.normalized();
    let sample = sample.normalized();
    let variants = detect_variants(&reference, &sample);

    write_console_report(out, &variants, &reference, &sample)?;

    if !args.no_file {
        write_report_file(&args.output, &variants)
            .with_context(|| format!("Failed to write report: {}", args.output.display()))?;
    }

    info!("Analysis complete: {} variants", variants.len());
    Ok(variants)
}

#[cfg(test)]
mod tests {
    use tempfile::{tempdir, NamedTempFile};

    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args_valid() {
        let parsed = Args::from(args(&[
            "--reference",
            "ACTG",
            "--sample",
            "ACTT",
            "--output",
            "test_report.txt",
        ]));
        assert_eq!(parsed.reference, "ACTG");
        assert_eq!(parsed.sample, "ACTT");
        assert_eq!(parsed.output, PathBuf::from("test_report.txt"));
        assert!(!parsed.no_file);
        assert_eq!(parsed.log_level(), Level::Info);
    }

    #[test]
    fn test_parse_args_default_output() {
        let parsed = Args::from(args(&["-r", "ACTG", "-s", "ACTT", "-v"]));
        assert_eq!(parsed.output, PathBuf::from(DEFAULT_REPORT_FILE));
        assert_eq!(parsed.log_level(), Level::Debug);
    }

    #[test]
    fn test_parse_args_missing_required() {
        let err = Args::try_from_args(args(&["--reference", "ACTG"])).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_run_with_literals() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("report.txt");
        let parsed = Args::from(args(&[
            "-r",
            "actg",
            "-s",
            "ACTT",
            "-o",
            output.to_str().unwrap(),
        ]));

        let mut console = Vec::new();
        let variants = run(&parsed, &mut console).unwrap();

        assert_eq!(variants.len(), 1);
        assert_eq!(variants[0].position, 4);
        let console = String::from_utf8(console).unwrap();
        assert!(console.contains("Reference: ACTG"));
        assert!(output.exists());
    }

    #[test]
    fn test_run_with_fasta_and_no_file() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("report.txt");
        let mut reference = NamedTempFile::new().unwrap();
        write!(reference, ">ref\nACTG\n>other\nTTTT\n").unwrap();

        let parsed = Args::from(args(&[
            "-r",
            reference.path().to_str().unwrap(),
            "-s",
            "ACTGA",
            "-o",
            output.to_str().unwrap(),
            "--no-file",
        ]));

        let mut console = Vec::new();
        let variants = run(&parsed, &mut console).unwrap();

        assert_eq!(variants, vec![Variant::insertion(5, 'A')]);
        assert!(!output.exists());
    }
}
