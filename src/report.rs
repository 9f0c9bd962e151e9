//! Human-readable variant reports.
//!
//! Two layouts share the same table:
//! - the console report, which also shows both sequences
//! - the report file, which lists only the variants

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::info;

use crate::model::{Variant, VariantKind};

/// Width of the banner and separator lines.
const RULE_WIDTH: usize = 60;

/// Column at which long sequences are wrapped in the console report.
const SEQUENCE_WRAP: usize = 60;

const NO_VARIATION: &str = "No variation detected (sequences are identical)";

/// Per-kind variant counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VariantSummary {
    pub transitions: usize,
    pub transversions: usize,
    pub insertions: usize,
    pub deletions: usize,
}

impl VariantSummary {
    pub fn from_variants(variants: &[Variant]) -> Self {
        variants.iter().fold(Self::default(), |mut summary, variant| {
            match variant.kind() {
                VariantKind::Transition => summary.transitions += 1,
                VariantKind::Transversion => summary.transversions += 1,
                VariantKind::Insertion => summary.insertions += 1,
                VariantKind::Deletion => summary.deletions += 1,
            }
            summary
        })
    }

    pub fn total(&self) -> usize {
        self.transitions + self.transversions + self.insertions + self.deletions
    }

    /// Transition/transversion ratio, `None` without transversions.
    pub fn ts_tv_ratio(&self) -> Option<f64> {
        if self.transversions == 0 {
            None
        } else {
            Some(self.transitions as f64 / self.transversions as f64)
        }
    }
}

/// Writes the variant table (header, rule, one row per variant).
fn write_table<W: Write>(out: &mut W, variants: &[Variant]) -> io::Result<()> {
    writeln!(out, "{:<10} {:<5} {:<5} {:<15}", "Position", "Ref", "Alt", "Type")?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    for variant in variants {
        writeln!(
            out,
            "{:<10} {:<5} {:<5} {:<15}",
            variant.position,
            variant.reference_base(),
            variant.alternate_base(),
            variant.kind()
        )?;
    }
    Ok(())
}

/// Wraps a long sequence, indenting continuation lines under the first.
fn wrap_sequence(label: &str, sequence: &str) -> String {
    if sequence.is_empty() {
        return label.trim_end().to_string();
    }
    let indent = " ".repeat(label.len());
    let options = textwrap::Options::new(SEQUENCE_WRAP + label.len())
        .initial_indent(label)
        .subsequent_indent(&indent)
        .break_words(true);
    textwrap::fill(sequence, options)
}

/// Writes the full console report.
///
/// `reference` and `sample` are the normalized sequences that were compared.
pub fn write_console_report<W: Write>(
    out: &mut W,
    variants: &[Variant],
    reference: &str,
    sample: &str,
) -> io::Result<()> {
    let summary = VariantSummary::from_variants(variants);

    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "SNPTracker - Mutation Report")?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out)?;
    writeln!(out, "{}", wrap_sequence("Reference: ", reference))?;
    writeln!(out, "{}", wrap_sequence("Sample:    ", sample))?;
    writeln!(out)?;
    writeln!(out, "Total variations found: {}", summary.total())?;

    if variants.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", NO_VARIATION)?;
        return Ok(());
    }

    write!(
        out,
        "Transitions: {}  Transversions: {}  Insertions: {}  Deletions: {}",
        summary.transitions, summary.transversions, summary.insertions, summary.deletions
    )?;
    match summary.ts_tv_ratio() {
        Some(ratio) => writeln!(out, "  Ts/Tv: {:.2}", ratio)?,
        None => writeln!(out)?,
    }

    writeln!(out)?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    write_table(out, variants)
}

/// Writes the report file body to any writer.
pub fn write_report<W: Write>(out: &mut W, variants: &[Variant]) -> io::Result<()> {
    writeln!(out, "SNPTRACKER - SNP REPORT")?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out)?;
    writeln!(out, "Total SNPs: {}", variants.len())?;
    writeln!(out)?;

    if variants.is_empty() {
        writeln!(out, "{}", NO_VARIATION)?;
        return Ok(());
    }

    write_table(out, variants)
}

/// Saves the report to `path`, replacing any existing file.
pub fn write_report_file<P: AsRef<Path>>(path: P, variants: &[Variant]) -> io::Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_report(&mut writer, variants)?;
    writer.flush()?;
    info!("Report saved to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::model::MutationKind;

    fn render_console(variants: &[Variant], reference: &str, sample: &str) -> String {
        let mut buf = Vec::new();
        write_console_report(&mut buf, variants, reference, sample).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_console_report() {
        let variants = vec![Variant::substitution(1, 'A', 'G', MutationKind::Transition)];
        let output = render_console(&variants, "ACTG", "GCTG");

        assert!(output.contains("SNPTracker - Mutation Report"));
        assert!(output.contains("Reference: ACTG"));
        assert!(output.contains("Sample:    GCTG"));
        assert!(output.contains("Total variations found: 1"));
        assert!(output.contains("1          A     G     TRANSITION"));
        assert!(!output.contains(NO_VARIATION));
    }

    #[test]
    fn test_console_report_no_variation() {
        let output = render_console(&[], "ACTG", "ACTG");
        assert!(output.contains("Total variations found: 0"));
        assert!(output.contains(NO_VARIATION));
        assert!(!output.contains("Position"));
    }

    #[test]
    fn test_console_report_wraps_long_sequences() {
        let long = "A".repeat(150);
        let output = render_console(&[], &long, &long);
        let reference_lines: Vec<&str> = output
            .lines()
            .skip_while(|l| !l.starts_with("Reference: "))
            .take_while(|l| !l.starts_with("Sample:"))
            .collect();
        assert_eq!(reference_lines.len(), 3);
        assert!(reference_lines[1].starts_with("           A"));
    }

    #[test]
    fn test_indel_rows_use_placeholder() {
        let mut buf = Vec::new();
        write_report(&mut buf, &[Variant::insertion(5, 'A'), Variant::deletion(6, 'C')]).unwrap();
        let output = String::from_utf8(buf).unwrap();
        assert!(output.contains("5          -     A     INSERTION"));
        assert!(output.contains("6          C     -     DELETION"));
    }

    #[test]
    fn test_write_report_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.txt");
        let variants = vec![Variant::substitution(1, 'A', 'G', MutationKind::Transition)];

        write_report_file(&path, &variants).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("SNPTRACKER - SNP REPORT"));
        assert!(content.contains("Total SNPs: 1"));
        assert!(content.contains("TRANSITION"));
    }

    #[test]
    fn test_summary() {
        let variants = vec![
            Variant::substitution(1, 'A', 'G', MutationKind::Transition),
            Variant::substitution(2, 'C', 'T', MutationKind::Transition),
            Variant::substitution(3, 'A', 'C', MutationKind::Transversion),
            Variant::deletion(4, 'G'),
        ];
        let summary = VariantSummary::from_variants(&variants);
        assert_eq!(summary.transitions, 2);
        assert_eq!(summary.transversions, 1);
        assert_eq!(summary.deletions, 1);
        assert_eq!(summary.insertions, 0);
        assert_eq!(summary.total(), 4);
        assert_eq!(summary.ts_tv_ratio(), Some(2.0));

        assert_eq!(VariantSummary::default().ts_tv_ratio(), None);
    }
}
