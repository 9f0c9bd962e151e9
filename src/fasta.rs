//! FASTA sequence loader.
//!
//! This module turns a command-line value into a sequence. A value is either
//! a path to a FASTA file or the sequence itself. Only the first record of a
//! FASTA file is ever used.
//!
//! ## FASTA Format
//!
//! ```text
//! >sequence_identifier optional description
//! ACGTACGTACGT...
//! >another_sequence      <- parsing stops here
//! TGCATGCATGCA...
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

use crate::model::Sequence;

/// Errors that can occur while loading a sequence.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read file: {0}")]
    IoError(#[from] io::Error),
}

/// Result type for loader operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Where a sequence comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceSource {
    /// A FASTA file on disk
    Path(PathBuf),
    /// The sequence itself
    Literal(String),
}

impl SequenceSource {
    /// Decides how to interpret a command-line value.
    ///
    /// Values naming an existing regular file are read as FASTA; anything
    /// else is taken as a literal sequence.
    pub fn resolve(value: &str) -> Self {
        let path = Path::new(value);
        if path.is_file() {
            SequenceSource::Path(path.to_path_buf())
        } else {
            SequenceSource::Literal(value.to_string())
        }
    }

    /// Loads the sequence this source points to.
    pub fn load(self) -> LoadResult<Sequence> {
        match self {
            SequenceSource::Path(path) => load_from_path(path),
            SequenceSource::Literal(value) => Ok(use_literal(value)),
        }
    }
}

/// Loads a value that may be either a FASTA path or a literal sequence.
///
/// # Examples
///
/// ```
/// use snptracker::fasta::load_sequence;
///
/// let seq = load_sequence("ACTG").unwrap();
/// assert_eq!(seq.as_str(), "ACTG");
/// ```
pub fn load_sequence(value: &str) -> LoadResult<Sequence> {
    let source = SequenceSource::resolve(value);
    debug!("Resolved input {:?} as {:?}", value, source);
    source.load()
}

/// Wraps a literal value as a sequence, unchanged.
pub fn use_literal(value: impl Into<String>) -> Sequence {
    Sequence::literal(value)
}

/// Reads the first record of a FASTA file.
///
/// # Arguments
///
/// * `path` - Path to the FASTA file
///
/// # Errors
///
/// Returns `LoadError::NotFound` if the file does not exist, and
/// `LoadError::IoError` for any other read failure.
pub fn load_from_path<P: AsRef<Path>>(path: P) -> LoadResult<Sequence> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        _ => LoadError::IoError(e),
    })?;

    let sequence = parse_first_record(BufReader::new(file))?;
    debug!(
        "Read {} bp ({}) from {}",
        sequence.len(),
        sequence.label(),
        path.display()
    );
    Ok(sequence)
}

/// Parses the first FASTA record from a reader.
///
/// Blank lines are skipped and sequence lines are trimmed and concatenated.
/// A second header after the first record has started ends parsing. Content
/// without any header is still accepted as sequence data.
pub fn parse_first_record<R: BufRead>(reader: R) -> LoadResult<Sequence> {
    let mut id: Option<String> = None;
    let mut data = String::new();
    let mut started = false;

    for line_result in reader.lines() {
        let line = line_result?;
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('>') {
            if started {
                break;
            }
            started = true;
            id = header
                .split_whitespace()
                .next()
                .map(str::to_string);
        } else {
            data.push_str(line);
            started = true;
        }
    }

    Ok(match id {
        Some(id) => Sequence::new(id, data),
        None => Sequence::literal(data),
    })
}

/// Parses the first FASTA record from a string.
#[cfg(test)]
fn parse_first_record_str(content: &str) -> LoadResult<Sequence> {
    parse_first_record(content.as_bytes())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_parse_single_line() {
        let seq = parse_first_record_str(">seq1\nACTG").unwrap();
        assert_eq!(seq.as_str(), "ACTG");
        assert_eq!(seq.id.as_deref(), Some("seq1"));
    }

    #[test]
    fn test_parse_multiline_sequence() {
        let seq = parse_first_record_str(">seq1\nACTG\nTAGC\n").unwrap();
        assert_eq!(seq.as_str(), "ACTGTAGC");
    }

    #[test]
    fn test_only_first_record() {
        let seq = parse_first_record_str(">seq1\nACTG\n>seq2\nTAGC").unwrap();
        assert_eq!(seq.as_str(), "ACTG");
        assert_eq!(seq.id.as_deref(), Some("seq1"));
    }

    #[test]
    fn test_parse_with_description_and_blank_lines() {
        let content = "\n>seq1 some description\n\n  ACG  \n\nT\n";
        let seq = parse_first_record_str(content).unwrap();
        assert_eq!(seq.id.as_deref(), Some("seq1"));
        assert_eq!(seq.as_str(), "ACGT");
    }

    #[test]
    fn test_sequence_without_header() {
        // Header-less content is tolerated
        let seq = parse_first_record_str("ACGT\nTTAA\n").unwrap();
        assert_eq!(seq.as_str(), "ACGTTTAA");
        assert!(seq.id.is_none());

        // A header after bare content ends the record
        let seq = parse_first_record_str("ACGT\n>seq1\nTGCA\n").unwrap();
        assert_eq!(seq.as_str(), "ACGT");
    }

    #[test]
    fn test_empty_content() {
        let seq = parse_first_record_str("").unwrap();
        assert!(seq.is_empty());

        let seq = parse_first_record_str(">only_header\n").unwrap();
        assert!(seq.is_empty());
        assert_eq!(seq.id.as_deref(), Some("only_header"));
    }

    #[test]
    fn test_case_preserved() {
        let seq = parse_first_record_str(">seq1\nacgt\n").unwrap();
        assert_eq!(seq.as_str(), "acgt");
    }

    #[test]
    fn test_load_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, ">seq1\nACTG\n>seq2\nTAGC\n").unwrap();

        let seq = load_from_path(file.path()).unwrap();
        assert_eq!(seq.as_str(), "ACTG");
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_from_path("missing.fasta");
        match result {
            Err(LoadError::NotFound(path)) => assert_eq!(path, PathBuf::from("missing.fasta")),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_source() {
        let file = NamedTempFile::new().unwrap();
        let value = file.path().to_str().unwrap();
        assert_eq!(
            SequenceSource::resolve(value),
            SequenceSource::Path(file.path().to_path_buf())
        );
        assert_eq!(
            SequenceSource::resolve("ACTG"),
            SequenceSource::Literal("ACTG".to_string())
        );
        // Non-existent paths fall back to literals
        assert_eq!(
            SequenceSource::resolve("missing.fasta"),
            SequenceSource::Literal("missing.fasta".to_string())
        );
    }

    #[test]
    fn test_load_sequence_dispatch() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, ">ref\nactg\n").unwrap();

        let from_file = load_sequence(file.path().to_str().unwrap()).unwrap();
        assert_eq!(from_file.as_str(), "actg");
        assert_eq!(from_file.id.as_deref(), Some("ref"));

        let literal = load_sequence("GATTACA").unwrap();
        assert_eq!(literal, use_literal("GATTACA"));
    }
}
