//! Data model for sequence comparison.
//!
//! This module contains the data structures shared by the loader,
//! the detector and the report writers:
//! - Sequences, as loaded from a FASTA file or given literally
//! - Substitution classes and variant kinds
//! - Variant records, one per differing position

use std::fmt;

/// Placeholder printed for the missing side of an insertion or deletion.
pub const GAP: char = '-';

/// A single nucleotide sequence with its optional identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    /// The sequence identifier (from the FASTA header, without '>')
    pub id: Option<String>,
    /// The raw sequence data, case preserved
    pub data: String,
}

impl Sequence {
    /// Creates a new sequence with an identifier.
    pub fn new(id: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            data: data.into(),
        }
    }

    /// Creates a sequence without identifier (command-line literal).
    pub fn literal(data: impl Into<String>) -> Self {
        Self {
            id: None,
            data: data.into(),
        }
    }

    /// Returns the number of symbols in the sequence.
    pub fn len(&self) -> usize {
        self.data.chars().count()
    }

    /// Returns true if the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.data
    }

    /// Returns the uppercase form used for comparison.
    pub fn normalized(&self) -> String {
        self.data.to_uppercase()
    }

    /// Name used in logs and reports.
    pub fn label(&self) -> &str {
        self.id.as_deref().unwrap_or("<literal>")
    }
}

/// Substitution class of a single-base change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    /// Purine to purine or pyrimidine to pyrimidine
    Transition,
    /// Any other substitution
    Transversion,
}

/// Kind reported for each variant record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantKind {
    Transition,
    Transversion,
    Insertion,
    Deletion,
}

impl From<MutationKind> for VariantKind {
    fn from(kind: MutationKind) -> Self {
        match kind {
            MutationKind::Transition => VariantKind::Transition,
            MutationKind::Transversion => VariantKind::Transversion,
        }
    }
}

impl fmt::Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Width flags must apply: report tables pad this column
        f.pad(match self {
            VariantKind::Transition => "TRANSITION",
            VariantKind::Transversion => "TRANSVERSION",
            VariantKind::Insertion => "INSERTION",
            VariantKind::Deletion => "DELETION",
        })
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&VariantKind::from(*self), f)
    }
}

/// What changed at a variant position.
///
/// Insertions and deletions carry only the base that exists, so the `-`
/// placeholder never appears inside the data, only in its rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// Both sequences have a base here and they differ
    Substitution {
        reference: char,
        alternate: char,
        kind: MutationKind,
    },
    /// Position exists only in the sample
    Insertion { alternate: char },
    /// Position exists only in the reference
    Deletion { reference: char },
}

/// A single difference between reference and sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Variant {
    /// 1-based position
    pub position: usize,
    pub change: Change,
}

impl Variant {
    pub fn substitution(
        position: usize,
        reference: char,
        alternate: char,
        kind: MutationKind,
    ) -> Self {
        Self {
            position,
            change: Change::Substitution {
                reference,
                alternate,
                kind,
            },
        }
    }

    pub fn insertion(position: usize, alternate: char) -> Self {
        Self {
            position,
            change: Change::Insertion { alternate },
        }
    }

    pub fn deletion(position: usize, reference: char) -> Self {
        Self {
            position,
            change: Change::Deletion { reference },
        }
    }

    /// Reference base, or `-` for insertions.
    pub fn reference_base(&self) -> char {
        match self.change {
            Change::Substitution { reference, .. } | Change::Deletion { reference } => reference,
            Change::Insertion { .. } => GAP,
        }
    }

    /// Alternate base, or `-` for deletions.
    pub fn alternate_base(&self) -> char {
        match self.change {
            Change::Substitution { alternate, .. } | Change::Insertion { alternate } => alternate,
            Change::Deletion { .. } => GAP,
        }
    }

    pub fn kind(&self) -> VariantKind {
        match self.change {
            Change::Substitution { kind, .. } => kind.into(),
            Change::Insertion { .. } => VariantKind::Insertion,
            Change::Deletion { .. } => VariantKind::Deletion,
        }
    }

    /// Returns true for insertions and deletions.
    pub fn is_indel(&self) -> bool {
        !matches!(self.change, Change::Substitution { .. })
    }
}
