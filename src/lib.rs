//! # SNPTracker - Reference/Sample SNP Detector
//!
//! Compares a reference nucleotide sequence with a sample and reports every
//! differing position as a transition, transversion, insertion or deletion.
//! Sequences are assumed to be co-registered: there is no alignment step.
//!
//! ## Architecture
//!
//! - `model`: Sequences and variant records
//! - `fasta`: Loading a sequence from a FASTA file or a literal value
//! - `variant`: Mutation classification and variant detection
//! - `report`: Console and file reports
//! - `cli`: Command-line arguments and the analysis pipeline
//! - `synthetic`: Synthetic datasets with planted variants

pub mod cli;
pub mod fasta;
pub mod model;
pub mod report;
pub mod synthetic;
pub mod variant;
