//! Variant detection between a reference and a sample sequence.
//!
//! The two sequences are assumed to be co-registered base for base: no
//! alignment is performed. Positions present in both sequences are compared
//! directly; any length overhang is reported as a block of insertions (sample
//! longer) or deletions (reference longer).

use log::debug;

use crate::model::{MutationKind, Variant};

/// Classifies a substitution as a transition or a transversion.
///
/// Purines are `A`/`G`, pyrimidines `C`/`T`. Bases from the same group give a
/// transition. Anything else, including symbols outside `ACGT`, is a
/// transversion. Input case is not normalized here.
///
/// # Examples
///
/// ```
/// use snptracker::model::MutationKind;
/// use snptracker::variant::classify_mutation;
///
/// assert_eq!(classify_mutation('A', 'G'), MutationKind::Transition);
/// assert_eq!(classify_mutation('A', 'C'), MutationKind::Transversion);
/// ```
pub fn classify_mutation(ref_base: char, alt_base: char) -> MutationKind {
    let is_purine = |b: char| matches!(b, 'A' | 'G');
    let is_pyrimidine = |b: char| matches!(b, 'C' | 'T');

    if (is_purine(ref_base) && is_purine(alt_base))
        || (is_pyrimidine(ref_base) && is_pyrimidine(alt_base))
    {
        MutationKind::Transition
    } else {
        MutationKind::Transversion
    }
}

/// Compares two sequences position by position.
///
/// Both inputs are uppercased first. The result is ordered by strictly
/// increasing 1-based position: substitutions in the shared region first,
/// then the trailing insertions or deletions. Its length is the number of
/// mismatches in the shared region plus the length difference.
pub fn detect_variants(reference: &str, sample: &str) -> Vec<Variant> {
    let reference: Vec<char> = reference.to_uppercase().chars().collect();
    let sample: Vec<char> = sample.to_uppercase().chars().collect();
    let min_length = reference.len().min(sample.len());

    let mut variants: Vec<Variant> = reference
        .iter()
        .zip(sample.iter())
        .enumerate()
        .filter(|(_, (r, s))| r != s)
        .map(|(i, (&r, &s))| Variant::substitution(i + 1, r, s, classify_mutation(r, s)))
        .collect();

    if reference.len() > sample.len() {
        variants.extend(
            reference[min_length..]
                .iter()
                .enumerate()
                .map(|(offset, &r)| Variant::deletion(min_length + offset + 1, r)),
        );
    } else if sample.len() > reference.len() {
        variants.extend(
            sample[min_length..]
                .iter()
                .enumerate()
                .map(|(offset, &s)| Variant::insertion(min_length + offset + 1, s)),
        );
    }

    let indels = variants.iter().filter(|v| v.is_indel()).count();
    debug!(
        "Compared {} bp against {} bp: {} substitutions, {} indels",
        reference.len(),
        sample.len(),
        variants.len() - indels,
        indels
    );

    variants
}
