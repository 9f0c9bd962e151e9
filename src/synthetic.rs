//! Synthetic datasets with known variants.
//!
//! Used to check that the detector finds the mutations that were planted.
//! Every dataset is written as a two-record FASTA file (reference first,
//! sample second) next to a `MANIFEST.txt` describing the whole set.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::info;
use rand::seq::index;
use rand::Rng;

use crate::model::Variant;
use crate::variant::classify_mutation;

const BASES: [char; 4] = ['A', 'T', 'G', 'C'];
const PURINES: [char; 2] = ['A', 'G'];
const PYRIMIDINES: [char; 2] = ['C', 'T'];

/// Name of the manifest written by [`save_datasets`].
pub const MANIFEST_FILE: &str = "MANIFEST.txt";

/// A reference/sample pair with a short description of what was planted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    pub name: String,
    pub reference: String,
    pub sample: String,
    pub description: String,
}

impl Dataset {
    fn new(
        name: impl Into<String>,
        reference: impl Into<String>,
        sample: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            reference: reference.into(),
            sample: sample.into(),
            description: description.into(),
        }
    }
}

fn pick<R: Rng + ?Sized>(rng: &mut R, choices: &[char]) -> char {
    choices[rng.random_range(0..choices.len())]
}

/// Picks a base different from `base`.
fn other_base<R: Rng + ?Sized>(rng: &mut R, base: char) -> char {
    let candidates: Vec<char> = BASES.iter().copied().filter(|&b| b != base).collect();
    pick(rng, &candidates)
}

/// Generates a random DNA sequence; each base is G/C with probability `gc_content`.
pub fn generate_sequence<R: Rng + ?Sized>(rng: &mut R, length: usize, gc_content: f64) -> String {
    (0..length)
        .map(|_| {
            if rng.random::<f64>() < gc_content {
                pick(rng, &['G', 'C'])
            } else {
                pick(rng, &['A', 'T'])
            }
        })
        .collect()
}

/// Plants up to `num_snps` substitutions at distinct positions.
///
/// Returns the mutated sequence and the planted variants in position order.
pub fn introduce_snps<R: Rng + ?Sized>(
    rng: &mut R,
    reference: &str,
    num_snps: usize,
) -> (String, Vec<Variant>) {
    let mut seq: Vec<char> = reference.chars().collect();
    let mut positions = index::sample(rng, seq.len(), num_snps.min(seq.len())).into_vec();
    positions.sort_unstable();

    let snps = positions
        .into_iter()
        .map(|pos| {
            let ref_base = seq[pos];
            let alt_base = other_base(rng, ref_base);
            seq[pos] = alt_base;
            let kind = classify_mutation(ref_base, alt_base);
            Variant::substitution(pos + 1, ref_base, alt_base, kind)
        })
        .collect();

    (seq.into_iter().collect(), snps)
}

/// Applies `num_indels` random single-base insertions or deletions.
///
/// Positions refer to the sequence as it was when each edit was applied.
pub fn introduce_indels<R: Rng + ?Sized>(
    rng: &mut R,
    reference: &str,
    num_indels: usize,
) -> (String, Vec<Variant>) {
    let mut seq: Vec<char> = reference.chars().collect();
    let mut indels = Vec::with_capacity(num_indels);

    for _ in 0..num_indels {
        let pos = rng.random_range(0..seq.len().max(1));
        if !seq.is_empty() && rng.random_bool(0.5) {
            let deleted = seq.remove(pos);
            indels.push(Variant::deletion(pos + 1, deleted));
        } else {
            let inserted = pick(rng, &BASES);
            seq.insert(pos, inserted);
            indels.push(Variant::insertion(pos + 1, inserted));
        }
    }

    (seq.into_iter().collect(), indels)
}

/// Generates the full battery of test datasets.
pub fn generate_datasets<R: Rng + ?Sized>(rng: &mut R) -> Vec<Dataset> {
    let mut datasets = Vec::with_capacity(57);

    // 1-10: identical sequences
    for i in 0..10 {
        let length = rng.random_range(100..=300);
        let seq = generate_sequence(rng, length, 0.5);
        datasets.push(Dataset::new(
            format!("snptracker_test_{:02}_identical", i + 1),
            seq.clone(),
            seq,
            "No SNPs (identical)",
        ));
    }

    // 11-35: increasing SNP load
    let snp_groups = [
        (10..20, 100..=300, 1..=3, "few_snps"),
        (20..30, 150..=400, 5..=10, "medium_snps"),
        (30..35, 200..=500, 15..=25, "many_snps"),
    ];
    for (indices, lengths, counts, label) in snp_groups {
        for i in indices {
            let length: usize = rng.random_range(lengths.clone());
            let reference = generate_sequence(rng, length, 0.5);
            let num_snps: usize = rng.random_range(counts.clone());
            let (sample, snps) = introduce_snps(rng, &reference, num_snps);
            datasets.push(Dataset::new(
                format!("snptracker_test_{:02}_{}", i + 1, label),
                reference,
                sample,
                format!("{} SNPs", snps.len()),
            ));
        }
    }

    // 36-40: indels only
    for i in 35..40 {
        let length = rng.random_range(150..=300);
        let reference = generate_sequence(rng, length, 0.5);
        let num_indels = rng.random_range(1..=3);
        let (sample, indels) = introduce_indels(rng, &reference, num_indels);
        datasets.push(Dataset::new(
            format!("snptracker_test_{:02}_with_indels", i + 1),
            reference,
            sample,
            format!("{} indels", indels.len()),
        ));
    }

    // 41-45: SNPs followed by indels
    for i in 40..45 {
        let length = rng.random_range(200..=400);
        let reference = generate_sequence(rng, length, 0.5);
        let num_snps = rng.random_range(3..=8);
        let (sample, snps) = introduce_snps(rng, &reference, num_snps);
        let num_indels = rng.random_range(1..=2);
        let (sample, indels) = introduce_indels(rng, &sample, num_indels);
        datasets.push(Dataset::new(
            format!("snptracker_test_{:02}_snps_indels", i + 1),
            reference,
            sample,
            format!("{} variants", snps.len() + indels.len()),
        ));
    }

    datasets.extend(biological_scenarios(rng));
    datasets.extend(edge_cases(rng));
    datasets
}

/// 46-50: heterozygous-like, transition-rich, transversion-rich, CpG island
/// and third-codon-position changes.
fn biological_scenarios<R: Rng + ?Sized>(rng: &mut R) -> Vec<Dataset> {
    let mut datasets = Vec::with_capacity(5);

    let reference = generate_sequence(rng, 200, 0.5);
    let mut sample: Vec<char> = reference.chars().collect();
    for pos in index::sample(rng, 200, 20).into_vec() {
        if rng.random_bool(0.5) {
            sample[pos] = other_base(rng, sample[pos]);
        }
    }
    datasets.push(Dataset::new(
        "snptracker_test_46_heterozygous",
        reference,
        sample.into_iter().collect::<String>(),
        "Heterozygous-like",
    ));

    let reference = generate_sequence(rng, 200, 0.5);
    let mut sample: Vec<char> = reference.chars().collect();
    let mut transitions = 0;
    for pos in index::sample(rng, 200, 15).into_vec() {
        sample[pos] = match sample[pos] {
            'A' => 'G',
            'G' => 'A',
            'C' => 'T',
            _ => 'C',
        };
        transitions += 1;
    }
    datasets.push(Dataset::new(
        "snptracker_test_47_transitions",
        reference,
        sample.into_iter().collect::<String>(),
        format!("{} transitions", transitions),
    ));

    let reference = generate_sequence(rng, 200, 0.5);
    let mut sample: Vec<char> = reference.chars().collect();
    let mut transversions = 0;
    for pos in index::sample(rng, 200, 15).into_vec() {
        sample[pos] = if PURINES.contains(&sample[pos]) {
            pick(rng, &PYRIMIDINES)
        } else {
            pick(rng, &PURINES)
        };
        transversions += 1;
    }
    datasets.push(Dataset::new(
        "snptracker_test_48_transversions",
        reference,
        sample.into_iter().collect::<String>(),
        format!("{} transversions", transversions),
    ));

    let reference: String = (0..100)
        .map(|_| {
            if rng.random_bool(0.3) {
                "CG".to_string()
            } else {
                generate_sequence(rng, 2, 0.5)
            }
        })
        .collect();
    let (sample, _) = introduce_snps(rng, &reference, 10);
    datasets.push(Dataset::new(
        "snptracker_test_49_cpg_island",
        reference,
        sample,
        "CpG island (high mutation)",
    ));

    let reference = generate_sequence(rng, 150, 0.5);
    let mut sample: Vec<char> = reference.chars().collect();
    let mut synonymous = 0;
    for pos in (2..150).step_by(3) {
        if rng.random_bool(0.3) {
            sample[pos] = other_base(rng, sample[pos]);
            synonymous += 1;
        }
    }
    datasets.push(Dataset::new(
        "snptracker_test_50_synonymous",
        reference,
        sample.into_iter().collect::<String>(),
        format!("{} synonymous changes", synonymous),
    ));

    datasets
}

/// 51-55: extreme cases.
fn edge_cases<R: Rng + ?Sized>(rng: &mut R) -> Vec<Dataset> {
    let mut datasets = Vec::with_capacity(7);

    let reference = generate_sequence(rng, 30, 0.5);
    let sample: String = (0..30).map(|_| pick(rng, &BASES)).collect();
    datasets.push(Dataset::new(
        "snptracker_test_51_all_mutated",
        reference,
        sample,
        "All positions mutated",
    ));

    let reference = generate_sequence(rng, 100, 0.5);
    let (sample, _) = introduce_snps(rng, &reference, 1);
    datasets.push(Dataset::new(
        "snptracker_test_52_single_snp",
        reference,
        sample,
        "Single SNP",
    ));

    let reference = generate_sequence(rng, 200, 0.5);
    let sample = format!("{}{}", &reference[..50], &reference[100..]);
    datasets.push(Dataset::new(
        "snptracker_test_53_large_deletion",
        reference,
        sample,
        "Large deletion (50bp)",
    ));

    let reference = generate_sequence(rng, 100, 0.5);
    let insertion = generate_sequence(rng, 30, 0.5);
    let sample = format!("{}{}{}", &reference[..50], insertion, &reference[50..]);
    datasets.push(Dataset::new(
        "snptracker_test_54_large_insertion",
        reference,
        sample,
        "Large insertion (30bp)",
    ));

    let reference = generate_sequence(rng, 100, 0.5);
    for (i, suffix) in ["55_multi_sample", "55b_sample2", "55c_sample3"].iter().enumerate() {
        let num_snps = rng.random_range(2..=5);
        let (sample, _) = introduce_snps(rng, &reference, num_snps);
        datasets.push(Dataset::new(
            format!("snptracker_test_{}", suffix),
            reference.clone(),
            sample,
            format!("Sample {} of 3", i + 1),
        ));
    }

    datasets
}

fn write_dataset(path: &Path, dataset: &Dataset) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writeln!(writer, ">reference {}", dataset.description)?;
    writeln!(writer, "{}", dataset.reference)?;
    writeln!(writer, ">sample {}", dataset.description)?;
    writeln!(writer, "{}", dataset.sample)?;
    writer.flush()
}

/// Writes one FASTA file per dataset plus the manifest into `dir`.
///
/// Returns the path of the manifest.
pub fn save_datasets<P: AsRef<Path>>(dir: P, datasets: &[Dataset]) -> io::Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let manifest_path = dir.join(MANIFEST_FILE);
    let mut manifest = BufWriter::new(File::create(&manifest_path)?);
    writeln!(manifest, "{}", "=".repeat(70))?;
    writeln!(manifest, "SNPTracker - Synthetic Test Data")?;
    writeln!(manifest, "{}", "=".repeat(70))?;
    writeln!(manifest)?;
    writeln!(manifest, "Total datasets: {}", datasets.len())?;
    writeln!(manifest)?;
    writeln!(manifest, "NOTE: these are FABRICATED sequences with known SNPs,")?;
    writeln!(manifest, "meant to check that the detector finds the planted mutations.")?;
    writeln!(manifest)?;
    writeln!(manifest, "Format: each file holds a reference record and a sample record")?;
    writeln!(manifest, "Files:")?;
    writeln!(manifest, "{}", "-".repeat(70))?;

    for dataset in datasets {
        let file_name = format!("{}.txt", dataset.name);
        write_dataset(&dir.join(&file_name), dataset)?;

        writeln!(manifest, "{} - {}", file_name, dataset.description)?;
        writeln!(
            manifest,
            "  Ref: {} bp, Sample: {} bp",
            dataset.reference.len(),
            dataset.sample.len()
        )?;
        info!(
            "Generated {} ({}bp vs {}bp)",
            file_name,
            dataset.reference.len(),
            dataset.sample.len()
        );
    }
    manifest.flush()?;

    info!("Manifest saved to {}", manifest_path.display());
    info!("Total: {} files generated", datasets.len());
    Ok(manifest_path)
}
