//! K-mer frequency comparison between two read sets.
//!
//! Only k-mers observed in both sets are compared. Normalised frequencies use
//! each set's full total as denominator, not just the shared k-mers.

pub mod counter;

pub use counter::count_kmers;

use crate::error::{AnalysisError, Result};
use crate::statistics::significance::check_level;
use crate::statistics::{proportion_test, round_decimals, sample_rows, SignificanceResult, DEFAULT_SIGNIFICANCE_LEVEL};
use crate::types::KmerCounts;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

const NORMALISED_DECIMALS: usize = 8;

/// Counts of a shared k-mer in both sets and their absolute difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawDifference {
    pub count_a: u64,
    pub count_b: u64,
    pub difference: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalisedDifference {
    pub normalised_a: f64,
    pub normalised_b: f64,
    pub difference: f64,
}

/// One row of the comparison table. Column order is fixed: raw values first,
/// then normalised ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KmerComparisonRow {
    #[serde(rename = "Kmer")]
    pub kmer: String,
    #[serde(rename = "Count A")]
    pub count_a: u64,
    #[serde(rename = "Count B")]
    pub count_b: u64,
    #[serde(rename = "Raw Difference")]
    pub raw_difference: u64,
    #[serde(rename = "Normalised A")]
    pub normalised_a: f64,
    #[serde(rename = "Normalised B")]
    pub normalised_b: f64,
    #[serde(rename = "Normalised Difference")]
    pub normalised_difference: f64,
}

pub type ComparisonTable = Vec<KmerComparisonRow>;

/// Shared k-mers in the order of `counts_a`, with their absolute count difference.
pub fn raw_difference(counts_a: &KmerCounts, counts_b: &KmerCounts) -> IndexMap<String, RawDifference> {
    counts_a
        .iter()
        .filter_map(|(kmer, &count_a)| {
            counts_b.get(kmer).map(|&count_b| {
                (
                    kmer.clone(),
                    RawDifference {
                        count_a,
                        count_b,
                        difference: count_a.abs_diff(count_b),
                    },
                )
            })
        })
        .collect()
}

pub fn total_kmer_count(counts: &KmerCounts) -> u64 {
    counts.values().sum()
}

/// `count / total` to eight decimals.
pub fn normalize(count: u64, total: u64) -> Result<f64> {
    if total == 0 {
        return Err(AnalysisError::empty("normalising against a zero k-mer total"));
    }
    Ok(round_decimals(count as f64 / total as f64, NORMALISED_DECIMALS))
}

fn normalised_pair(count_a: u64, total_a: u64, count_b: u64, total_b: u64) -> Result<NormalisedDifference> {
    let normalised_a = normalize(count_a, total_a)?;
    let normalised_b = normalize(count_b, total_b)?;
    Ok(NormalisedDifference {
        normalised_a,
        normalised_b,
        difference: (normalised_a - normalised_b).abs(),
    })
}

/// Normalised frequencies of every shared k-mer, each set against its own total.
pub fn normalized_difference(
    counts_a: &KmerCounts,
    counts_b: &KmerCounts,
) -> Result<IndexMap<String, NormalisedDifference>> {
    let (total_a, total_b) = (total_kmer_count(counts_a), total_kmer_count(counts_b));
    raw_difference(counts_a, counts_b)
        .into_iter()
        .map(|(kmer, raw)| Ok((kmer, normalised_pair(raw.count_a, total_a, raw.count_b, total_b)?)))
        .collect()
}

/// Raw and normalised comparison of every shared k-mer.
pub fn combined_comparison(counts_a: &KmerCounts, counts_b: &KmerCounts) -> Result<ComparisonTable> {
    let (total_a, total_b) = (total_kmer_count(counts_a), total_kmer_count(counts_b));
    let table = raw_difference(counts_a, counts_b)
        .into_iter()
        .map(|(kmer, raw)| {
            let norm = normalised_pair(raw.count_a, total_a, raw.count_b, total_b)?;
            Ok(KmerComparisonRow {
                kmer,
                count_a: raw.count_a,
                count_b: raw.count_b,
                raw_difference: raw.difference,
                normalised_a: norm.normalised_a,
                normalised_b: norm.normalised_b,
                normalised_difference: norm.difference,
            })
        })
        .collect::<Result<ComparisonTable>>()?;

    log::info!(
        "{} shared k-mers ({} in first set, {} in second)",
        table.len(),
        counts_a.len(),
        counts_b.len()
    );
    Ok(table)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProportionTestOptions {
    pub level: f64,
    /// Tables with more rows than this are sampled before testing.
    pub sample_threshold: usize,
    pub sample_fraction: f64,
    pub seed: Option<u64>,
}

impl Default for ProportionTestOptions {
    fn default() -> Self {
        Self {
            level: DEFAULT_SIGNIFICANCE_LEVEL,
            sample_threshold: 100,
            sample_fraction: 0.1,
            seed: None,
        }
    }
}

/// Proportion test of every row of a comparison table.
///
/// Large tables are sampled first. Totals are recomputed from the raw count
/// columns of the rows actually tested. A row that cannot be tested is
/// reported and left out instead of failing the batch.
pub fn test_all_proportions(
    table: &[KmerComparisonRow],
    options: &ProportionTestOptions,
) -> Result<Vec<(String, SignificanceResult)>> {
    check_level(options.level)?;

    let sampled;
    let rows: &[KmerComparisonRow] = if table.len() > options.sample_threshold {
        sampled = sample_rows(table, options.sample_fraction, options.seed)?;
        log::info!("Testing a sample of {} of {} k-mers", sampled.len(), table.len());
        &sampled
    } else {
        table
    };

    let total_a: u64 = rows.iter().map(|r| r.count_a).sum();
    let total_b: u64 = rows.iter().map(|r| r.count_b).sum();

    let mut results = Vec::with_capacity(rows.len());
    for row in rows {
        match proportion_test([row.count_a, row.count_b], [total_a, total_b], options.level) {
            Ok(result) => results.push((row.kmer.clone(), result)),
            Err(e) => log::warn!("Skipping k-mer {}: {}", row.kmer, e),
        }
    }
    Ok(results)
}
