//! Shannon entropy of sequences and quartile-based outlier detection.
//!
//! Entropy is measured in bits over the characters a sequence actually
//! contains, so a sequence drawn from `n` distinct symbols scores at most
//! `log2(n)`. A sequence made of one repeated symbol scores exactly `0.0`.
//!
//! ```
//! use seqcompare_tools::entropy;
//! assert_eq!(entropy::entropy("AATT").unwrap(), 1.0);
//! assert_eq!(entropy::entropy("GGGG").unwrap(), 0.0);
//! ```

use crate::error::{AnalysisError, Result};
use crate::statistics::{mean_min_max, percentile, round_significant};
use crate::types::SequenceSet;
use indexmap::IndexMap;
use serde::Serialize;

const ENTROPY_DIGITS: usize = 5;

/// Sequence to entropy (bits), in the order of the source set.
pub type EntropyResult = IndexMap<String, f64>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EntropySummary {
    pub average: f64,
    pub min: f64,
    pub max: f64,
}

/// Values outside the inclusive interquartile range, with the bounds used.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlierReport {
    pub lower_quartile: f64,
    pub upper_quartile: f64,
    pub outliers: EntropyResult,
}

/// Relative frequency of each distinct character, in first-seen order.
pub fn character_probabilities(sequence: &str) -> Result<IndexMap<char, f64>> {
    let mut counts: IndexMap<char, usize> = IndexMap::new();
    let mut length = 0usize;
    for c in sequence.chars() {
        *counts.entry(c).or_insert(0) += 1;
        length += 1;
    }
    if length == 0 {
        return Err(AnalysisError::empty("character probabilities of a zero-length sequence"));
    }

    Ok(counts
        .into_iter()
        .map(|(c, n)| (c, n as f64 / length as f64))
        .collect())
}

/// Shannon entropy `-sum(p * log2(p))`, rounded to five significant digits.
pub fn entropy(sequence: &str) -> Result<f64> {
    let probabilities = character_probabilities(sequence)?;
    let sum: f64 = probabilities.values().map(|&p| p * p.log2()).sum();
    if sum == 0.0 {
        // single repeated symbol; avoid returning -0.0
        return Ok(0.0);
    }
    Ok(round_significant(-sum, ENTROPY_DIGITS))
}

/// Entropy of every sequence in the set.
pub fn per_sequence_entropy(set: &SequenceSet) -> Result<EntropyResult> {
    set.sequences()
        .map(|seq| entropy(seq).map(|h| (seq.to_string(), h)))
        .collect()
}

/// Unweighted mean, minimum and maximum entropy across a set.
pub fn aggregate(set: &SequenceSet) -> Result<EntropySummary> {
    if set.is_empty() {
        return Err(AnalysisError::empty("entropy summary of an empty sequence set"));
    }
    summarize(&per_sequence_entropy(set)?)
}

/// Same as [`aggregate`] for entropies that were already computed.
pub fn summarize(result: &EntropyResult) -> Result<EntropySummary> {
    let values: Vec<f64> = result.values().copied().collect();
    let (average, min, max) = mean_min_max(&values)?;
    Ok(EntropySummary { average, min, max })
}

/// Entries strictly below the 25th or strictly above the 75th percentile.
pub fn outliers(result: &EntropyResult) -> Result<OutlierReport> {
    let values: Vec<f64> = result.values().copied().collect();
    let lower_quartile = percentile(&values, 25.0)?;
    let upper_quartile = percentile(&values, 75.0)?;
    log::info!(
        "Entropy quartiles: lower {}, upper {}",
        lower_quartile,
        upper_quartile
    );

    let outliers = result
        .iter()
        .filter(|(_, &v)| v > upper_quartile || v < lower_quartile)
        .map(|(s, &v)| (s.clone(), v))
        .collect();

    Ok(OutlierReport {
        lower_quartile,
        upper_quartile,
        outliers,
    })
}
