use crate::entropy::EntropyResult;
use crate::error::Result;
use crate::kmer::KmerComparisonRow;
use crate::similarity::MatchResult;
use crate::statistics::SignificanceResult;
use crate::types::KmerCounts;
use std::path::Path;

const COMPARISON_HEADER: [&str; 7] = [
    "Kmer",
    "Count A",
    "Count B",
    "Raw Difference",
    "Normalised A",
    "Normalised B",
    "Normalised Difference",
];

// callers write their own header row
fn writer(path: &Path) -> Result<csv::Writer<std::fs::File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(csv::WriterBuilder::new().has_headers(false).from_path(path)?)
}

/// Formats a float so whole values keep their decimal point (`1.0`, not `1`).
fn float_cell(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// `Sequence,Entropy`, one row per sequence. Also used for outlier tables.
pub fn write_entropy(path: &Path, result: &EntropyResult) -> Result<()> {
    let mut wtr = writer(path)?;
    wtr.write_record(["Sequence", "Entropy"])?;
    for (sequence, value) in result {
        wtr.write_record(&[sequence.clone(), float_cell(*value)])?;
    }
    wtr.flush()?;
    Ok(())
}

/// `Sequence,Match 1..n,Hamming Distance Of Closest`. Queries with fewer than
/// `n` matches leave the remaining cells empty.
pub fn write_matches(path: &Path, result: &MatchResult, n: usize) -> Result<()> {
    let mut wtr = writer(path)?;
    let mut header = vec!["Sequence".to_string()];
    header.extend((1..=n).map(|i| format!("Match {}", i)));
    header.push("Hamming Distance Of Closest".to_string());
    wtr.write_record(&header)?;

    for (sequence, entry) in result {
        let mut row = Vec::with_capacity(n + 2);
        row.push(sequence.clone());
        row.extend((0..n).map(|i| entry.matches.get(i).cloned().unwrap_or_default()));
        row.push(entry.hamming.map(|d| d.to_string()).unwrap_or_default());
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_kmer_counts(path: &Path, counts: &KmerCounts) -> Result<()> {
    let mut wtr = writer(path)?;
    wtr.write_record(["Kmer", "Count"])?;
    for (kmer, count) in counts {
        wtr.write_record(&[kmer.clone(), count.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}

/// The seven-column comparison table. The header is written even when the
/// table is empty.
pub fn write_comparison_table(path: &Path, table: &[KmerComparisonRow]) -> Result<()> {
    let mut wtr = writer(path)?;
    wtr.write_record(COMPARISON_HEADER)?;
    for row in table {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// `Kmer,Verdict,P-Value` for every tested k-mer.
pub fn write_significance(path: &Path, results: &[(String, SignificanceResult)]) -> Result<()> {
    let mut wtr = writer(path)?;
    wtr.write_record(["Kmer", "Verdict", "P-Value"])?;
    for (kmer, r) in results {
        wtr.write_record(&[kmer.clone(), r.verdict.to_string(), float_cell(r.p_value)])?;
    }
    wtr.flush()?;
    Ok(())
}

/// `Kmer,P-Value` for the significant k-mers only.
pub fn write_significant_kmers(path: &Path, results: &[(String, SignificanceResult)]) -> Result<()> {
    let mut wtr = writer(path)?;
    wtr.write_record(["Kmer", "P-Value"])?;
    for (kmer, r) in results.iter().filter(|(_, r)| r.is_significant()) {
        wtr.write_record(&[kmer.clone(), float_cell(r.p_value)])?;
    }
    wtr.flush()?;
    Ok(())
}
