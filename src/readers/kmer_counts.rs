use super::{open, LoadStats};
use crate::error::{AnalysisError, Result};
use crate::kmer::{ComparisonTable, KmerComparisonRow};
use crate::types::KmerCounts;
use bio::io::fasta;
use serde::Deserialize;
use std::path::Path;

/// Reads `jellyfish dump` output: FASTA records whose id is the count and
/// whose sequence is the k-mer. Repeated k-mers are summed.
pub fn read_jellyfish_dump(path: &Path) -> Result<(KmerCounts, LoadStats)> {
    let reader = fasta::Reader::from_bufread(open(path)?);
    let mut counts = KmerCounts::new();
    let mut stats = LoadStats::default();

    for record in reader.records() {
        let record = record
            .map_err(|e| AnalysisError::malformed(path.display().to_string(), e.to_string()))?;
        let kmer = String::from_utf8_lossy(record.seq()).into_owned();
        match record.id().parse::<u64>() {
            Ok(count) if !kmer.is_empty() => {
                *counts.entry(kmer).or_insert(0) += count;
                stats.processed += 1;
            }
            _ => {
                log::warn!(
                    "{}: '>{}' is not a count header for k-mer '{}'; skipping",
                    path.display(),
                    record.id(),
                    kmer
                );
                stats.skipped += 1;
            }
        }
    }

    Ok((counts, stats))
}

#[derive(Debug, Deserialize)]
struct CountRow {
    kmer: String,
    count: u64,
}

fn skip_or_fail(path: &Path, e: csv::Error, stats: &mut LoadStats) -> Result<()> {
    if e.is_io_error() {
        return Err(e.into());
    }
    log::warn!("{}: skipping row: {}", path.display(), e);
    stats.skipped += 1;
    Ok(())
}

/// Reads a two-column `kmer,count` CSV with a header row.
pub fn read_kmer_csv(path: &Path) -> Result<(KmerCounts, LoadStats)> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(open(path)?);
    let mut counts = KmerCounts::new();
    let mut stats = LoadStats::default();

    // columns are matched by position so any header names work
    for row in reader.records() {
        let parsed = row.and_then(|r| r.deserialize::<CountRow>(None));
        match parsed {
            Ok(row) => {
                *counts.entry(row.kmer).or_insert(0) += row.count;
                stats.processed += 1;
            }
            Err(e) => skip_or_fail(path, e, &mut stats)?,
        }
    }

    Ok((counts, stats))
}

/// Reads a seven-column comparison table as written by
/// [`write_comparison_table`](crate::export::write_comparison_table).
pub fn read_comparison_table(path: &Path) -> Result<(ComparisonTable, LoadStats)> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(open(path)?);
    let mut table = ComparisonTable::new();
    let mut stats = LoadStats::default();

    for row in reader.records() {
        let parsed = row.and_then(|r| r.deserialize::<KmerComparisonRow>(None));
        match parsed {
            Ok(row) => {
                table.push(row);
                stats.processed += 1;
            }
            Err(e) => skip_or_fail(path, e, &mut stats)?,
        }
    }

    Ok((table, stats))
}
