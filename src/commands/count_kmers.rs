use super::{file_stem, load_input};
use crate::config::AnalysisConfig;
use crate::export;
use crate::kmer::{count_kmers, total_kmer_count};
use crate::types::RecordKind;
use anyhow::Result;
use std::path::Path;

/// Writes `kmer,count` for every k-mer of the file, readable by `compare-kmers`.
pub fn run(file: &Path, k: usize, format: Option<RecordKind>, config: &AnalysisConfig) -> Result<()> {
    let set = load_input(file, format)?;
    let counts = count_kmers(&set, k)?;

    let output = config.artifact(&format!("{}_k{}_counts", file_stem(file), k), "csv");
    export::write_kmer_counts(&output, &counts)?;

    println!(
        "{} distinct {}-mers ({} total) written to {}",
        counts.len(),
        k,
        total_kmer_count(&counts),
        output.display()
    );
    Ok(())
}
