use super::proportions::report_significance;
use crate::config::AnalysisConfig;
use crate::export;
use crate::kmer::combined_comparison;
use crate::readers;
use anyhow::{Context, Result};
use std::path::Path;

pub fn run(first: &Path, second: &Path, config: &AnalysisConfig) -> Result<()> {
    let counts_a = readers::load_kmer_counts(first)
        .with_context(|| format!("Failed to read k-mer counts from {}", first.display()))?;
    let counts_b = readers::load_kmer_counts(second)
        .with_context(|| format!("Failed to read k-mer counts from {}", second.display()))?;

    let table = combined_comparison(&counts_a, &counts_b)?;
    let table_path = config.artifact(&config.output.kmers, "csv");
    export::write_comparison_table(&table_path, &table)?;
    println!("{} shared k-mers written to {}", table.len(), table_path.display());

    if table.is_empty() {
        log::warn!("No k-mers shared between the two sets; skipping proportion tests");
        return Ok(());
    }
    report_significance(&table, &format!("{} vs {}", first.display(), second.display()), config)
}
