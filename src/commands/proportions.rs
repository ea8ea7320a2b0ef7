use crate::config::AnalysisConfig;
use crate::export::formats::significance::SignificanceExport;
use crate::export::{self, AnalysisData, AnalysisExport};
use crate::kmer::{test_all_proportions, KmerComparisonRow};
use crate::readers;
use anyhow::{Context, Result};
use std::path::Path;

pub fn run(table_path: &Path, config: &AnalysisConfig) -> Result<()> {
    let (table, stats) = readers::read_comparison_table(table_path)
        .with_context(|| format!("Failed to read {}", table_path.display()))?;
    log::info!("{}: {}", table_path.display(), stats);
    report_significance(&table, &table_path.display().to_string(), config)
}

/// Tests every row and writes the full verdict table, the significant
/// k-mers and a JSON summary.
pub(crate) fn report_significance(table: &[KmerComparisonRow], input: &str, config: &AnalysisConfig) -> Result<()> {
    let options = config.proportion_test_options();
    let results = test_all_proportions(table, &options).context("Proportion tests failed")?;

    let name = &config.output.significance;
    let all_path = config.artifact(name, "csv");
    let significant_path = config.artifact(&format!("{}_significant", name), "csv");
    export::write_significance(&all_path, &results)?;
    export::write_significant_kmers(&significant_path, &results)?;

    let summary = SignificanceExport::new(input, options.level, table.len(), &results);
    println!(
        "{} of {} tested k-mers differ significantly at level {}",
        summary.significant.len(),
        summary.kmers_tested,
        options.level
    );
    AnalysisExport::new(AnalysisData::Significance(summary)).write(&config.artifact(name, "json"))?;
    println!("Written to {}", all_path.display());
    Ok(())
}
