use super::{file_stem, load_input};
use crate::config::AnalysisConfig;
use crate::entropy;
use crate::export::formats::entropy::EntropyExport;
use crate::export::{self, AnalysisData, AnalysisExport};
use crate::types::RecordKind;
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

/// Entropy tables, outliers and a JSON summary for each file.
///
/// A file that fails is reported and the remaining files are still processed;
/// the command only fails when no file succeeded.
pub fn run(files: Vec<PathBuf>, format: Option<RecordKind>, config: &AnalysisConfig) -> Result<()> {
    let mut failures = 0;
    for file in &files {
        if let Err(e) = process_file(file, format, config) {
            log::error!("{}: {:#}", file.display(), e);
            failures += 1;
        }
    }

    if failures == files.len() {
        bail!("Entropy failed for every input file");
    }
    if failures > 0 {
        log::warn!("{} of {} files failed", failures, files.len());
    }
    Ok(())
}

fn process_file(path: &Path, format: Option<RecordKind>, config: &AnalysisConfig) -> Result<()> {
    let set = load_input(path, format)?;
    let result = entropy::per_sequence_entropy(&set)?;
    let summary = entropy::summarize(&result).context("No sequences to summarise")?;
    let report = entropy::outliers(&result)?;

    let base = format!("{}_{}", config.output.entropy, file_stem(path));
    let table_path = config.artifact(&base, "csv");
    let outlier_path = config.artifact(&format!("{}_outliers", base), "csv");
    let summary_path = config.artifact(&base, "json");

    export::write_entropy(&table_path, &result)?;
    export::write_entropy(&outlier_path, &report.outliers)?;
    AnalysisExport::new(AnalysisData::Entropy(EntropyExport::new(
        path.display().to_string(),
        set.len(),
        &summary,
        &report,
    )))
    .write(&summary_path)?;

    println!("{}", path.display());
    println!("  Sequences:       {}", set.len());
    println!("  Average entropy: {:.5}", summary.average);
    println!("  Min / max:       {} / {}", summary.min, summary.max);
    println!(
        "  Outliers:        {} outside [{}, {}]",
        report.outliers.len(),
        report.lower_quartile,
        report.upper_quartile
    );
    println!("  Written to:      {}", table_path.display());
    Ok(())
}
