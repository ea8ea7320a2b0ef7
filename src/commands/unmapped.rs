use super::load_input;
use crate::config::AnalysisConfig;
use crate::readers::{write_fasta, write_fastq};
use crate::types::RecordKind;
use anyhow::Result;
use std::path::Path;

/// Writes the reads of `reads` whose sequence never appears in `mapped`.
///
/// FASTQ input is written back as FASTQ with its quality strings; every other
/// input becomes FASTA.
pub fn run(reads: &Path, mapped: &Path, config: &AnalysisConfig) -> Result<()> {
    let all = load_input(reads, None)?;
    let aligned = load_input(mapped, None)?;
    let unmapped = all.difference(&aligned);

    let as_fastq = RecordKind::from_path(reads) == Some(RecordKind::Fastq);
    let output = config.artifact(&config.output.unmapped, if as_fastq { "fq" } else { "fa" });
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    if as_fastq {
        write_fastq(&unmapped, &output)?;
    } else {
        write_fasta(&unmapped, &output)?;
    }

    println!(
        "{} of {} reads unmapped, written to {}",
        unmapped.len(),
        all.len(),
        output.display()
    );
    Ok(())
}
