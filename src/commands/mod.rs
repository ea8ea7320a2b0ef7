pub mod compare_kmers;
pub mod count_kmers;
pub mod entropy;
pub mod init_config;
pub mod proportions;
pub mod similarity;
pub mod unmapped;

use crate::readers;
use crate::types::{InputSource, RecordKind, SequenceSet};
use crate::utils::progress_bar_builder::ProgressBarBuilder;
use anyhow::{anyhow, Context, Result};
use std::path::Path;

/// Loads a sequence file behind a spinner, inferring its format unless given.
pub(crate) fn load_input(path: &Path, format: Option<RecordKind>) -> Result<SequenceSet> {
    let source = InputSource::from_path(path, format).ok_or_else(|| {
        anyhow!(
            "Cannot tell the format of {}; pass --format fasta|fastq|sam|map",
            path.display()
        )
    })?;

    let progress = ProgressBarBuilder::new(format!("Loading {}", path.display()))
        .with_tick()
        .build()?;
    let set = readers::load_sequences(&source)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    progress.finish_with_message(format!("Loaded {} sequences from {}", set.len(), path.display()));

    Ok(set)
}

/// File name without directories or extensions, for naming per-input artifacts.
pub(crate) fn file_stem(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.split('.').next())
        .filter(|n| !n.is_empty())
        .unwrap_or("input")
        .to_string()
}
