//! Loaders turning on-disk sequence and k-mer files into in-memory sets.
//!
//! All inputs may be gzip, bzip2, xz or zstd compressed. A missing file is
//! reported as [`AnalysisError::MissingInput`]; malformed rows of line-based
//! formats are skipped with a warning and counted in [`LoadStats`].

pub mod fasta;
pub mod fastq;
pub mod kmer_counts;
pub mod stats;
pub mod tabular;

pub use fasta::{read_fasta, write_fasta};
pub use fastq::{read_fastq, write_fastq};
pub use kmer_counts::{read_comparison_table, read_jellyfish_dump, read_kmer_csv};
pub use stats::LoadStats;
pub use tabular::{read_map, read_sam};

use crate::error::{AnalysisError, Result};
use crate::types::{InputSource, KmerCounts, RecordKind, SequenceSet};
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

const READ_BUFFER: usize = 1024 * 1024;

/// Opens a file through niffler so compressed inputs read transparently.
pub(crate) fn open(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => AnalysisError::MissingInput {
            path: path.to_path_buf(),
        },
        _ => AnalysisError::Io(e),
    })?;
    let (inner, _format) = niffler::get_reader(Box::new(file))
        .map_err(|e| AnalysisError::malformed(path.display().to_string(), e.to_string()))?;
    Ok(Box::new(BufReader::with_capacity(READ_BUFFER, inner)))
}

/// Reads a sequence file of the given kind.
pub fn read_sequences(path: &Path, kind: RecordKind) -> Result<(SequenceSet, LoadStats)> {
    match kind {
        RecordKind::Fasta => read_fasta(path),
        RecordKind::Fastq => read_fastq(path),
        RecordKind::Sam => read_sam(path),
        RecordKind::Map => read_map(path),
    }
}

/// Resolves an input source into a sequence set.
pub fn load_sequences(source: &InputSource) -> Result<SequenceSet> {
    match source {
        InputSource::InMemory(set) => Ok(set.clone()),
        InputSource::Path { path, kind } => {
            let (set, stats) = read_sequences(path, *kind)?;
            log::info!("{}: {}", path.display(), stats);
            Ok(set)
        }
    }
}

/// Loads k-mer counts from a `.csv` table or, otherwise, a jellyfish dump.
pub fn load_kmer_counts(path: &Path) -> Result<KmerCounts> {
    let is_csv = path
        .to_str()
        .map(|p| {
            let p = p.to_ascii_lowercase();
            p.ends_with(".csv") || p.ends_with(".csv.gz")
        })
        .unwrap_or(false);
    let (counts, stats) = if is_csv {
        read_kmer_csv(path)?
    } else {
        read_jellyfish_dump(path)?
    };
    log::info!("{}: {}", path.display(), stats);
    Ok(counts)
}
