use super::{open, LoadStats};
use crate::error::Result;
use crate::types::SequenceSet;
use std::path::Path;

/// Column layout of a tab-delimited alignment file.
struct Layout {
    sequence_column: usize,
    metadata_columns: &'static [usize],
    min_columns: usize,
    comment: Option<u8>,
}

const SAM: Layout = Layout {
    sequence_column: 9,
    metadata_columns: &[0, 1, 2, 3, 4, 5, 6, 7, 8, 10],
    min_columns: 11,
    comment: Some(b'@'),
};

// bowtie's default output
const MAP: Layout = Layout {
    sequence_column: 4,
    metadata_columns: &[0, 1, 2, 3, 5],
    min_columns: 6,
    comment: None,
};

fn read_delimited(path: &Path, layout: &Layout) -> Result<(SequenceSet, LoadStats)> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .comment(layout.comment)
        .from_reader(open(path)?);
    let mut set = SequenceSet::new();
    let mut stats = LoadStats::default();

    for row in reader.records() {
        let record = match row {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                log::warn!("{}: skipping row: {}", path.display(), e);
                stats.skipped += 1;
                continue;
            }
        };

        if record.len() < layout.min_columns {
            log::warn!(
                "{}:{}: expected at least {} columns, found {}; skipping",
                path.display(),
                record.position().map(|p| p.line()).unwrap_or_default(),
                layout.min_columns,
                record.len()
            );
            stats.skipped += 1;
            continue;
        }

        let metadata = layout
            .metadata_columns
            .iter()
            .map(|&i| record[i].to_string())
            .collect();
        set.insert(&record[layout.sequence_column], metadata);
        stats.processed += 1;
    }

    Ok((set, stats))
}

/// Loads SAM alignments keyed by SEQ; `@` header lines are ignored.
pub fn read_sam(path: &Path) -> Result<(SequenceSet, LoadStats)> {
    read_delimited(path, &SAM)
}

/// Loads bowtie `.map` alignments keyed by the read sequence.
pub fn read_map(path: &Path) -> Result<(SequenceSet, LoadStats)> {
    read_delimited(path, &MAP)
}
