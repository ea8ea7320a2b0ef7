use super::{open, LoadStats};
use crate::error::{AnalysisError, Result};
use crate::types::SequenceSet;
use bio::io::fasta;
use std::path::Path;

fn header(record: &fasta::Record) -> String {
    match record.desc() {
        Some(desc) => format!("{} {}", record.id(), desc),
        None => record.id().to_string(),
    }
}

/// Loads a (possibly compressed) FASTA file; metadata is `[header]`.
///
/// Records with an empty sequence are skipped. A framing error aborts the
/// file, since every record after it would be misread.
pub fn read_fasta(path: &Path) -> Result<(SequenceSet, LoadStats)> {
    let reader = fasta::Reader::from_bufread(open(path)?);
    let mut set = SequenceSet::new();
    let mut stats = LoadStats::default();

    for record in reader.records() {
        let record = record
            .map_err(|e| AnalysisError::malformed(path.display().to_string(), e.to_string()))?;
        if record.seq().is_empty() {
            log::warn!("{}: record {} has no sequence, skipping", path.display(), record.id());
            stats.skipped += 1;
            continue;
        }
        let sequence = String::from_utf8_lossy(record.seq()).into_owned();
        set.insert(sequence, vec![header(&record)]);
        stats.processed += 1;
    }

    Ok((set, stats))
}

/// Record id and description for writing, taken from the first metadata field
/// with any `>`/`@` marker removed; `seq<N>` when there is none.
pub(super) fn record_name(metadata: &[String], index: usize) -> (String, Option<String>) {
    let name = metadata
        .first()
        .map(|h| h.trim_start_matches(&['>', '@'][..]))
        .filter(|h| !h.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("seq{}", index + 1));
    match name.split_once(' ') {
        Some((id, desc)) => (id.to_string(), Some(desc.to_string())),
        None => (name, None),
    }
}

/// Writes a set as FASTA, naming records after their first metadata field
/// when there is one.
pub fn write_fasta(set: &SequenceSet, path: &Path) -> Result<()> {
    let mut writer = fasta::Writer::to_file(path)?;
    for (i, (sequence, metadata)) in set.iter().enumerate() {
        let (id, desc) = record_name(metadata, i);
        writer.write(&id, desc.as_deref(), sequence.as_bytes())?;
    }
    writer.flush()?;
    Ok(())
}
