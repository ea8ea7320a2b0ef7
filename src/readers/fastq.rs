use super::fasta::record_name;
use super::{open, LoadStats};
use crate::error::{AnalysisError, Result};
use crate::types::SequenceSet;
use bio::io::fastq;
use std::path::Path;

/// Loads a (possibly compressed) FASTQ file.
///
/// Metadata is `[header, sequence, plus-line, quality]`. Records failing
/// validation (quality length differing from sequence length) are skipped.
pub fn read_fastq(path: &Path) -> Result<(SequenceSet, LoadStats)> {
    let reader = fastq::Reader::from_bufread(open(path)?);
    let mut set = SequenceSet::new();
    let mut stats = LoadStats::default();

    for record in reader.records() {
        let record = record
            .map_err(|e| AnalysisError::malformed(path.display().to_string(), e.to_string()))?;
        if let Err(e) = record.check() {
            log::warn!("{}: skipping read {}: {}", path.display(), record.id(), e);
            stats.skipped += 1;
            continue;
        }

        let sequence = String::from_utf8_lossy(record.seq()).into_owned();
        let header = match record.desc() {
            Some(desc) => format!("@{} {}", record.id(), desc),
            None => format!("@{}", record.id()),
        };
        let quality = String::from_utf8_lossy(record.qual()).into_owned();
        set.insert(sequence.clone(), vec![header, sequence, "+".to_string(), quality]);
        stats.processed += 1;
    }

    Ok((set, stats))
}

/// Writes a set loaded from FASTQ back out as FASTQ, restoring each read's
/// header and quality string from its metadata.
pub fn write_fastq(set: &SequenceSet, path: &Path) -> Result<()> {
    let mut writer = fastq::Writer::to_file(path)?;
    for (i, (sequence, metadata)) in set.iter().enumerate() {
        let quality = metadata
            .get(3)
            .filter(|q| q.len() == sequence.len())
            .ok_or_else(|| {
                AnalysisError::malformed(
                    path.display().to_string(),
                    format!("read {} has no quality string of matching length", sequence),
                )
            })?;
        let (id, desc) = record_name(metadata, i);
        writer.write(&id, desc.as_deref(), sequence.as_bytes(), quality.as_bytes())?;
    }
    writer.flush()?;
    Ok(())
}
