use crate::error::{AnalysisError, Result};
use crate::types::{KmerCounts, SequenceSet};

fn is_nucleotide(base: u8) -> bool {
    matches!(base, b'A' | b'C' | b'G' | b'T')
}

/// Counts every length-`k` window of every sequence in the set.
///
/// Bases are upper-cased first. Windows containing anything other than
/// `A`, `C`, `G` or `T` are skipped. K-mers appear in the order they are
/// first seen.
pub fn count_kmers(set: &SequenceSet, k: usize) -> Result<KmerCounts> {
    if k == 0 {
        return Err(AnalysisError::invalid("k-mer length must be at least 1"));
    }

    let mut counts = KmerCounts::new();
    for sequence in set.sequences() {
        let bases = sequence.to_ascii_uppercase().into_bytes();
        if bases.len() < k {
            continue;
        }

        // index of the most recent non-ACGT base, if any falls in the window
        let mut last_invalid: Option<usize> = None;
        for (i, &b) in bases.iter().enumerate() {
            if !is_nucleotide(b) {
                last_invalid = Some(i);
            }
            if i + 1 < k {
                continue;
            }
            let start = i + 1 - k;
            if last_invalid.is_some_and(|j| j >= start) {
                continue;
            }
            // window is pure ASCII ACGT
            let kmer = String::from_utf8_lossy(&bases[start..=i]).into_owned();
            *counts.entry(kmer).or_insert(0) += 1;
        }
    }

    log::debug!("Counted {} distinct {}-mers", counts.len(), k);
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_overlapping_windows() {
        let set: SequenceSet = ["AAAA", "acgt"].into_iter().collect();
        let counts = count_kmers(&set, 2).unwrap();
        assert_eq!(counts.get("AA"), Some(&3));
        assert_eq!(counts.get("AC"), Some(&1));
        assert_eq!(counts.get("CG"), Some(&1));
        assert_eq!(counts.get("GT"), Some(&1));
        assert_eq!(counts.keys().next().map(String::as_str), Some("AA"));
    }

    #[test]
    fn test_skips_ambiguous_windows() {
        let set: SequenceSet = ["ACNGT"].into_iter().collect();
        let counts = count_kmers(&set, 2).unwrap();
        assert_eq!(counts.len(), 2);
        assert!(counts.contains_key("AC"));
        assert!(counts.contains_key("GT"));
        assert!(count_kmers(&set, 3).unwrap().is_empty());
    }

    #[test]
    fn test_short_sequences_and_zero_k() {
        let set: SequenceSet = ["AC"].into_iter().collect();
        assert!(count_kmers(&set, 5).unwrap().is_empty());
        assert!(matches!(count_kmers(&set, 0), Err(AnalysisError::InvalidParameter(_))));
    }
}
