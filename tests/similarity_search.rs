use seqcompare_tools::readers;
use seqcompare_tools::similarity::{self, MatchOptions, SamplingOptions};
use seqcompare_tools::types::{RecordKind, SequenceSet};
use seqcompare_tools::{AnalysisError, CancellationToken};
use std::fs;
use tempfile::TempDir;

#[test]
fn reads_match_their_closest_contigs() {
    let dir = TempDir::new().expect("temp dir");
    let reads = dir.path().join("reads.fq");
    let contigs = dir.path().join("contigs.fa");
    fs::write(
        &reads,
        "@r1\nACGTACGTAA\n+\nIIIIIIIIII\n@r2\nGGGGCCCCGG\n+\nIIIIIIIIII\n@r3\nTTTTTTTTTT\n+\nIIIIIIIIII\n",
    )
    .expect("write reads");
    fs::write(&contigs, ">c1\nACGTACGTAC\n>c2\nGGGGCCCCGA\n>c3\nACGTACGAAA\n").expect("write contigs");

    let (set_a, _) = readers::read_sequences(&reads, RecordKind::Fastq).expect("reads");
    let (set_b, _) = readers::read_sequences(&contigs, RecordKind::Fasta).expect("contigs");

    let options = MatchOptions {
        closest_matches: 2,
        ..MatchOptions::default()
    };
    let result = similarity::find_all_matches(&set_a, &set_b, &options, &SamplingOptions::disabled(), None, None)
        .expect("matches");
    let result = similarity::hamming_to_closest(result);

    let r1 = &result["ACGTACGTAA"];
    assert_eq!(r1.matches, vec!["ACGTACGTAC", "ACGTACGAAA"]);
    assert_eq!(r1.hamming, Some(1));

    let r2 = &result["GGGGCCCCGG"];
    assert_eq!(r2.matches, vec!["GGGGCCCCGA"]);
    assert_eq!(r2.hamming, Some(1));

    let r3 = &result["TTTTTTTTTT"];
    assert!(r3.matches.is_empty());
    assert_eq!(r3.hamming, None);
}

#[test]
fn sampling_both_sides_is_reproducible() {
    let set_a = (0..200).map(|i| format!("ACGT{:010b}", i)).collect::<Vec<_>>();
    let set_a: SequenceSet = set_a.iter().map(String::as_str).collect();
    let set_b = (0..300).map(|i| format!("ACGA{:010b}", i * 7)).collect::<Vec<_>>();
    let set_b: SequenceSet = set_b.iter().map(String::as_str).collect();

    let sampling = SamplingOptions {
        percentage: 0.05,
        sample_first: true,
        sample_second: true,
        seed: Some(2024),
    };
    let first = similarity::find_all_matches(&set_a, &set_b, &MatchOptions::default(), &sampling, None, None)
        .expect("first run");
    let second = similarity::find_all_matches(&set_a, &set_b, &MatchOptions::default(), &sampling, None, None)
        .expect("second run");

    assert_eq!(first.len(), 10);
    assert_eq!(first, second);
}

#[test]
fn oversampling_is_rejected() {
    let set: SequenceSet = ["ACGT", "TTTT"].into_iter().collect();
    let sampling = SamplingOptions {
        percentage: 1.5,
        ..SamplingOptions::default()
    };
    let err = similarity::find_all_matches(&set, &set, &MatchOptions::default(), &sampling, None, None)
        .expect_err("cannot sample more than the population");
    assert!(matches!(err, AnalysisError::Sampling { requested: 3, available: 2 }));
}

#[test]
fn cancelled_parallel_search_returns_nothing() {
    let set = (0..50).map(|i| format!("ACGT{:08b}", i)).collect::<Vec<_>>();
    let set: SequenceSet = set.iter().map(String::as_str).collect();
    let token = CancellationToken::new();
    token.cancel();

    let options = MatchOptions {
        threads: 4,
        ..MatchOptions::default()
    };
    let err = similarity::find_all_matches(&set, &set, &options, &SamplingOptions::disabled(), None, Some(&token))
        .expect_err("cancelled");
    assert!(matches!(err, AnalysisError::Cancelled));
}
