use seqcompare_tools::entropy;
use seqcompare_tools::export;
use seqcompare_tools::readers;
use seqcompare_tools::types::{InputSource, RecordKind, SequenceSet};
use std::fs;
use tempfile::TempDir;

// Three reads of one FASTQ file: two homopolymers and one evenly split read.
const READS: &str = "@r1\nAAAA\n+\nIIII\n@r2\nAATT\n+\nIIII\n@r3\nTTTT\n+\nIIII\n";

#[test]
fn entropy_of_fastq_reads() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("reads.fastq");
    fs::write(&path, READS).expect("write fixture");

    let source = InputSource::from_path(&path, None).expect("fastq extension is recognised");
    let set = readers::load_sequences(&source).expect("load reads");
    assert_eq!(set.len(), 3);

    let result = entropy::per_sequence_entropy(&set).expect("entropy");
    let values: Vec<_> = result.values().copied().collect();
    assert_eq!(values, vec![0.0, 1.0, 0.0]);

    let summary = entropy::aggregate(&set).expect("aggregate");
    assert!((summary.average - 0.333).abs() < 1e-3, "average {}", summary.average);
    assert_eq!(summary.min, 0.0);
    assert_eq!(summary.max, 1.0);
    assert!(summary.min <= summary.average && summary.average <= summary.max);

    let table = dir.path().join("out").join("entropy.csv");
    export::write_entropy(&table, &result).expect("write table");
    let written = fs::read_to_string(&table).expect("read table");
    assert_eq!(written, "Sequence,Entropy\nAAAA,0.0\nAATT,1.0\nTTTT,0.0\n");
}

#[test]
fn outliers_of_mixed_population() {
    let set: SequenceSet = [
        "AAAAAAAA", "AAAAAAAT", "AAAAAATT", "AAAATTTT", "ACGTACGT", "AAAAAAAC", "AAAAAACC",
    ]
    .into_iter()
    .collect();
    let result = entropy::per_sequence_entropy(&set).expect("entropy");
    let report = entropy::outliers(&result).expect("outliers");

    assert!(report.lower_quartile <= report.upper_quartile);
    assert!(report.outliers.contains_key("ACGTACGT"), "{:?}", report);
    assert!(report.outliers.contains_key("AAAAAAAA"));
    for (sequence, value) in &report.outliers {
        assert_eq!(result[sequence], *value);
        assert!(*value < report.lower_quartile || *value > report.upper_quartile);
    }
}

#[test]
fn missing_file_is_reported_with_its_path() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("absent.fa");
    let source = InputSource::Path {
        path: path.clone(),
        kind: RecordKind::Fasta,
    };
    let err = readers::load_sequences(&source).expect_err("missing file must fail");
    assert!(err.to_string().contains("absent.fa"), "{}", err);
}
