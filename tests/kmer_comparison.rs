use seqcompare_tools::export;
use seqcompare_tools::kmer::{self, ProportionTestOptions};
use seqcompare_tools::readers;
use seqcompare_tools::statistics::Verdict;
use seqcompare_tools::types::SequenceSet;
use std::fs;
use tempfile::TempDir;

#[test]
fn jellyfish_dumps_compare_on_shared_kmers() {
    let dir = TempDir::new().expect("temp dir");
    let first = dir.path().join("first.fa");
    let second = dir.path().join("second.fa");
    fs::write(&first, ">5\nAAA\n>3\nCCC\n").expect("write first");
    fs::write(&second, ">2\nAAA\n>1\nGGG\n").expect("write second");

    let counts_a = readers::load_kmer_counts(&first).expect("first counts");
    let counts_b = readers::load_kmer_counts(&second).expect("second counts");
    let table = kmer::combined_comparison(&counts_a, &counts_b).expect("comparison");

    assert_eq!(table.len(), 1);
    assert_eq!(table[0].kmer, "AAA");
    assert_eq!(table[0].raw_difference, 3);

    // the written table reads back unchanged
    let path = dir.path().join("comparison.csv");
    export::write_comparison_table(&path, &table).expect("write table");
    let header = fs::read_to_string(&path).expect("read table");
    assert!(header.starts_with(
        "Kmer,Count A,Count B,Raw Difference,Normalised A,Normalised B,Normalised Difference\n"
    ));
    let (reread, stats) = readers::read_comparison_table(&path).expect("reread");
    assert_eq!(stats.skipped, 0);
    assert_eq!(reread, table);
}

#[test]
fn counted_reads_feed_the_proportion_tests() {
    let set_a: SequenceSet = ["ACGTACGTAC", "AAAAAAAAAA"].into_iter().collect();
    let set_b: SequenceSet = ["ACGTACGTAC", "CCCCCCCCCC"].into_iter().collect();
    let counts_a = kmer::count_kmers(&set_a, 3).expect("count a");
    let counts_b = kmer::count_kmers(&set_b, 3).expect("count b");

    let table = kmer::combined_comparison(&counts_a, &counts_b).expect("comparison");
    let shared: Vec<_> = table.iter().map(|r| r.kmer.as_str()).collect();
    assert_eq!(shared, vec!["ACG", "CGT", "GTA", "TAC"]);

    let results = kmer::test_all_proportions(&table, &ProportionTestOptions::default()).expect("tests");
    assert_eq!(results.len(), table.len());
    for (_, r) in &results {
        assert_eq!(r.verdict, Verdict::NotSignificant);
    }
}

#[test]
fn malformed_table_rows_are_skipped() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("table.csv");
    fs::write(
        &path,
        "Kmer,Count A,Count B,Raw Difference,Normalised A,Normalised B,Normalised Difference\n\
         AAA,80,20,60,0.8,0.2,0.6\n\
         CCC,x,20,0,0,0,0\n\
         GGG,20,80\n\
         TTT,20,80,60,0.2,0.8,0.6\n",
    )
    .expect("write table");

    let (table, stats) = readers::read_comparison_table(&path).expect("read table");
    assert_eq!(stats.processed, 2);
    assert_eq!(stats.skipped, 2);

    let results = kmer::test_all_proportions(&table, &ProportionTestOptions::default()).expect("tests");
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|(_, r)| r.is_significant()));
}
