use crate::statistics::{significant_only, SignificanceResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignificanceExport {
    pub input: String,
    pub level: f64,
    pub kmers_in_table: usize,
    pub kmers_tested: usize,
    pub significant: Vec<SignificantKmer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignificantKmer {
    pub kmer: String,
    pub p_value: f64,
}

impl SignificanceExport {
    pub fn new(input: impl Into<String>, level: f64, kmers_in_table: usize, results: &[(String, SignificanceResult)]) -> Self {
        Self {
            input: input.into(),
            level,
            kmers_in_table,
            kmers_tested: results.len(),
            significant: significant_only(results)
                .into_iter()
                .map(|(kmer, r)| SignificantKmer {
                    kmer,
                    p_value: r.p_value,
                })
                .collect(),
        }
    }
}
