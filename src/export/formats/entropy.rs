use crate::entropy::{EntropySummary, OutlierReport};
use serde::{Deserialize, Serialize};

/// Summary of one entropy run over a sequence file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntropyExport {
    pub input: String,
    pub sequences: usize,
    pub average: f64,
    pub min: f64,
    pub max: f64,
    pub lower_quartile: f64,
    pub upper_quartile: f64,
    pub outlier_count: usize,
}

impl EntropyExport {
    pub fn new(input: impl Into<String>, sequences: usize, summary: &EntropySummary, report: &OutlierReport) -> Self {
        Self {
            input: input.into(),
            sequences,
            average: summary.average,
            min: summary.min,
            max: summary.max,
            lower_quartile: report.lower_quartile,
            upper_quartile: report.upper_quartile,
            outlier_count: report.outliers.len(),
        }
    }
}
