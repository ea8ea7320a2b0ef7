#[allow(clippy::module_inception)]
pub mod config;

pub use config::{AnalysisConfig, OutputConfig, SamplingConfig, SignificanceConfig, SimilarityConfig};
