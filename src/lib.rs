pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod entropy;
pub mod error;
pub mod export;
pub mod kmer;
pub mod readers;
pub mod similarity;
pub mod statistics;
pub mod types;
pub(crate) mod utils;

// Re-export main API
pub use api::*;
pub use error::{AnalysisError, Result};
pub use types::{InputSource, KmerCounts, RecordKind, SequenceSet};
