//! Sampling, rounding and hypothesis-testing helpers shared by the engines.

pub mod descriptive;
pub mod sampling;
pub mod significance;

pub use descriptive::{hamming_truncated, mean_min_max, percentile, round_decimals, round_significant};
pub use sampling::{sample_rows, sample_set, sample_size};
pub use significance::{
    independent_t_test, proportion_test, significant_only, SignificanceResult, Verdict,
    DEFAULT_SIGNIFICANCE_LEVEL,
};
