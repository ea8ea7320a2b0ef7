use crate::error::{AnalysisError, Result};

/// Rounds to `digits` significant digits, the way a general-format print would.
pub fn round_significant(value: f64, digits: usize) -> f64 {
    if !value.is_finite() || value == 0.0 {
        return value;
    }
    let precision = digits.max(1) - 1;
    format!("{:.*e}", precision, value)
        .parse()
        .unwrap_or(value)
}

/// Rounds to a fixed number of decimal places.
pub fn round_decimals(value: f64, decimals: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.*}", decimals, value).parse().unwrap_or(value)
}

/// Percentile with linear interpolation between closest ranks. `q` is in [0, 100].
pub fn percentile(values: &[f64], q: f64) -> Result<f64> {
    if values.is_empty() {
        return Err(AnalysisError::empty("percentile of an empty distribution"));
    }
    if !(0.0..=100.0).contains(&q) {
        return Err(AnalysisError::invalid(format!(
            "percentile must be within [0, 100], got {}",
            q
        )));
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let rank = q / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let weight = rank - lo as f64;

    Ok(sorted[lo] + (sorted[hi] - sorted[lo]) * weight)
}

/// Arithmetic mean, minimum and maximum.
pub fn mean_min_max(values: &[f64]) -> Result<(f64, f64, f64)> {
    if values.is_empty() {
        return Err(AnalysisError::empty("summary of an empty distribution"));
    }
    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        sum += v;
        min = min.min(v);
        max = max.max(v);
    }
    Ok((sum / values.len() as f64, min, max))
}

/// Sample mean and unbiased variance.
pub(crate) fn mean_variance(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / (n - 1.0);
    (mean, var)
}

/// Hamming distance over the common prefix of two sequences.
///
/// Comparison stops at the end of the shorter sequence; the unmatched tail of
/// the longer one does not count as mismatches.
pub fn hamming_truncated(a: &str, b: &str) -> u64 {
    let len = a.len().min(b.len());
    bio::alignment::distance::hamming(&a.as_bytes()[..len], &b.as_bytes()[..len])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_significant() {
        assert_eq!(round_significant(0.918295834, 5), 0.9183);
        assert_eq!(round_significant(1.0, 5), 1.0);
        assert_eq!(round_significant(0.000123456789, 6), 0.000123457);
        assert_eq!(round_significant(1.9999999, 5), 2.0);
        assert_eq!(round_significant(0.0, 6), 0.0);
    }

    #[test]
    fn test_round_decimals() {
        assert_eq!(round_decimals(1.0 / 3.0, 8), 0.33333333);
        assert_eq!(round_decimals(0.125, 8), 0.125);
    }

    #[test]
    fn test_percentile_linear() {
        let values = [0.0, 0.0, 0.0, 10.0];
        assert_eq!(percentile(&values, 25.0).unwrap(), 0.0);
        assert!((percentile(&values, 75.0).unwrap() - 2.5).abs() < 1e-12);

        let values = [4.0, 1.0, 3.0, 2.0];
        assert!((percentile(&values, 50.0).unwrap() - 2.5).abs() < 1e-12);
        assert_eq!(percentile(&values, 0.0).unwrap(), 1.0);
        assert_eq!(percentile(&values, 100.0).unwrap(), 4.0);
    }

    #[test]
    fn test_percentile_rejects_empty() {
        assert!(matches!(percentile(&[], 25.0), Err(AnalysisError::EmptyInput(_))));
    }

    #[test]
    fn test_hamming_truncates_to_shorter() {
        assert_eq!(hamming_truncated("AAAA", "AA"), 0);
        assert_eq!(hamming_truncated("ACGT", "ACGA"), 1);
        assert_eq!(hamming_truncated("TT", "AAAAAA"), 2);
        assert_eq!(hamming_truncated("", "ACGT"), 0);
    }
}
