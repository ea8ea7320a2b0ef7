use super::descriptive::{mean_variance, round_significant};
use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};
use statrs::function::erf::erfc;
use std::fmt;

pub const DEFAULT_SIGNIFICANCE_LEVEL: f64 = 0.05;
const P_VALUE_DIGITS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "significant")]
    Significant,
    #[serde(rename = "not significant")]
    NotSignificant,
}

impl Verdict {
    fn from_p_value(p_value: f64, level: f64) -> Self {
        if p_value <= level {
            Verdict::Significant
        } else {
            Verdict::NotSignificant
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Significant => write!(f, "significant"),
            Verdict::NotSignificant => write!(f, "not significant"),
        }
    }
}

/// Outcome of a hypothesis test. The verdict is taken on the exact p-value;
/// the reported p-value carries six significant digits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignificanceResult {
    pub verdict: Verdict,
    pub p_value: f64,
}

impl SignificanceResult {
    fn new(p_value: f64, level: f64) -> Self {
        Self {
            verdict: Verdict::from_p_value(p_value, level),
            p_value: round_significant(p_value, P_VALUE_DIGITS),
        }
    }

    pub fn is_significant(&self) -> bool {
        self.verdict == Verdict::Significant
    }
}

pub(crate) fn check_level(level: f64) -> Result<()> {
    if level > 0.0 && level < 1.0 {
        Ok(())
    } else {
        Err(AnalysisError::invalid(format!(
            "significance level must be within (0, 1), got {}",
            level
        )))
    }
}

/// Two-sided standard normal tail probability.
fn normal_two_sided(z: f64) -> f64 {
    erfc(z.abs() / std::f64::consts::SQRT_2)
}

/// Two-sample z-test for equal proportions using the pooled estimate.
///
/// Null hypothesis: `occurrences[0] / totals[0] == occurrences[1] / totals[1]`.
/// When the pooled proportion is 0 or 1 both samples agree exactly and the
/// p-value is 1.
pub fn proportion_test(occurrences: [u64; 2], totals: [u64; 2], level: f64) -> Result<SignificanceResult> {
    check_level(level)?;
    if totals.iter().any(|&t| t == 0) {
        return Err(AnalysisError::empty("proportion test with a zero total"));
    }
    if occurrences[0] > totals[0] || occurrences[1] > totals[1] {
        return Err(AnalysisError::invalid(format!(
            "occurrences {:?} exceed totals {:?}",
            occurrences, totals
        )));
    }

    let (c1, c2) = (occurrences[0] as f64, occurrences[1] as f64);
    let (n1, n2) = (totals[0] as f64, totals[1] as f64);

    let diff = c1 / n1 - c2 / n2;
    let pooled = (c1 + c2) / (n1 + n2);
    let variance = pooled * (1.0 - pooled) * (1.0 / n1 + 1.0 / n2);

    let p_value = if variance > 0.0 {
        normal_two_sided(diff / variance.sqrt())
    } else {
        1.0
    };

    Ok(SignificanceResult::new(p_value, level))
}

/// Two-sample Student's t-test with pooled variance.
pub fn independent_t_test(first: &[f64], second: &[f64], level: f64) -> Result<SignificanceResult> {
    check_level(level)?;
    if first.len() < 2 || second.len() < 2 {
        return Err(AnalysisError::empty("t-test needs at least two values per sample"));
    }

    let (n1, n2) = (first.len() as f64, second.len() as f64);
    let (m1, v1) = mean_variance(first);
    let (m2, v2) = mean_variance(second);
    let df = n1 + n2 - 2.0;
    let pooled = ((n1 - 1.0) * v1 + (n2 - 1.0) * v2) / df;
    let se = (pooled * (1.0 / n1 + 1.0 / n2)).sqrt();

    let p_value = if se > 0.0 {
        let t = (m1 - m2) / se;
        let dist = StudentsT::new(0.0, 1.0, df)
            .map_err(|e| AnalysisError::invalid(format!("t distribution: {}", e)))?;
        2.0 * dist.cdf(-t.abs())
    } else if m1 == m2 {
        1.0
    } else {
        0.0
    };

    Ok(SignificanceResult::new(p_value, level))
}

/// Keeps only the entries whose verdict is significant.
pub fn significant_only<'a, K, I>(results: I) -> Vec<(K, SignificanceResult)>
where
    I: IntoIterator<Item = &'a (K, SignificanceResult)>,
    K: Clone + 'a,
{
    results
        .into_iter()
        .filter(|(_, r)| r.is_significant())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_proportions_not_significant() {
        let r = proportion_test([50, 50], [100, 100], DEFAULT_SIGNIFICANCE_LEVEL).unwrap();
        assert_eq!(r.verdict, Verdict::NotSignificant);
        assert!((r.p_value - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_clear_difference_is_significant() {
        // p1 = 0.8, p2 = 0.2 over 100 each: z ~ 8.49
        let r = proportion_test([80, 20], [100, 100], DEFAULT_SIGNIFICANCE_LEVEL).unwrap();
        assert!(r.is_significant());
        assert!(r.p_value < 1e-10);
    }

    #[test]
    fn test_known_z_value() {
        // pooled 0.5, se = sqrt(0.25 * 0.02) = 0.0707107, z = 0.1 / 0.0707107 = 1.41421
        // two-sided p = erfc(1) = 0.157299
        let r = proportion_test([55, 45], [100, 100], DEFAULT_SIGNIFICANCE_LEVEL).unwrap();
        assert!((r.p_value - 0.157299).abs() < 1e-6);
        assert_eq!(r.verdict, Verdict::NotSignificant);
    }

    #[test]
    fn test_verdict_uses_unrounded_p_value() {
        // exact p = erfc(1) = 0.1572992..., reported as 0.157299
        let r = proportion_test([55, 45], [100, 100], 0.157299).unwrap();
        assert_eq!(r.p_value, 0.157299);
        assert_eq!(r.verdict, Verdict::NotSignificant);

        let r = proportion_test([55, 45], [100, 100], 0.1573).unwrap();
        assert_eq!(r.verdict, Verdict::Significant);
    }

    #[test]
    fn test_degenerate_pooled_proportion() {
        let r = proportion_test([0, 0], [10, 30], DEFAULT_SIGNIFICANCE_LEVEL).unwrap();
        assert_eq!(r.p_value, 1.0);
        let r = proportion_test([10, 30], [10, 30], DEFAULT_SIGNIFICANCE_LEVEL).unwrap();
        assert_eq!(r.verdict, Verdict::NotSignificant);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            proportion_test([1, 1], [0, 10], 0.05),
            Err(AnalysisError::EmptyInput(_))
        ));
        assert!(proportion_test([11, 1], [10, 10], 0.05).is_err());
        assert!(proportion_test([1, 1], [10, 10], 1.5).is_err());
    }

    #[test]
    fn test_t_test() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let r = independent_t_test(&a, &a, 0.05).unwrap();
        assert_eq!(r.p_value, 1.0);

        let low = [0.1, 0.2, 0.15, 0.12, 0.18, 0.11];
        let high = [1.9, 2.0, 1.95, 1.97, 2.05, 1.99];
        let r = independent_t_test(&low, &high, 0.05).unwrap();
        assert!(r.is_significant());

        assert!(independent_t_test(&[1.0], &a, 0.05).is_err());
    }

    #[test]
    fn test_significant_only() {
        let results = vec![
            ("AAA".to_string(), proportion_test([80, 20], [100, 100], 0.05).unwrap()),
            ("CCC".to_string(), proportion_test([50, 50], [100, 100], 0.05).unwrap()),
        ];
        let sig = significant_only(&results);
        assert_eq!(sig.len(), 1);
        assert_eq!(sig[0].0, "AAA");
    }
}
