use crate::error::{AnalysisError, Result};
use crate::types::SequenceSet;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates the sampling RNG. `None` draws from OS entropy and is not reproducible.
pub fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Number of items a `fraction` of `population` amounts to, rounding half to even.
pub fn sample_size(fraction: f64, population: usize) -> Result<usize> {
    if !fraction.is_finite() || fraction < 0.0 {
        return Err(AnalysisError::invalid(format!(
            "sample fraction must be a non-negative number, got {}",
            fraction
        )));
    }
    let requested = (fraction * population as f64).round_ties_even() as usize;
    if requested > population {
        return Err(AnalysisError::Sampling {
            requested,
            available: population,
        });
    }
    Ok(requested)
}

/// Picks `amount` distinct indices below `population`, returned in ascending order.
pub fn sample_indices(population: usize, amount: usize, seed: Option<u64>) -> Result<Vec<usize>> {
    if amount > population {
        return Err(AnalysisError::Sampling {
            requested: amount,
            available: population,
        });
    }
    let mut rng = rng_for(seed);
    let mut indices = rand::seq::index::sample(&mut rng, population, amount).into_vec();
    indices.sort_unstable();
    Ok(indices)
}

/// Uniform random subset of a sequence set without replacement.
///
/// The subset keeps the input's iteration order. A fixed seed makes the result
/// reproducible for the same set and fraction.
pub fn sample_set(set: &SequenceSet, fraction: f64, seed: Option<u64>) -> Result<SequenceSet> {
    let amount = sample_size(fraction, set.len())?;
    let indices = sample_indices(set.len(), amount, seed)?;
    log::debug!("Sampled {} of {} sequences", amount, set.len());

    Ok(indices
        .into_iter()
        .filter_map(|i| set.get_index(i))
        .map(|(seq, meta)| (seq.clone(), meta.clone()))
        .collect())
}

/// Uniform random subset of table rows without replacement, in table order.
pub fn sample_rows<T: Clone>(rows: &[T], fraction: f64, seed: Option<u64>) -> Result<Vec<T>> {
    let amount = sample_size(fraction, rows.len())?;
    let indices = sample_indices(rows.len(), amount, seed)?;
    Ok(indices.into_iter().map(|i| rows[i].clone()).collect())
}
