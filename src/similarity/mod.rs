//! Closest-match search between two sequence populations.
//!
//! Every sequence of the first set is scored against every sequence of the
//! second, so the cost grows with the product of the set sizes. Either side
//! can be randomly sampled first to keep large comparisons tractable.

pub mod gestalt;

use crate::api::{emit, CancellationToken, ProgressCallback, ProgressEvent};
use crate::error::{AnalysisError, Result};
use crate::statistics::{hamming_truncated, sample_set};
use crate::types::SequenceSet;
use crossbeam_channel::unbounded;
use gestalt::GestaltMatcher;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

const TASK: &str = "closest matches";

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SimilarityMetric {
    /// Ratcliff/Obershelp matching-blocks ratio
    #[default]
    Gestalt,
    /// 1 - edit distance / longer length
    Levenshtein,
    JaroWinkler,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MatchOptions {
    pub closest_matches: usize,
    pub cutoff: f64,
    pub metric: SimilarityMetric,
    pub autojunk: bool,
    pub threads: usize,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            closest_matches: 3,
            cutoff: 0.6,
            metric: SimilarityMetric::Gestalt,
            autojunk: false,
            threads: 1,
        }
    }
}

impl MatchOptions {
    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.cutoff) {
            return Err(AnalysisError::invalid(format!(
                "similarity cutoff must be within [0, 1], got {}",
                self.cutoff
            )));
        }
        Ok(())
    }
}

/// Which sides to sample before comparing, and how much.
#[derive(Clone, Debug, PartialEq)]
pub struct SamplingOptions {
    pub percentage: f64,
    pub sample_first: bool,
    pub sample_second: bool,
    pub seed: Option<u64>,
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self {
            percentage: 0.001,
            sample_first: true,
            sample_second: true,
            seed: None,
        }
    }
}

impl SamplingOptions {
    pub fn disabled() -> Self {
        Self {
            sample_first: false,
            sample_second: false,
            ..Self::default()
        }
    }
}

/// Best matches for one query sequence and, once computed, its distance to the best one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MatchEntry {
    pub matches: Vec<String>,
    pub hamming: Option<u64>,
}

/// Query sequence to its matches, in the order of the (sampled) first set.
pub type MatchResult = IndexMap<String, MatchEntry>;

enum Scorer<'q> {
    Gestalt(GestaltMatcher),
    Levenshtein(&'q str),
    JaroWinkler(&'q str),
}

impl<'q> Scorer<'q> {
    fn new(query: &'q str, options: &MatchOptions) -> Self {
        match options.metric {
            SimilarityMetric::Gestalt => Scorer::Gestalt(GestaltMatcher::new(query, options.autojunk)),
            SimilarityMetric::Levenshtein => Scorer::Levenshtein(query),
            SimilarityMetric::JaroWinkler => Scorer::JaroWinkler(query),
        }
    }

    /// Score of `candidate`, or `None` when it cannot reach `cutoff`.
    fn score(&self, candidate: &str, cutoff: f64) -> Option<f64> {
        let score = match self {
            Scorer::Gestalt(m) => {
                if m.real_quick_ratio(candidate) < cutoff || m.quick_ratio(candidate) < cutoff {
                    return None;
                }
                m.ratio(candidate)
            }
            Scorer::Levenshtein(q) => strsim::normalized_levenshtein(q, candidate),
            Scorer::JaroWinkler(q) => strsim::jaro_winkler(q, candidate),
        };
        (score >= cutoff).then_some(score)
    }
}

/// Up to `n` candidates scoring at least `cutoff`, best first.
///
/// Candidates with equal scores keep their order in `pool`.
pub fn closest_matches<'a, I>(sequence: &str, pool: I, n: usize, cutoff: f64) -> Result<Vec<String>>
where
    I: IntoIterator<Item = &'a str>,
{
    let options = MatchOptions {
        closest_matches: n,
        cutoff,
        ..MatchOptions::default()
    };
    options.validate()?;
    let pool: Vec<&str> = pool.into_iter().collect();
    Ok(rank_candidates(sequence, &pool, &options))
}

fn rank_candidates(sequence: &str, pool: &[&str], options: &MatchOptions) -> Vec<String> {
    if options.closest_matches == 0 {
        return Vec::new();
    }
    let scorer = Scorer::new(sequence, options);
    let mut scored: Vec<(f64, &str)> = pool
        .iter()
        .filter_map(|&cand| scorer.score(cand, options.cutoff).map(|s| (s, cand)))
        .collect();

    // stable: ties stay in pool order
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.truncate(options.closest_matches);
    scored.into_iter().map(|(_, cand)| cand.to_string()).collect()
}

/// Closest matches in `set_b` for every sequence of `set_a`, after optional sampling.
///
/// Progress is reported as the fraction of `set_a` processed. When `cancel` is
/// triggered the search stops between query sequences and returns
/// [`AnalysisError::Cancelled`] without partial results.
pub fn find_all_matches(
    set_a: &SequenceSet,
    set_b: &SequenceSet,
    options: &MatchOptions,
    sampling: &SamplingOptions,
    progress: Option<&ProgressCallback>,
    cancel: Option<&CancellationToken>,
) -> Result<MatchResult> {
    options.validate()?;

    let sampled_a;
    let queries_set = if sampling.sample_first {
        sampled_a = sample_set(set_a, sampling.percentage, sampling.seed)?;
        &sampled_a
    } else {
        set_a
    };
    let sampled_b;
    let pool_set = if sampling.sample_second {
        sampled_b = sample_set(set_b, sampling.percentage, sampling.seed)?;
        &sampled_b
    } else {
        set_b
    };

    let queries: Vec<&str> = queries_set.sequences().collect();
    let pool: Vec<&str> = pool_set.sequences().collect();
    let message = format!(
        "Comparing {} sequences against {} candidates",
        queries.len(),
        pool.len()
    );
    log::info!("{}", message);

    emit(
        progress,
        ProgressEvent::Started {
            task: TASK.to_string(),
            total: queries.len() as u64,
        },
    );
    emit(
        progress,
        ProgressEvent::Message {
            task: TASK.to_string(),
            message,
        },
    );

    let ranked = if options.threads > 1 && queries.len() > 1 {
        rank_parallel(&queries, &pool, options, progress, cancel)?
    } else {
        rank_sequential(&queries, &pool, options, progress, cancel)?
    };

    emit(progress, ProgressEvent::Completed { task: TASK.to_string() });

    Ok(queries
        .into_iter()
        .zip(ranked)
        .map(|(q, matches)| (q.to_string(), MatchEntry { matches, hamming: None }))
        .collect())
}

fn is_cancelled(cancel: Option<&CancellationToken>) -> bool {
    cancel.is_some_and(|c| c.is_cancelled())
}

fn report(progress: Option<&ProgressCallback>, done: usize, total: usize) {
    log::debug!("{:.2}% compared", done as f64 / total as f64 * 100.0);
    emit(
        progress,
        ProgressEvent::Progress {
            task: TASK.to_string(),
            current: done as u64,
            total: total as u64,
        },
    );
}

fn rank_sequential(
    queries: &[&str],
    pool: &[&str],
    options: &MatchOptions,
    progress: Option<&ProgressCallback>,
    cancel: Option<&CancellationToken>,
) -> Result<Vec<Vec<String>>> {
    let mut ranked = Vec::with_capacity(queries.len());
    for (done, query) in queries.iter().enumerate() {
        if is_cancelled(cancel) {
            return Err(AnalysisError::Cancelled);
        }
        ranked.push(rank_candidates(query, pool, options));
        report(progress, done + 1, queries.len());
    }
    Ok(ranked)
}

/// Query `i` goes to worker `i % threads`; results are put back in query order.
fn rank_parallel(
    queries: &[&str],
    pool: &[&str],
    options: &MatchOptions,
    progress: Option<&ProgressCallback>,
    cancel: Option<&CancellationToken>,
) -> Result<Vec<Vec<String>>> {
    let threads = options.threads.min(queries.len());
    let (tx, rx) = unbounded::<(usize, Vec<String>)>();
    let mut slots: Vec<Option<Vec<String>>> = vec![None; queries.len()];

    std::thread::scope(|scope| {
        for worker in 0..threads {
            let tx = tx.clone();
            scope.spawn(move || {
                for i in (worker..queries.len()).step_by(threads) {
                    if is_cancelled(cancel) {
                        break;
                    }
                    let matches = rank_candidates(queries[i], pool, options);
                    if tx.send((i, matches)).is_err() {
                        break;
                    }
                }
            });
        }
        drop(tx);

        for (done, (i, matches)) in rx.iter().enumerate() {
            slots[i] = Some(matches);
            report(progress, done + 1, queries.len());
        }
    });

    if is_cancelled(cancel) {
        return Err(AnalysisError::Cancelled);
    }
    slots
        .into_iter()
        .map(|slot| slot.ok_or(AnalysisError::Cancelled))
        .collect()
}

/// Adds the Hamming distance between each query and its best match.
///
/// Entries without matches are left as they are. Distances only cover the
/// length of the shorter sequence.
pub fn hamming_to_closest(mut result: MatchResult) -> MatchResult {
    for (sequence, entry) in result.iter_mut() {
        if let Some(best) = entry.matches.first() {
            entry.hamming = Some(hamming_truncated(sequence, best));
        }
    }
    log::info!("Found hamming distances");
    result
}
