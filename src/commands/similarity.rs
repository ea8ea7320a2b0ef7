use super::load_input;
use crate::config::AnalysisConfig;
use crate::export;
use crate::similarity::{find_all_matches, hamming_to_closest};
use crate::types::RecordKind;
use crate::utils::progress_bar_builder::{progress_callback, ProgressBarBuilder, BAR_TEMPLATE};
use anyhow::{Context, Result};
use std::path::Path;

pub fn run(first: &Path, second: &Path, format: Option<RecordKind>, config: &AnalysisConfig) -> Result<()> {
    let set_a = load_input(first, format)?;
    let set_b = load_input(second, format)?;
    let options = config.match_options();
    let sampling = config.sampling_options();

    let progress = ProgressBarBuilder::new("Finding closest matches")
        .with_template(BAR_TEMPLATE)
        .with_progress_bar()
        .build()?;
    let callback = progress_callback(&progress);

    let matches = find_all_matches(&set_a, &set_b, &options, &sampling, Some(&callback), None)
        .context("Similarity search failed")?;
    let matches = hamming_to_closest(matches);

    let output = config.artifact(&config.output.matches, "csv");
    export::write_matches(&output, &matches, options.closest_matches)?;

    let with_match = matches.values().filter(|m| !m.matches.is_empty()).count();
    println!(
        "{} of {} compared sequences have a match at cutoff {}",
        with_match,
        matches.len(),
        options.cutoff
    );
    println!("Written to {}", output.display());
    Ok(())
}
