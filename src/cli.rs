use crate::config::AnalysisConfig;
use crate::similarity::SimilarityMetric;
use crate::types::RecordKind;
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file (defaults to config.toml in the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Shannon entropy of every sequence, with summary and quartile outliers
    Entropy {
        /// Sequence files (FASTA, FASTQ, SAM or MAP)
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Record format, inferred from the extension when omitted
        #[arg(long, value_enum)]
        format: Option<RecordKind>,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Closest matches in the second file for sequences of the first
    Similarity {
        first: PathBuf,
        second: PathBuf,
        #[arg(long, value_enum)]
        format: Option<RecordKind>,
        #[command(flatten)]
        matching: MatchArgs,
        #[command(flatten)]
        sampling: SamplingArgs,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Count k-mers of a sequence file
    CountKmers {
        file: PathBuf,
        /// K-mer length
        #[arg(short = 'k', long = "kmer-length", default_value = "21")]
        k: usize,
        #[arg(long, value_enum)]
        format: Option<RecordKind>,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Compare two k-mer count files and test each shared k-mer for a frequency shift
    CompareKmers {
        /// Jellyfish dump or kmer,count CSV
        first: PathBuf,
        second: PathBuf,
        #[command(flatten)]
        significance: SignificanceArgs,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Proportion tests over an existing k-mer comparison table
    Proportions {
        table: PathBuf,
        #[command(flatten)]
        significance: SignificanceArgs,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Reads present in the first file but not in the second
    Unmapped {
        reads: PathBuf,
        mapped: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Write the effective configuration to the user config directory
    InitConfig,
}

#[derive(ClapArgs, Default)]
pub struct OutputArgs {
    /// Directory for output artifacts
    #[arg(short = 'o', long = "output-dir")]
    pub directory: Option<PathBuf>,
}

#[derive(ClapArgs, Default)]
pub struct MatchArgs {
    /// Number of closest matches kept per sequence
    #[arg(short = 'n', long)]
    pub matches: Option<usize>,
    /// Minimum similarity in [0, 1]
    #[arg(long)]
    pub cutoff: Option<f64>,
    #[arg(long, value_enum)]
    pub metric: Option<SimilarityMetric>,
    /// Ignore popular characters in long sequences when matching
    #[arg(long)]
    pub autojunk: bool,
    #[arg(short = 't', long)]
    pub threads: Option<usize>,
}

#[derive(ClapArgs, Default)]
pub struct SamplingArgs {
    /// Fraction of each set to sample
    #[arg(long)]
    pub percentage: Option<f64>,
    /// Compare every sequence of the first file
    #[arg(long)]
    pub all_first: bool,
    /// Compare against every sequence of the second file
    #[arg(long)]
    pub all_second: bool,
    /// Seed for reproducible sampling
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(ClapArgs, Default)]
pub struct SignificanceArgs {
    /// Significance level
    #[arg(long)]
    pub level: Option<f64>,
    /// Seed for reproducible sampling of large tables
    #[arg(long)]
    pub seed: Option<u64>,
}

impl OutputArgs {
    pub fn apply(&self, config: &mut AnalysisConfig) {
        if let Some(dir) = &self.directory {
            config.output.directory = dir.clone();
        }
    }
}

impl MatchArgs {
    pub fn apply(&self, config: &mut AnalysisConfig) {
        let similarity = &mut config.similarity;
        if let Some(n) = self.matches {
            similarity.closest_matches = n;
        }
        if let Some(cutoff) = self.cutoff {
            similarity.cutoff = cutoff;
        }
        if let Some(metric) = self.metric {
            similarity.metric = metric;
        }
        if self.autojunk {
            similarity.autojunk = true;
        }
        if let Some(threads) = self.threads {
            similarity.threads = threads;
        }
    }
}

impl SamplingArgs {
    pub fn apply(&self, config: &mut AnalysisConfig) {
        let sampling = &mut config.sampling;
        if let Some(percentage) = self.percentage {
            sampling.percentage = percentage;
        }
        if self.all_first {
            sampling.sample_first = false;
        }
        if self.all_second {
            sampling.sample_second = false;
        }
        if self.seed.is_some() {
            sampling.seed = self.seed;
        }
    }
}

impl SignificanceArgs {
    pub fn apply(&self, config: &mut AnalysisConfig) {
        if let Some(level) = self.level {
            config.significance.level = level;
        }
        if self.seed.is_some() {
            config.sampling.seed = self.seed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from([
            "seqcompare",
            "similarity",
            "a.fq",
            "b.fa",
            "-n",
            "5",
            "--cutoff",
            "0.9",
            "--metric",
            "levenshtein",
            "--all-second",
            "--seed",
            "12",
            "-o",
            "results",
        ]);
        let mut config = AnalysisConfig::default();
        match args.command {
            Commands::Similarity {
                matching,
                sampling,
                output,
                ..
            } => {
                matching.apply(&mut config);
                sampling.apply(&mut config);
                output.apply(&mut config);
            }
            _ => panic!("expected similarity command"),
        }
        assert_eq!(config.similarity.closest_matches, 5);
        assert_eq!(config.similarity.cutoff, 0.9);
        assert_eq!(config.similarity.metric, SimilarityMetric::Levenshtein);
        assert!(config.sampling.sample_first);
        assert!(!config.sampling.sample_second);
        assert_eq!(config.sampling.seed, Some(12));
        assert_eq!(config.output.directory, PathBuf::from("results"));
    }

    #[test]
    fn test_global_config_flag() {
        let args = Args::parse_from(["seqcompare", "entropy", "reads.fq", "--config", "my.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("my.toml")));
    }
}
