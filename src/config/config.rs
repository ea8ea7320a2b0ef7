use crate::error::{AnalysisError, Result};
use crate::kmer::ProportionTestOptions;
use crate::similarity::{MatchOptions, SamplingOptions, SimilarityMetric};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub similarity: SimilarityConfig,
    #[serde(default)]
    pub sampling: SamplingConfig,
    #[serde(default)]
    pub significance: SignificanceConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityConfig {
    #[serde(default = "default_closest_matches")]
    pub closest_matches: usize,
    #[serde(default = "default_cutoff")]
    pub cutoff: f64,
    #[serde(default)]
    pub metric: SimilarityMetric,
    #[serde(default)]
    pub autojunk: bool,
    #[serde(default = "default_threads")]
    pub threads: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    #[serde(default = "default_percentage")]
    pub percentage: f64,
    #[serde(default = "default_true")]
    pub sample_first: bool,
    #[serde(default = "default_true")]
    pub sample_second: bool,
    /// Unset means every run draws a different sample.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignificanceConfig {
    #[serde(default = "default_level")]
    pub level: f64,
    #[serde(default = "default_sample_threshold")]
    pub sample_threshold: usize,
    #[serde(default = "default_sample_fraction")]
    pub sample_fraction: f64,
}

/// Where artifacts go and their base names (extensions are added per artifact).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    #[serde(default = "default_entropy_name")]
    pub entropy: String,
    #[serde(default = "default_matches_name")]
    pub matches: String,
    #[serde(default = "default_kmers_name")]
    pub kmers: String,
    #[serde(default = "default_significance_name")]
    pub significance: String,
    #[serde(default = "default_unmapped_name")]
    pub unmapped: String,
}

fn default_closest_matches() -> usize {
    3
}

fn default_cutoff() -> f64 {
    0.6
}

fn default_threads() -> usize {
    1
}

fn default_percentage() -> f64 {
    0.001
}

fn default_true() -> bool {
    true
}

fn default_level() -> f64 {
    0.05
}

fn default_sample_threshold() -> usize {
    100
}

fn default_sample_fraction() -> f64 {
    0.1
}

fn default_directory() -> PathBuf {
    PathBuf::from("output")
}

fn default_entropy_name() -> String {
    "entropy".to_string()
}

fn default_matches_name() -> String {
    "closest_matches".to_string()
}

fn default_kmers_name() -> String {
    "kmer_comparison".to_string()
}

fn default_significance_name() -> String {
    "significance".to_string()
}

fn default_unmapped_name() -> String {
    "unmapped".to_string()
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            closest_matches: default_closest_matches(),
            cutoff: default_cutoff(),
            metric: SimilarityMetric::default(),
            autojunk: false,
            threads: default_threads(),
        }
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            percentage: default_percentage(),
            sample_first: true,
            sample_second: true,
            seed: None,
        }
    }
}

impl Default for SignificanceConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            sample_threshold: default_sample_threshold(),
            sample_fraction: default_sample_fraction(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            entropy: default_entropy_name(),
            matches: default_matches_name(),
            kmers: default_kmers_name(),
            significance: default_significance_name(),
            unmapped: default_unmapped_name(),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "seqcompare", "seqcompare-tools")
}

impl AnalysisConfig {
    /// Loads `path` when given, otherwise the user's `config.toml`, otherwise defaults.
    ///
    /// An explicit path that is missing or unparsable is an error; a broken
    /// user config is reported and ignored.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            if !path.exists() {
                return Err(AnalysisError::MissingInput {
                    path: path.to_path_buf(),
                });
            }
            return Self::from_file(path);
        }

        if let Some(proj_dirs) = project_dirs() {
            let config_path = proj_dirs.config_dir().join("config.toml");
            if config_path.exists() {
                match Self::from_file(&config_path) {
                    Ok(config) => return Ok(config),
                    Err(e) => log::warn!("Ignoring {}: {}", config_path.display(), e),
                }
            }
        }
        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| AnalysisError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Writes the configuration to the user's config directory.
    pub fn save(&self) -> Result<PathBuf> {
        let proj_dirs = project_dirs()
            .ok_or_else(|| AnalysisError::Config("no home directory to store configuration in".to_string()))?;
        let config_dir = proj_dirs.config_dir();
        fs::create_dir_all(config_dir)?;

        let config_path = config_dir.join("config.toml");
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| AnalysisError::Config(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            closest_matches: self.similarity.closest_matches,
            cutoff: self.similarity.cutoff,
            metric: self.similarity.metric,
            autojunk: self.similarity.autojunk,
            threads: self.similarity.threads.max(1),
        }
    }

    pub fn sampling_options(&self) -> SamplingOptions {
        SamplingOptions {
            percentage: self.sampling.percentage,
            sample_first: self.sampling.sample_first,
            sample_second: self.sampling.sample_second,
            seed: self.sampling.seed,
        }
    }

    pub fn proportion_test_options(&self) -> ProportionTestOptions {
        ProportionTestOptions {
            level: self.significance.level,
            sample_threshold: self.significance.sample_threshold,
            sample_fraction: self.significance.sample_fraction,
            seed: self.sampling.seed,
        }
    }

    /// Path of an artifact in the output directory.
    pub fn artifact(&self, name: &str, extension: &str) -> PathBuf {
        self.output.directory.join(format!("{}.{}", name, extension))
    }
}
