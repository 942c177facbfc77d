//! Pipeline configuration.
//!
//! Split fraction, seed, and every filesystem path the pipelines touch are
//! configuration, not hidden constants. Defaults can be overridden through
//! the environment (`DATA_PATH`, `ARTIFACT_DIR`) or the builder methods.

use std::path::{Path, PathBuf};

/// Name of the target column in the source CSV.
pub const TARGET_COLUMN: &str = "math_score";

/// Configuration shared by the train and predict pipelines.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Source CSV with raw student records.
    pub source_path: PathBuf,

    /// Directory receiving the raw copy, the splits, and both artifacts.
    pub artifact_dir: PathBuf,

    /// Fraction of rows held out for the test split.
    pub test_fraction: f64,

    /// Seed for the randomized split.
    pub seed: u64,

    /// Minimum R² a candidate model must reach on the test split.
    pub min_model_score: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source_path: std::env::var("DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/stud.csv")),
            artifact_dir: std::env::var("ARTIFACT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("artifact")),
            test_fraction: 0.2,
            seed: 42,
            min_model_score: 0.6,
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = path.into();
        self
    }

    pub fn with_artifact_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.artifact_dir = dir.into();
        self
    }

    pub fn with_test_fraction(mut self, fraction: f64) -> Self {
        self.test_fraction = fraction;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_min_model_score(mut self, score: f64) -> Self {
        self.min_model_score = score;
        self
    }

    pub fn raw_data_path(&self) -> PathBuf {
        self.artifact_dir.join("data.csv")
    }

    pub fn train_data_path(&self) -> PathBuf {
        self.artifact_dir.join("train.csv")
    }

    pub fn test_data_path(&self) -> PathBuf {
        self.artifact_dir.join("test.csv")
    }

    pub fn preprocessor_path(&self) -> PathBuf {
        self.artifact_dir.join("preprocessor.json")
    }

    pub fn model_path(&self) -> PathBuf {
        self.artifact_dir.join("model.json")
    }

    /// Both artifacts exist on disk.
    pub fn artifacts_ready(&self) -> bool {
        self.preprocessor_path().exists() && self.model_path().exists()
    }

    /// Rebase every path onto `dir` (used by tests and scratch runs).
    pub fn rooted_at(dir: &Path) -> Self {
        Self::default()
            .with_source_path(dir.join("stud.csv"))
            .with_artifact_dir(dir.join("artifact"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = PipelineConfig {
            source_path: PathBuf::from("data/stud.csv"),
            artifact_dir: PathBuf::from("artifact"),
            ..PipelineConfig::default()
        };
        assert_eq!(config.train_data_path(), PathBuf::from("artifact/train.csv"));
        assert_eq!(config.model_path(), PathBuf::from("artifact/model.json"));
        assert_eq!(config.test_fraction, 0.2);
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn test_builder() {
        let config = PipelineConfig::default()
            .with_test_fraction(0.3)
            .with_seed(7)
            .with_min_model_score(0.5);
        assert_eq!(config.test_fraction, 0.3);
        assert_eq!(config.seed, 7);
        assert_eq!(config.min_model_score, 0.5);
    }
}
