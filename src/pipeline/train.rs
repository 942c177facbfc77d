//! Training pipeline orchestration.

use tracing::info;

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::ingestion::DataIngestion;
use crate::preprocessing::DataTransformation;
use crate::training::{ModelTrainer, TrainingReport};

/// Strict sequential composition of the three training steps. Each step
/// starts only once the previous step's output exists; any failure aborts
/// the run.
pub struct TrainPipeline {
    config: PipelineConfig,
}

impl TrainPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(PipelineConfig::default())
    }

    /// Run ingestion, transformation, and training; returns the report with
    /// the winning model's held-out R².
    pub fn run(&self) -> Result<TrainingReport> {
        info!("starting train pipeline");

        let splits = DataIngestion::new(self.config.clone()).run()?;
        let transformed =
            DataTransformation::new(self.config.clone()).run(&splits.train, &splits.test)?;
        let report =
            ModelTrainer::new(self.config.clone()).run(&transformed.train, &transformed.test)?;

        info!(
            best = %report.best_model,
            r2 = report.r2,
            "train pipeline completed"
        );
        Ok(report)
    }
}
