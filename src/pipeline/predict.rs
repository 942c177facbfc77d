//! Prediction pipeline: one raw record in, one math score out.

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::artifact::{self, ArtifactKind};
use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::preprocessing::DataPreprocessor;
use crate::training::CandidateModel;

/// One raw student record, as submitted through the web form or the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentRecord {
    pub gender: String,
    pub race_ethnicity: String,
    pub parental_level_of_education: String,
    pub lunch: String,
    pub test_preparation_course: String,
    pub reading_score: f64,
    pub writing_score: f64,
}

impl StudentRecord {
    /// Single-row frame with the training schema minus the target.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let df = df!(
            "gender" => &[self.gender.as_str()],
            "race_ethnicity" => &[self.race_ethnicity.as_str()],
            "parental_level_of_education" => &[self.parental_level_of_education.as_str()],
            "lunch" => &[self.lunch.as_str()],
            "test_preparation_course" => &[self.test_preparation_course.as_str()],
            "reading_score" => &[self.reading_score],
            "writing_score" => &[self.writing_score]
        )?;
        Ok(df)
    }
}

/// Loads the persisted preprocessor and model, applies the fitted transform
/// to a single record, and returns the prediction. Idempotent and
/// side-effect-free: nothing is refit and nothing is written.
pub struct PredictPipeline {
    config: PipelineConfig,
}

impl PredictPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(PipelineConfig::default())
    }

    pub fn predict(&self, record: &StudentRecord) -> Result<f64> {
        let preprocessor: DataPreprocessor =
            artifact::load(&self.config.preprocessor_path(), ArtifactKind::Preprocessor)?;
        let model: CandidateModel =
            artifact::load(&self.config.model_path(), ArtifactKind::Model)?;

        let df = record.to_dataframe()?;
        let features = preprocessor.to_array(&df)?;
        let predictions = model.predict(&features)?;

        let prediction = predictions
            .first()
            .copied()
            .ok_or_else(|| PipelineError::Transform("model returned no prediction".to_string()))?;

        debug!(model = model.name(), prediction, "predicted math score");
        Ok(prediction)
    }
}
