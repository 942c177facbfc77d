//! scorecast - Student math score prediction service
//!
//! Predicts a student's math score from demographic attributes and two test
//! scores, using a regression model trained on a CSV dataset.
//!
//! # Modules
//!
//! ## Pipeline steps
//! - [`ingestion`] - Source CSV validation and seeded train/test split
//! - [`preprocessing`] - Imputation, scaling, one-hot encoding
//! - [`training`] - Candidate regressors, evaluation, selection
//! - [`pipeline`] - Train and predict orchestration
//!
//! ## Infrastructure
//! - [`artifact`] - Tagged persistence of fitted objects
//! - [`config`] - Paths, split fraction, seed, score threshold
//! - [`error`] - Closed error taxonomy
//! - [`logging`] - Console + rolling file tracing setup
//!
//! ## Services
//! - [`server`] - Web form and predict/train HTTP endpoints
//! - [`cli`] - Command-line interface

pub mod artifact;
pub mod config;
pub mod error;
pub mod logging;

pub mod ingestion;
pub mod preprocessing;
pub mod training;

pub mod pipeline;

pub mod cli;
pub mod server;

pub mod utils;

pub use error::{PipelineError, Result};

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::artifact::ArtifactKind;
    pub use crate::config::PipelineConfig;
    pub use crate::error::{PipelineError, Result};
    pub use crate::ingestion::DataIngestion;
    pub use crate::pipeline::{PredictPipeline, StudentRecord, TrainPipeline};
    pub use crate::preprocessing::{DataPreprocessor, DataTransformation, PreprocessConfig};
    pub use crate::training::{CandidateModel, ModelTrainer, TrainingReport};
}
