//! Error taxonomy for the prediction service.
//!
//! Every pipeline failure maps onto a small closed set of variants so the
//! HTTP and CLI boundaries can discriminate: a missing artifact is not a
//! transformation failure, and an unreachable score threshold is not an
//! ingestion problem.

use std::path::PathBuf;
use thiserror::Error;

use crate::artifact::ArtifactKind;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("ingestion failed: {0}")]
    Ingestion(String),

    #[error("transform failed: {0}")]
    Transform(String),

    #[error("training failed: {0}")]
    Training(String),

    #[error("artifact missing at {path}: run the train pipeline first")]
    ArtifactMissing { path: PathBuf },

    #[error("artifact at {path} has format version {found}, expected {expected}")]
    ArtifactVersion {
        path: PathBuf,
        found: u32,
        expected: u32,
    },

    #[error("artifact at {path} is a {found:?}, expected a {expected:?}")]
    ArtifactKindMismatch {
        path: PathBuf,
        expected: ArtifactKind,
        found: ArtifactKind,
    },

    #[error("column not found: {0}")]
    ColumnNotFound(String),

    #[error("shape mismatch: expected {expected}, got {actual}")]
    Shape { expected: String, actual: String },

    #[error("model is not fitted")]
    NotFitted,

    #[error("data error: {0}")]
    Data(#[from] polars::prelude::PolarsError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
