//! Data transformation step: fit the preprocessor on the training split,
//! apply it to both splits, and persist it.

use std::path::{Path, PathBuf};

use ndarray::{concatenate, Array1, Array2, Axis};
use polars::prelude::*;
use tracing::info;

use super::DataPreprocessor;
use crate::artifact::{self, ArtifactKind};
use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::utils::read_csv;

/// Output of the transformation step: feature matrices with the target
/// appended as the last column, plus the persisted preprocessor path.
#[derive(Debug)]
pub struct TransformedData {
    pub train: Array2<f64>,
    pub test: Array2<f64>,
    pub preprocessor_path: PathBuf,
}

/// Fits and applies the preprocessor across the train/test splits.
pub struct DataTransformation {
    config: PipelineConfig,
}

impl DataTransformation {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn run(&self, train_path: &Path, test_path: &Path) -> Result<TransformedData> {
        info!(
            train = %train_path.display(),
            test = %test_path.display(),
            "starting data transformation"
        );

        let train_df = read_csv(train_path)?;
        let test_df = read_csv(test_path)?;

        let y_train = self.target_values(&train_df)?;
        let y_test = self.target_values(&test_df)?;

        // Fit on the training split only; the test split sees the same
        // fitted transformation.
        let mut preprocessor = DataPreprocessor::new();
        preprocessor.fit(&train_df)?;

        let x_train = preprocessor.to_array(&train_df)?;
        let x_test = preprocessor.to_array(&test_df)?;

        let train = append_target(&x_train, &y_train)?;
        let test = append_target(&x_test, &y_test)?;

        let preprocessor_path = self.config.preprocessor_path();
        artifact::save(&preprocessor_path, ArtifactKind::Preprocessor, &preprocessor)?;

        info!(
            features = x_train.ncols(),
            train_rows = train.nrows(),
            test_rows = test.nrows(),
            preprocessor = %preprocessor_path.display(),
            "data transformation completed"
        );

        Ok(TransformedData {
            train,
            test,
            preprocessor_path,
        })
    }

    fn target_values(&self, df: &DataFrame) -> Result<Array1<f64>> {
        let target = crate::config::TARGET_COLUMN;
        let series = df
            .column(target)
            .map_err(|_| PipelineError::ColumnNotFound(target.to_string()))?;
        let casted = series
            .cast(&DataType::Float64)
            .map_err(PipelineError::Data)?;
        let values: Array1<f64> = casted
            .f64()
            .map_err(|e| PipelineError::Transform(e.to_string()))?
            .into_iter()
            .map(|v| v.unwrap_or(0.0))
            .collect();
        Ok(values)
    }
}

/// Append the target as the last matrix column.
fn append_target(x: &Array2<f64>, y: &Array1<f64>) -> Result<Array2<f64>> {
    if x.nrows() != y.len() {
        return Err(PipelineError::Shape {
            expected: format!("{} target values", x.nrows()),
            actual: format!("{} target values", y.len()),
        });
    }
    let y_col = y.view().insert_axis(Axis(1));
    concatenate(Axis(1), &[x.view(), y_col]).map_err(|e| PipelineError::Transform(e.to_string()))
}
