//! The fitted preprocessor: the single object the predict path reloads.

use ndarray::Array2;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{Imputer, OneHotEncoder, PreprocessConfig, Scaler};
use crate::error::{PipelineError, Result};

/// Column-wise preprocessor converting raw mixed-type rows into a
/// fixed-width numeric feature matrix.
///
/// Fit once on the training split; apply everywhere else. The output column
/// set and ordering are frozen at fit time, so any transformed frame has the
/// same width regardless of which categories its rows contain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPreprocessor {
    config: PreprocessConfig,
    numeric_columns: Vec<String>,
    categorical_columns: Vec<String>,
    numeric_imputer: Option<Imputer>,
    categorical_imputer: Option<Imputer>,
    numeric_scaler: Option<Scaler>,
    encoder: Option<OneHotEncoder>,
    onehot_scaler: Option<Scaler>,
    output_columns: Vec<String>,
    is_fitted: bool,
}

impl DataPreprocessor {
    pub fn new() -> Self {
        Self::with_config(PreprocessConfig::default())
    }

    pub fn with_config(config: PreprocessConfig) -> Self {
        Self {
            config,
            numeric_columns: Vec::new(),
            categorical_columns: Vec::new(),
            numeric_imputer: None,
            categorical_imputer: None,
            numeric_scaler: None,
            encoder: None,
            onehot_scaler: None,
            output_columns: Vec::new(),
            is_fitted: false,
        }
    }

    /// Fit imputers, scalers, and the encoder on the training frame.
    pub fn fit(&mut self, df: &DataFrame) -> Result<&mut Self> {
        let df = &Self::cast_numeric_to_f64(df)?;
        self.detect_column_types(df);

        if self.numeric_columns.is_empty() && self.categorical_columns.is_empty() {
            return Err(PipelineError::Transform(
                "no feature columns to preprocess".to_string(),
            ));
        }

        let numeric: Vec<&str> = self.numeric_columns.iter().map(|s| s.as_str()).collect();
        let categorical: Vec<&str> = self.categorical_columns.iter().map(|s| s.as_str()).collect();

        if !numeric.is_empty() {
            let mut imputer = Imputer::new(self.config.numeric_impute_strategy);
            imputer.fit(df, &numeric)?;
            let imputed = imputer.transform(df)?;
            self.numeric_imputer = Some(imputer);

            let mut scaler = Scaler::new(self.config.numeric_scaler);
            scaler.fit(&imputed, &numeric)?;
            self.numeric_scaler = Some(scaler);
        }

        if !categorical.is_empty() {
            let mut imputer = Imputer::new(self.config.categorical_impute_strategy);
            imputer.fit(df, &categorical)?;
            let imputed = imputer.transform(df)?;
            self.categorical_imputer = Some(imputer);

            let mut encoder = OneHotEncoder::new();
            encoder.fit(&imputed, &categorical)?;
            let encoded = encoder.transform(&imputed)?;

            let onehot_names = encoder.feature_names();
            let onehot_refs: Vec<&str> = onehot_names.iter().map(|s| s.as_str()).collect();
            let mut scaler = Scaler::new(self.config.onehot_scaler);
            scaler.fit(&encoded, &onehot_refs)?;

            self.encoder = Some(encoder);
            self.onehot_scaler = Some(scaler);
        }

        self.output_columns = self.numeric_columns.clone();
        if let Some(ref encoder) = self.encoder {
            self.output_columns.extend(encoder.feature_names());
        }

        self.is_fitted = true;
        info!(
            numeric = self.numeric_columns.len(),
            categorical = self.categorical_columns.len(),
            features = self.output_columns.len(),
            "preprocessor fitted"
        );
        Ok(self)
    }

    /// Apply the fitted transformation. Returns an all-numeric frame with
    /// the frozen output columns, in order; the target column is dropped.
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        if !self.is_fitted {
            return Err(PipelineError::NotFitted);
        }

        let mut result = Self::cast_numeric_to_f64(df)?;

        if let Some(ref imputer) = self.numeric_imputer {
            result = imputer.transform(&result)?;
        }
        if let Some(ref imputer) = self.categorical_imputer {
            result = imputer.transform(&result)?;
        }
        if let Some(ref scaler) = self.numeric_scaler {
            result = scaler.transform(&result)?;
        }
        if let Some(ref encoder) = self.encoder {
            result = encoder.transform(&result)?;
        }
        if let Some(ref scaler) = self.onehot_scaler {
            result = scaler.transform(&result)?;
        }

        let names: Vec<&str> = self.output_columns.iter().map(|s| s.as_str()).collect();
        result
            .select(names)
            .map_err(|_| PipelineError::Transform("transformed frame is missing feature columns".to_string()))
    }

    /// Fit and transform in one step.
    pub fn fit_transform(&mut self, df: &DataFrame) -> Result<DataFrame> {
        self.fit(df)?;
        self.transform(df)
    }

    /// Transform into a row-major feature matrix.
    pub fn to_array(&self, df: &DataFrame) -> Result<Array2<f64>> {
        let transformed = self.transform(df)?;
        let n_rows = transformed.height();
        let n_cols = self.output_columns.len();

        let col_data: Vec<Vec<f64>> = self
            .output_columns
            .iter()
            .map(|col_name| {
                let series = transformed
                    .column(col_name)
                    .map_err(|_| PipelineError::ColumnNotFound(col_name.clone()))?;
                let values: Vec<f64> = series
                    .as_materialized_series()
                    .f64()
                    .map_err(|e| PipelineError::Transform(e.to_string()))?
                    .into_iter()
                    .map(|v| v.unwrap_or(0.0))
                    .collect();
                Ok(values)
            })
            .collect::<Result<Vec<Vec<f64>>>>()?;

        Ok(Array2::from_shape_fn((n_rows, n_cols), |(r, c)| {
            col_data[c][r]
        }))
    }

    /// Names of the output feature columns, in matrix order.
    pub fn feature_columns(&self) -> &[String] {
        &self.output_columns
    }

    pub fn numeric_columns(&self) -> &[String] {
        &self.numeric_columns
    }

    pub fn categorical_columns(&self) -> &[String] {
        &self.categorical_columns
    }

    pub fn is_fitted(&self) -> bool {
        self.is_fitted
    }

    fn detect_column_types(&mut self, df: &DataFrame) {
        self.numeric_columns.clear();
        self.categorical_columns.clear();

        for col in df.get_columns() {
            let name = col.name().to_string();
            if name == self.config.target_column {
                continue;
            }
            match col.dtype() {
                DataType::Float64 => self.numeric_columns.push(name),
                DataType::String => self.categorical_columns.push(name),
                _ => {}
            }
        }
    }

    /// Cast integer and f32 columns to Float64 so downstream stages see a
    /// single numeric dtype.
    fn cast_numeric_to_f64(df: &DataFrame) -> Result<DataFrame> {
        let mut result = df.clone();
        for col in df.get_columns() {
            match col.dtype() {
                DataType::Int8
                | DataType::Int16
                | DataType::Int32
                | DataType::Int64
                | DataType::UInt8
                | DataType::UInt16
                | DataType::UInt32
                | DataType::UInt64
                | DataType::Float32 => {
                    let casted = col
                        .cast(&DataType::Float64)
                        .map_err(PipelineError::Data)?;
                    result = result.with_column(casted).map_err(PipelineError::Data)?.clone();
                }
                _ => {}
            }
        }
        Ok(result)
    }
}

impl Default for DataPreprocessor {
    fn default() -> Self {
        Self::new()
    }
}
