//! One-hot encoding with train-time vocabularies.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};

/// One-hot encoder. Each fitted column is replaced by one binary column per
/// category seen at fit time, named `{column}_{category}`. Categories are
/// sorted so the output width and ordering are stable across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneHotEncoder {
    /// Fitted columns in fit order with their sorted vocabularies.
    vocab: Vec<(String, Vec<String>)>,
    is_fitted: bool,
}

impl OneHotEncoder {
    pub fn new() -> Self {
        Self {
            vocab: Vec::new(),
            is_fitted: false,
        }
    }

    pub fn fit(&mut self, df: &DataFrame, columns: &[&str]) -> Result<&mut Self> {
        self.vocab.clear();

        for col_name in columns {
            let column = df
                .column(col_name)
                .map_err(|_| PipelineError::ColumnNotFound(col_name.to_string()))?;
            let ca = column
                .as_materialized_series()
                .str()
                .map_err(|e| PipelineError::Transform(e.to_string()))?;

            let mut categories: Vec<String> =
                ca.into_no_null_iter().map(|s| s.to_string()).collect();
            categories.sort();
            categories.dedup();

            if categories.is_empty() {
                return Err(PipelineError::Transform(format!(
                    "column '{col_name}' has no categories to encode"
                )));
            }
            self.vocab.push((col_name.to_string(), categories));
        }

        self.is_fitted = true;
        Ok(self)
    }

    /// Replace each fitted column with its one-hot block. A category unseen
    /// at fit time is a transform error, never a silent zero row.
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        if !self.is_fitted {
            return Err(PipelineError::NotFitted);
        }

        let mut result = df.clone();
        for (col_name, categories) in &self.vocab {
            let column = result
                .column(col_name)
                .map_err(|_| PipelineError::ColumnNotFound(col_name.clone()))?;
            let ca = column
                .as_materialized_series()
                .str()
                .map_err(|e| PipelineError::Transform(e.to_string()))?;

            // Row-wise category index, validated against the vocabulary.
            let mut hits: Vec<usize> = Vec::with_capacity(ca.len());
            for opt in ca.into_iter() {
                let value = opt.ok_or_else(|| {
                    PipelineError::Transform(format!(
                        "null category in column '{col_name}' after imputation"
                    ))
                })?;
                let idx = categories.binary_search_by(|c| c.as_str().cmp(value)).map_err(|_| {
                    PipelineError::Transform(format!(
                        "unseen category '{value}' in column '{col_name}'"
                    ))
                })?;
                hits.push(idx);
            }

            result = result.drop(col_name).map_err(PipelineError::Data)?;
            for (cat_idx, category) in categories.iter().enumerate() {
                let values: Vec<f64> = hits
                    .iter()
                    .map(|&hit| if hit == cat_idx { 1.0 } else { 0.0 })
                    .collect();
                let series = Series::new(format!("{col_name}_{category}").into(), values);
                result = result.with_column(series).map_err(PipelineError::Data)?.clone();
            }
        }

        Ok(result)
    }

    /// Output column names in encoding order.
    pub fn feature_names(&self) -> Vec<String> {
        self.vocab
            .iter()
            .flat_map(|(col_name, categories)| {
                categories
                    .iter()
                    .map(move |category| format!("{col_name}_{category}"))
            })
            .collect()
    }
}

impl Default for OneHotEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_hot_width() {
        let df = df!(
            "lunch" => &["standard", "free/reduced", "standard"],
            "score" => &[1.0, 2.0, 3.0]
        )
        .unwrap();

        let mut encoder = OneHotEncoder::new();
        encoder.fit(&df, &["lunch"]).unwrap();
        let out = encoder.transform(&df).unwrap();

        assert!(out.column("lunch").is_err());
        assert!(out.column("lunch_standard").is_ok());
        assert!(out.column("lunch_free/reduced").is_ok());
        assert_eq!(out.width(), 3);
    }

    #[test]
    fn test_one_hot_values() {
        let df = df!("g" => &["a", "b", "a"]).unwrap();

        let mut encoder = OneHotEncoder::new();
        encoder.fit(&df, &["g"]).unwrap();
        let out = encoder.transform(&df).unwrap();

        let a: Vec<f64> = out
            .column("g_a")
            .unwrap()
            .f64()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(a, vec![1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_unseen_category_is_error() {
        let train = df!("g" => &["a", "b"]).unwrap();
        let test = df!("g" => &["c"]).unwrap();

        let mut encoder = OneHotEncoder::new();
        encoder.fit(&train, &["g"]).unwrap();

        let err = encoder.transform(&test).unwrap_err();
        assert!(matches!(err, PipelineError::Transform(ref msg) if msg.contains("unseen")));
    }

    #[test]
    fn test_feature_names_are_sorted() {
        let df = df!("g" => &["b", "a"]).unwrap();

        let mut encoder = OneHotEncoder::new();
        encoder.fit(&df, &["g"]).unwrap();
        assert_eq!(encoder.feature_names(), vec!["g_a", "g_b"]);
    }
}
