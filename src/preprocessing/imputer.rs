//! Missing-value imputation with train-time fill values.

use std::collections::HashMap;

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};

/// How to compute the fill value for a column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ImputeStrategy {
    Mean,
    Median,
    MostFrequent,
}

/// Fill value computed at fit time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FillValue {
    Number(f64),
    Text(String),
}

/// Column imputer. Fill values are estimated once from the training split
/// and reapplied verbatim to every later frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Imputer {
    strategy: ImputeStrategy,
    fill: HashMap<String, FillValue>,
    is_fitted: bool,
}

impl Imputer {
    pub fn new(strategy: ImputeStrategy) -> Self {
        Self {
            strategy,
            fill: HashMap::new(),
            is_fitted: false,
        }
    }

    pub fn fit(&mut self, df: &DataFrame, columns: &[&str]) -> Result<&mut Self> {
        for col_name in columns {
            let column = df
                .column(col_name)
                .map_err(|_| PipelineError::ColumnNotFound(col_name.to_string()))?;
            let series = column.as_materialized_series();

            let value = match series.dtype() {
                DataType::String => FillValue::Text(Self::most_frequent_text(series)?),
                _ => FillValue::Number(self.numeric_fill(series)?),
            };
            self.fill.insert(col_name.to_string(), value);
        }

        self.is_fitted = true;
        Ok(self)
    }

    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        if !self.is_fitted {
            return Err(PipelineError::NotFitted);
        }

        let mut result = df.clone();
        for (col_name, fill) in &self.fill {
            let Ok(column) = df.column(col_name) else {
                continue;
            };
            let series = column.as_materialized_series();
            if series.null_count() == 0 {
                continue;
            }

            let filled = match fill {
                FillValue::Number(v) => {
                    let ca = series
                        .f64()
                        .map_err(|e| PipelineError::Transform(e.to_string()))?;
                    let out: Float64Chunked =
                        ca.into_iter().map(|opt| Some(opt.unwrap_or(*v))).collect();
                    out.with_name(series.name().clone()).into_series()
                }
                FillValue::Text(v) => {
                    let ca = series
                        .str()
                        .map_err(|e| PipelineError::Transform(e.to_string()))?;
                    let out: StringChunked = ca
                        .into_iter()
                        .map(|opt| Some(opt.unwrap_or(v.as_str())))
                        .collect();
                    out.with_name(series.name().clone()).into_series()
                }
            };

            result = result
                .with_column(filled)
                .map_err(PipelineError::Data)?
                .clone();
        }

        Ok(result)
    }

    fn numeric_fill(&self, series: &Series) -> Result<f64> {
        let ca = series
            .f64()
            .map_err(|e| PipelineError::Transform(e.to_string()))?;
        let value = match self.strategy {
            ImputeStrategy::Mean => ca.mean(),
            ImputeStrategy::Median => ca.median(),
            ImputeStrategy::MostFrequent => {
                // Mode over the float bits; ties broken by smallest value.
                let mut counts: HashMap<u64, (f64, usize)> = HashMap::new();
                for v in ca.into_no_null_iter() {
                    counts.entry(v.to_bits()).or_insert((v, 0)).1 += 1;
                }
                counts
                    .into_values()
                    .max_by(|a, b| {
                        a.1.cmp(&b.1).then(
                            b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal),
                        )
                    })
                    .map(|(v, _)| v)
            }
        };
        value.ok_or_else(|| {
            PipelineError::Transform(format!(
                "cannot compute fill value for all-null column '{}'",
                series.name()
            ))
        })
    }

    fn most_frequent_text(series: &Series) -> Result<String> {
        let ca = series
            .str()
            .map_err(|e| PipelineError::Transform(e.to_string()))?;
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for v in ca.into_no_null_iter() {
            *counts.entry(v).or_insert(0) += 1;
        }
        counts
            .into_iter()
            .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(a.0)))
            .map(|(v, _)| v.to_string())
            .ok_or_else(|| {
                PipelineError::Transform(format!(
                    "cannot compute fill value for all-null column '{}'",
                    series.name()
                ))
            })
    }
}
