//! Preprocessing configuration

use serde::{Deserialize, Serialize};

use super::{ImputeStrategy, ScalerType};
use crate::config::TARGET_COLUMN;

/// Configuration for the column-wise preprocessor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessConfig {
    /// Strategy for missing numeric values.
    pub numeric_impute_strategy: ImputeStrategy,

    /// Strategy for missing categorical values.
    pub categorical_impute_strategy: ImputeStrategy,

    /// Scaler applied to numeric columns.
    pub numeric_scaler: ScalerType,

    /// Scaler applied to the one-hot block. Must not center, since one-hot
    /// output is binary.
    pub onehot_scaler: ScalerType,

    /// Target column, excluded from the feature matrix.
    pub target_column: String,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            numeric_impute_strategy: ImputeStrategy::Median,
            categorical_impute_strategy: ImputeStrategy::MostFrequent,
            numeric_scaler: ScalerType::Standard,
            onehot_scaler: ScalerType::MaxAbs,
            target_column: TARGET_COLUMN.to_string(),
        }
    }
}

impl PreprocessConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_numeric_impute(mut self, strategy: ImputeStrategy) -> Self {
        self.numeric_impute_strategy = strategy;
        self
    }

    pub fn with_numeric_scaler(mut self, scaler: ScalerType) -> Self {
        self.numeric_scaler = scaler;
        self
    }

    pub fn with_target_column(mut self, target: impl Into<String>) -> Self {
        self.target_column = target.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PreprocessConfig::default();
        assert_eq!(config.target_column, "math_score");
        assert!(matches!(config.numeric_impute_strategy, ImputeStrategy::Median));
        assert!(matches!(config.onehot_scaler, ScalerType::MaxAbs));
    }

    #[test]
    fn test_builder() {
        let config = PreprocessConfig::new()
            .with_numeric_scaler(ScalerType::MinMax)
            .with_target_column("final_grade");
        assert!(matches!(config.numeric_scaler, ScalerType::MinMax));
        assert_eq!(config.target_column, "final_grade");
    }
}
