//! K-nearest-neighbors regression.

use ndarray::{Array1, Array2};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};

/// Neighbor weighting scheme.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WeightScheme {
    /// All neighbors weigh equally.
    Uniform,
    /// Closer neighbors weigh more (inverse distance).
    Distance,
}

impl Default for WeightScheme {
    fn default() -> Self {
        Self::Uniform
    }
}

/// KNN regressor over Euclidean distance. Fitting stores the training data;
/// prediction averages the k nearest targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnnRegressor {
    pub n_neighbors: usize,
    pub weights: WeightScheme,
    x_train: Option<Array2<f64>>,
    y_train: Option<Array1<f64>>,
    is_fitted: bool,
}

impl KnnRegressor {
    pub fn new(n_neighbors: usize) -> Self {
        Self {
            n_neighbors: n_neighbors.max(1),
            weights: WeightScheme::default(),
            x_train: None,
            y_train: None,
            is_fitted: false,
        }
    }

    pub fn with_weights(mut self, weights: WeightScheme) -> Self {
        self.weights = weights;
        self
    }

    pub fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<&mut Self> {
        if x.nrows() != y.len() {
            return Err(PipelineError::Shape {
                expected: format!("y length = {}", x.nrows()),
                actual: format!("y length = {}", y.len()),
            });
        }
        if x.nrows() == 0 {
            return Err(PipelineError::Training(
                "cannot fit KNN on an empty training set".to_string(),
            ));
        }

        self.x_train = Some(x.clone());
        self.y_train = Some(y.clone());
        self.is_fitted = true;
        Ok(self)
    }

    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        if !self.is_fitted {
            return Err(PipelineError::NotFitted);
        }
        let x_train = self.x_train.as_ref().unwrap();
        let y_train = self.y_train.as_ref().unwrap();
        let k = self.n_neighbors.min(x_train.nrows());

        let predictions: Vec<f64> = x
            .rows()
            .into_iter()
            .collect::<Vec<_>>()
            .into_par_iter()
            .map(|row| {
                let mut neighbors: Vec<(f64, f64)> = x_train
                    .rows()
                    .into_iter()
                    .zip(y_train.iter())
                    .map(|(train_row, &target)| {
                        let dist = row
                            .iter()
                            .zip(train_row.iter())
                            .map(|(a, b)| (a - b).powi(2))
                            .sum::<f64>()
                            .sqrt();
                        (dist, target)
                    })
                    .collect();

                neighbors.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
                neighbors.truncate(k);

                match self.weights {
                    WeightScheme::Uniform => {
                        neighbors.iter().map(|(_, t)| t).sum::<f64>() / k as f64
                    }
                    WeightScheme::Distance => {
                        // An exact hit dominates; avoids division by zero.
                        if let Some((_, t)) = neighbors.iter().find(|(d, _)| *d < 1e-12) {
                            *t
                        } else {
                            let weight_sum: f64 = neighbors.iter().map(|(d, _)| 1.0 / d).sum();
                            neighbors.iter().map(|(d, t)| t / d).sum::<f64>() / weight_sum
                        }
                    }
                }
            })
            .collect();

        Ok(Array1::from_vec(predictions))
    }
}
