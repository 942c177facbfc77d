//! Candidate training, selection, and persistence of the winner.

use std::path::PathBuf;

use ndarray::{s, Array1, Array2};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{
    r2_score, DecisionTreeRegressor, ElasticNetRegression, KnnRegressor, LassoRegression,
    LinearRegression, RegressionMetrics, RidgeRegression,
};
use crate::artifact::{self, ArtifactKind};
use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};

/// A trained candidate. The winning variant is what the artifact store
/// persists and the predict pipeline reloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CandidateModel {
    Linear(LinearRegression),
    Ridge(RidgeRegression),
    Lasso(LassoRegression),
    ElasticNet(ElasticNetRegression),
    Knn(KnnRegressor),
    DecisionTree(DecisionTreeRegressor),
}

impl CandidateModel {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear(_) => "linear_regression",
            Self::Ridge(_) => "ridge",
            Self::Lasso(_) => "lasso",
            Self::ElasticNet(_) => "elastic_net",
            Self::Knn(_) => "knn",
            Self::DecisionTree(_) => "decision_tree",
        }
    }

    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        match self {
            Self::Linear(m) => m.predict(x),
            Self::Ridge(m) => m.predict(x),
            Self::Lasso(m) => m.predict(x),
            Self::ElasticNet(m) => m.predict(x),
            Self::Knn(m) => m.predict(x),
            Self::DecisionTree(m) => m.predict(x),
        }
    }
}

/// One leaderboard row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateScore {
    pub model: String,
    pub r2: f64,
}

/// Outcome of a training run.
#[derive(Debug, Clone)]
pub struct TrainingReport {
    pub best_model: String,
    pub r2: f64,
    pub metrics: RegressionMetrics,
    pub leaderboard: Vec<CandidateScore>,
    pub model_path: PathBuf,
}

/// Fits the candidate set and persists the best scorer.
pub struct ModelTrainer {
    config: PipelineConfig,
}

impl ModelTrainer {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Train on `train`, evaluate on `test` (target in the last column of
    /// both), persist the winner, and return the report.
    pub fn run(&self, train: &Array2<f64>, test: &Array2<f64>) -> Result<TrainingReport> {
        let (x_train, y_train) = split_features_target(train)?;
        let (x_test, y_test) = split_features_target(test)?;

        info!(
            candidates = CANDIDATES.len(),
            train_rows = x_train.nrows(),
            test_rows = x_test.nrows(),
            features = x_train.ncols(),
            "starting model training"
        );

        let fitted: Vec<(&'static str, Result<CandidateModel>)> = CANDIDATES
            .par_iter()
            .map(|kind| (kind.name(), kind.fit(&x_train, &y_train)))
            .collect();

        let mut scored: Vec<(CandidateModel, f64)> = Vec::new();
        for (name, outcome) in fitted {
            match outcome {
                Ok(model) => {
                    let preds = model.predict(&x_test)?;
                    let r2 = r2_score(&y_test, &preds);
                    info!(model = name, r2, "candidate evaluated");
                    scored.push((model, r2));
                }
                Err(e) => warn!(model = name, error = %e, "candidate failed to train"),
            }
        }

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        let leaderboard: Vec<CandidateScore> = scored
            .iter()
            .map(|(model, r2)| CandidateScore {
                model: model.name().to_string(),
                r2: *r2,
            })
            .collect();

        let Some((best_model, best_r2)) = scored.into_iter().next() else {
            return Err(PipelineError::Training(
                "no candidate model could be trained".to_string(),
            ));
        };

        if best_r2 < self.config.min_model_score {
            return Err(PipelineError::Training(format!(
                "no candidate reached the minimum R² of {:.2}; best was {} at {:.4}",
                self.config.min_model_score,
                best_model.name(),
                best_r2
            )));
        }

        let preds = best_model.predict(&x_test)?;
        let metrics = RegressionMetrics::compute(&y_test, &preds);

        let model_path = self.config.model_path();
        artifact::save(&model_path, ArtifactKind::Model, &best_model)?;
        info!(
            model = best_model.name(),
            r2 = best_r2,
            path = %model_path.display(),
            "best model persisted"
        );

        Ok(TrainingReport {
            best_model: best_model.name().to_string(),
            r2: best_r2,
            metrics,
            leaderboard,
            model_path,
        })
    }
}

/// Candidate builders, fitted independently and in parallel.
#[derive(Debug, Clone, Copy)]
enum CandidateKind {
    Linear,
    Ridge,
    Lasso,
    ElasticNet,
    Knn,
    DecisionTree,
}

const CANDIDATES: [CandidateKind; 6] = [
    CandidateKind::Linear,
    CandidateKind::Ridge,
    CandidateKind::Lasso,
    CandidateKind::ElasticNet,
    CandidateKind::Knn,
    CandidateKind::DecisionTree,
];

impl CandidateKind {
    fn name(&self) -> &'static str {
        match self {
            Self::Linear => "linear_regression",
            Self::Ridge => "ridge",
            Self::Lasso => "lasso",
            Self::ElasticNet => "elastic_net",
            Self::Knn => "knn",
            Self::DecisionTree => "decision_tree",
        }
    }

    fn fit(&self, x: &Array2<f64>, y: &Array1<f64>) -> Result<CandidateModel> {
        Ok(match self {
            Self::Linear => {
                let mut model = LinearRegression::new();
                model.fit(x, y)?;
                CandidateModel::Linear(model)
            }
            Self::Ridge => {
                let mut model = RidgeRegression::new(1.0);
                model.fit(x, y)?;
                CandidateModel::Ridge(model)
            }
            Self::Lasso => {
                let mut model = LassoRegression::new(1.0);
                model.fit(x, y)?;
                CandidateModel::Lasso(model)
            }
            Self::ElasticNet => {
                let mut model = ElasticNetRegression::new(1.0, 0.5);
                model.fit(x, y)?;
                CandidateModel::ElasticNet(model)
            }
            Self::Knn => {
                let mut model = KnnRegressor::new(5);
                model.fit(x, y)?;
                CandidateModel::Knn(model)
            }
            Self::DecisionTree => {
                let mut model = DecisionTreeRegressor::new()
                    .with_max_depth(10)
                    .with_min_samples_leaf(2);
                model.fit(x, y)?;
                CandidateModel::DecisionTree(model)
            }
        })
    }
}

/// Split a matrix with the target in the last column into features/target.
fn split_features_target(data: &Array2<f64>) -> Result<(Array2<f64>, Array1<f64>)> {
    let n_cols = data.ncols();
    if n_cols < 2 {
        return Err(PipelineError::Shape {
            expected: "at least 2 columns (features + target)".to_string(),
            actual: format!("{n_cols} columns"),
        });
    }
    let x = data.slice(s![.., ..n_cols - 1]).to_owned();
    let y = data.column(n_cols - 1).to_owned();
    Ok((x, y))
}
