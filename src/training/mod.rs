//! Model training: candidate regressors, evaluation, and selection.
//!
//! The trainer fits every candidate on the transformed training matrix,
//! scores each on the held-out test matrix by R², and persists the winner.
//! Falling short of the minimum acceptable score is an error, not a warning.

mod decision_tree;
mod knn;
mod linear_models;
mod metrics;
mod trainer;

pub use decision_tree::DecisionTreeRegressor;
pub use knn::{KnnRegressor, WeightScheme};
pub use linear_models::{
    ElasticNetRegression, LassoRegression, LinearRegression, RidgeRegression,
};
pub use metrics::{r2_score, RegressionMetrics};
pub use trainer::{CandidateModel, CandidateScore, ModelTrainer, TrainingReport};
