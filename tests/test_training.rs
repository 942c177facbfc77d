//! Integration test: model training, selection, and persistence

use ndarray::{s, Array2};
use scorecast::artifact::{self, ArtifactKind};
use scorecast::config::PipelineConfig;
use scorecast::error::PipelineError;
use scorecast::training::{CandidateModel, ModelTrainer};

/// y = 1.5*a + 0.7*b - 2, with a small deterministic wobble.
fn synthetic_split(n: usize) -> (Array2<f64>, Array2<f64>) {
    let rows: Vec<[f64; 3]> = (0..n)
        .map(|i| {
            let a = (i % 23) as f64;
            let b = ((i * 3) % 11) as f64;
            let wobble = ((i * 13) % 5) as f64 * 0.05;
            [a, b, 1.5 * a + 0.7 * b - 2.0 + wobble]
        })
        .collect();

    let flat: Vec<f64> = rows.iter().flatten().copied().collect();
    let all = Array2::from_shape_vec((n, 3), flat).unwrap();

    let cut = n * 4 / 5;
    (
        all.slice(s![..cut, ..]).to_owned(),
        all.slice(s![cut.., ..]).to_owned(),
    )
}

#[test]
fn test_training_persists_reloadable_winner() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig::rooted_at(dir.path());
    let (train, test) = synthetic_split(120);

    let report = ModelTrainer::new(config.clone()).run(&train, &test).unwrap();
    assert!(report.r2 > 0.9);

    let model: CandidateModel = artifact::load(&config.model_path(), ArtifactKind::Model).unwrap();
    assert_eq!(model.name(), report.best_model);

    // Reloaded model reproduces the winning score.
    let n_cols = test.ncols();
    let x_test = test.slice(s![.., ..n_cols - 1]).to_owned();
    let y_test = test.column(n_cols - 1).to_owned();
    let preds = model.predict(&x_test).unwrap();
    let r2 = scorecast::training::r2_score(&y_test, &preds);
    assert!((r2 - report.r2).abs() < 1e-9);
}

#[test]
fn test_training_is_reproducible() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig::rooted_at(dir.path());
    let (train, test) = synthetic_split(120);

    let first = ModelTrainer::new(config.clone()).run(&train, &test).unwrap();
    let second = ModelTrainer::new(config).run(&train, &test).unwrap();

    assert_eq!(first.best_model, second.best_model);
    assert!((first.r2 - second.r2).abs() < 1e-12);
}

#[test]
fn test_unreachable_threshold_is_training_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig::rooted_at(dir.path()).with_min_model_score(1.1);
    let (train, test) = synthetic_split(120);

    let err = ModelTrainer::new(config.clone()).run(&train, &test).unwrap_err();
    assert!(matches!(err, PipelineError::Training(_)));

    // A failed run must not leave a model artifact behind.
    assert!(!config.model_path().exists());
}

#[test]
fn test_leaderboard_covers_every_candidate() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig::rooted_at(dir.path());
    let (train, test) = synthetic_split(120);

    let report = ModelTrainer::new(config).run(&train, &test).unwrap();
    assert_eq!(report.leaderboard.len(), 6);

    let names: Vec<&str> = report.leaderboard.iter().map(|e| e.model.as_str()).collect();
    for expected in [
        "linear_regression",
        "ridge",
        "lasso",
        "elastic_net",
        "knn",
        "decision_tree",
    ] {
        assert!(names.contains(&expected), "missing candidate {expected}");
    }
}
