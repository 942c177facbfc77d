//! Integration test: full train pipeline and predict pipeline

use scorecast::config::PipelineConfig;
use scorecast::error::PipelineError;
use scorecast::pipeline::{PredictPipeline, StudentRecord, TrainPipeline};

const RACES: [&str; 5] = ["group A", "group B", "group C", "group D", "group E"];
const EDUS: [&str; 6] = [
    "some high school",
    "high school",
    "some college",
    "associate's degree",
    "bachelor's degree",
    "master's degree",
];

/// Deterministic dataset with a strong linear signal so training clears the
/// score threshold.
fn write_source(config: &PipelineConfig, n: usize) {
    let mut csv = String::from(
        "gender,race_ethnicity,parental_level_of_education,lunch,test_preparation_course,reading_score,writing_score,math_score\n",
    );
    for i in 0..n {
        let gender = ["female", "male"][i % 2];
        let race = RACES[i % 5];
        let edu = EDUS[i % 6];
        let lunch = ["standard", "free/reduced"][(i / 3) % 2];
        let prep = ["none", "completed"][(i / 5) % 2];
        let reading = 35 + (i * 7) % 60;
        let writing = 33 + (i * 11) % 63;
        let bump = (i % 2) as f64 * 3.0 + ((i / 3) % 2) as f64 * 2.0;
        let math = (reading as f64 * 0.5 + writing as f64 * 0.4 + 6.0 + bump).round() as usize;
        csv.push_str(&format!(
            "{gender},{race},{edu},{lunch},{prep},{reading},{writing},{math}\n"
        ));
    }
    std::fs::write(&config.source_path, csv).unwrap();
}

fn sample_record() -> StudentRecord {
    StudentRecord {
        gender: "female".to_string(),
        race_ethnicity: "group B".to_string(),
        parental_level_of_education: "bachelor's degree".to_string(),
        lunch: "standard".to_string(),
        test_preparation_course: "none".to_string(),
        reading_score: 72.0,
        writing_score: 74.0,
    }
}

#[test]
fn test_train_pipeline_clears_threshold() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig::rooted_at(dir.path());
    write_source(&config, 150);

    let report = TrainPipeline::new(config.clone()).run().unwrap();

    assert!(report.r2.is_finite());
    assert!(report.r2 >= config.min_model_score);
    assert!(config.preprocessor_path().exists());
    assert!(config.model_path().exists());
}

#[test]
fn test_train_pipeline_is_reproducible() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig::rooted_at(dir.path());
    write_source(&config, 150);

    let first = TrainPipeline::new(config.clone()).run().unwrap();
    let second = TrainPipeline::new(config).run().unwrap();

    assert_eq!(first.best_model, second.best_model);
    assert!((first.r2 - second.r2).abs() < 1e-9);
}

#[test]
fn test_predict_after_training() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig::rooted_at(dir.path());
    write_source(&config, 150);

    TrainPipeline::new(config.clone()).run().unwrap();

    let prediction = PredictPipeline::new(config).predict(&sample_record()).unwrap();
    assert!(prediction.is_finite());
    // A mid-range student should land in a plausible score band.
    assert!(prediction > 20.0 && prediction < 110.0, "got {prediction}");
}

#[test]
fn test_predict_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig::rooted_at(dir.path());
    write_source(&config, 150);

    TrainPipeline::new(config.clone()).run().unwrap();

    let pipeline = PredictPipeline::new(config);
    let first = pipeline.predict(&sample_record()).unwrap();
    let second = pipeline.predict(&sample_record()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_predict_without_artifacts_is_artifact_missing() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig::rooted_at(dir.path());

    let err = PredictPipeline::new(config).predict(&sample_record()).unwrap_err();
    assert!(matches!(err, PipelineError::ArtifactMissing { .. }));
}

#[test]
fn test_retrain_overwrites_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig::rooted_at(dir.path());
    write_source(&config, 150);

    TrainPipeline::new(config.clone()).run().unwrap();
    let before = PredictPipeline::new(config.clone()).predict(&sample_record()).unwrap();

    // Retraining on the same data reproduces the same artifacts.
    TrainPipeline::new(config.clone()).run().unwrap();
    let after = PredictPipeline::new(config).predict(&sample_record()).unwrap();
    assert!((before - after).abs() < 1e-9);
}
