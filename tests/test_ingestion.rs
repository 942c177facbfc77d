//! Integration test: data ingestion (read → validate → split → persist)

use scorecast::config::PipelineConfig;
use scorecast::error::PipelineError;
use scorecast::ingestion::DataIngestion;
use scorecast::utils::read_csv;

fn write_source(config: &PipelineConfig, n: usize) {
    let mut csv = String::from("id,reading_score,writing_score,math_score\n");
    for i in 0..n {
        csv.push_str(&format!("{i},{},{},{}\n", 50 + i % 40, 48 + i % 45, 52 + i % 38));
    }
    std::fs::write(&config.source_path, csv).unwrap();
}

#[test]
fn test_ingestion_writes_all_three_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig::rooted_at(dir.path());
    write_source(&config, 50);

    let paths = DataIngestion::new(config.clone()).run().unwrap();

    assert!(config.raw_data_path().exists());
    assert!(paths.train.exists());
    assert!(paths.test.exists());
}

#[test]
fn test_split_counts_sum_and_rows_are_disjoint() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig::rooted_at(dir.path());
    write_source(&config, 73);

    let paths = DataIngestion::new(config.clone()).run().unwrap();

    let train = read_csv(&paths.train).unwrap();
    let test = read_csv(&paths.test).unwrap();
    assert_eq!(train.height() + test.height(), 73);

    let train_ids: Vec<i64> = train
        .column("id")
        .unwrap()
        .i64()
        .unwrap()
        .into_no_null_iter()
        .collect();
    let test_ids: Vec<i64> = test
        .column("id")
        .unwrap()
        .i64()
        .unwrap()
        .into_no_null_iter()
        .collect();

    for id in &test_ids {
        assert!(!train_ids.contains(id), "row {id} appears in both splits");
    }
}

#[test]
fn test_split_fraction_is_respected() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig::rooted_at(dir.path()).with_test_fraction(0.25);
    write_source(&config, 80);

    let paths = DataIngestion::new(config).run().unwrap();

    let test = read_csv(&paths.test).unwrap();
    assert_eq!(test.height(), 20);
}

#[test]
fn test_same_seed_reproduces_split() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig::rooted_at(dir.path());
    write_source(&config, 60);

    let paths = DataIngestion::new(config.clone()).run().unwrap();
    let first: Vec<i64> = read_csv(&paths.train)
        .unwrap()
        .column("id")
        .unwrap()
        .i64()
        .unwrap()
        .into_no_null_iter()
        .collect();

    let paths = DataIngestion::new(config).run().unwrap();
    let second: Vec<i64> = read_csv(&paths.train)
        .unwrap()
        .column("id")
        .unwrap()
        .i64()
        .unwrap()
        .into_no_null_iter()
        .collect();

    assert_eq!(first, second);
}

#[test]
fn test_missing_source_is_ingestion_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig::rooted_at(dir.path());

    let err = DataIngestion::new(config).run().unwrap_err();
    assert!(matches!(err, PipelineError::Ingestion(ref msg) if msg.contains("not found")));
}

#[test]
fn test_empty_source_is_ingestion_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig::rooted_at(dir.path());
    std::fs::write(
        &config.source_path,
        "id,reading_score,writing_score,math_score\n",
    )
    .unwrap();

    let err = DataIngestion::new(config).run().unwrap_err();
    assert!(matches!(err, PipelineError::Ingestion(ref msg) if msg.contains("empty")));
}
