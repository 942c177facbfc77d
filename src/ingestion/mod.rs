//! Data ingestion: read the source CSV, validate it, persist the raw copy
//! and the seeded train/test splits.

use std::path::PathBuf;

use polars::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::info;

use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::utils::{read_csv, write_csv};

/// Paths of the persisted train/test splits.
#[derive(Debug, Clone)]
pub struct SplitPaths {
    pub train: PathBuf,
    pub test: PathBuf,
}

/// Reads the source dataset and produces the train/test splits.
pub struct DataIngestion {
    config: PipelineConfig,
}

impl DataIngestion {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Run ingestion: validate the source, write the raw copy, split, and
    /// write both splits. Returns the split paths.
    pub fn run(&self) -> Result<SplitPaths> {
        let source = &self.config.source_path;
        info!(source = %source.display(), "starting data ingestion");

        if !source.exists() {
            return Err(PipelineError::Ingestion(format!(
                "source data file not found: {}",
                source.display()
            )));
        }

        let df = read_csv(source)?;
        if df.height() == 0 {
            return Err(PipelineError::Ingestion(format!(
                "dataset is empty: {}",
                source.display()
            )));
        }

        info!(rows = df.height(), columns = df.width(), "read source dataset");

        let raw_path = self.config.raw_data_path();
        write_csv(&df, &raw_path)?;

        let (train, test) = self.train_test_split(&df)?;
        info!(
            train_rows = train.height(),
            test_rows = test.height(),
            seed = self.config.seed,
            "split dataset"
        );

        let paths = SplitPaths {
            train: self.config.train_data_path(),
            test: self.config.test_data_path(),
        };
        write_csv(&train, &paths.train)?;
        write_csv(&test, &paths.test)?;

        info!("data ingestion completed");
        Ok(paths)
    }

    /// Seeded shuffle split. The test split takes `ceil(n * test_fraction)`
    /// rows; train and test partition the source rows exactly.
    fn train_test_split(&self, df: &DataFrame) -> Result<(DataFrame, DataFrame)> {
        let n = df.height();
        let mut indices: Vec<u32> = (0..n as u32).collect();

        let mut rng = StdRng::seed_from_u64(self.config.seed);
        indices.shuffle(&mut rng);

        let test_size = ((n as f64) * self.config.test_fraction).ceil() as usize;
        let test_size = test_size.min(n);
        let (test_idx, train_idx) = indices.split_at(test_size);

        let train_ca = UInt32Chunked::from_vec("idx".into(), train_idx.to_vec());
        let test_ca = UInt32Chunked::from_vec("idx".into(), test_idx.to_vec());

        let train = df.take(&train_ca)?;
        let test = df.take(&test_ca)?;
        Ok((train, test))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame(n: usize) -> DataFrame {
        let ids: Vec<i64> = (0..n as i64).collect();
        let scores: Vec<f64> = (0..n).map(|i| 50.0 + i as f64).collect();
        df!("id" => &ids, "score" => &scores).unwrap()
    }

    fn config_in(dir: &std::path::Path) -> PipelineConfig {
        PipelineConfig::rooted_at(dir)
    }

    #[test]
    fn test_split_partitions_rows() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let ingestion = DataIngestion::new(config.clone());

        let df = sample_frame(25);
        let (train, test) = ingestion.train_test_split(&df).unwrap();

        assert_eq!(train.height() + test.height(), 25);
        assert_eq!(test.height(), 5);
    }

    #[test]
    fn test_split_is_seeded() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let df = sample_frame(40);

        let a = DataIngestion::new(config.clone()).train_test_split(&df).unwrap();
        let b = DataIngestion::new(config).train_test_split(&df).unwrap();

        let ids_a: Vec<i64> = a.0.column("id").unwrap().i64().unwrap().into_no_null_iter().collect();
        let ids_b: Vec<i64> = b.0.column("id").unwrap().i64().unwrap().into_no_null_iter().collect();
        assert_eq!(ids_a, ids_b);
    }

    #[test]
    fn test_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let err = DataIngestion::new(config).run().unwrap_err();
        assert!(matches!(err, PipelineError::Ingestion(ref msg) if msg.contains("not found")));
    }

    #[test]
    fn test_empty_source() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        std::fs::write(&config.source_path, "id,score\n").unwrap();

        let err = DataIngestion::new(config).run().unwrap_err();
        assert!(matches!(err, PipelineError::Ingestion(ref msg) if msg.contains("empty")));
    }
}
