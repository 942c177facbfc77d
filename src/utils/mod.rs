//! Shared CSV helpers.

use std::path::Path;

use polars::prelude::*;

use crate::error::Result;

/// Read a CSV file with a header row into a DataFrame.
pub fn read_csv(path: &Path) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_infer_schema_length(Some(1000))
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    Ok(df)
}

/// Write a DataFrame to a CSV file with a header row, creating parent
/// directories as needed.
pub fn write_csv(df: &DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::fs::File::create(path)?;
    CsvWriter::new(&mut file).finish(&mut df.clone())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.csv");

        let df = df!(
            "name" => &["a", "b"],
            "score" => &[1.5, 2.5]
        )
        .unwrap();

        write_csv(&df, &path).unwrap();
        let back = read_csv(&path).unwrap();
        assert_eq!(back.height(), 2);
        assert_eq!(back.width(), 2);
    }
}
