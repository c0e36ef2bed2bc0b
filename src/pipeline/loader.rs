//! Dataset loader for CSV and Parquet files

use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;
use tracing::info;

/// Load a dataset from a file (CSV or Parquet based on extension).
///
/// `infer_schema_length` applies to CSV only; 0 scans the whole file.
/// Fails when the file holds no rows or no columns.
pub fn load_dataset(path: &Path, infer_schema_length: usize) -> Result<DataFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let lf = match extension.as_str() {
        "csv" => {
            let schema_length = if infer_schema_length == 0 {
                None
            } else {
                Some(infer_schema_length)
            };
            LazyCsvReader::new(path)
                .with_infer_schema_length(schema_length)
                .finish()
                .with_context(|| format!("Failed to load CSV file: {}", path.display()))?
        }
        "parquet" => LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?,
        _ => anyhow::bail!(
            "Unsupported file type: {}. Supported formats: csv, parquet",
            extension
        ),
    };

    let df = lf
        .collect()
        .with_context(|| format!("Failed to read data from '{}'", path.display()))?;

    if df.height() == 0 || df.width() == 0 {
        anyhow::bail!("Loaded dataset is empty: {}", path.display());
    }

    info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "Loaded dataset"
    );

    Ok(df)
}
