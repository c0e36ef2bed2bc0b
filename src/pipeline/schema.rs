//! Schema inspection - column classification and dataset overview

use polars::prelude::*;
use serde::Serialize;
use tracing::debug;

use super::error::Result;

/// Declared type class of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    NonNumeric,
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnKind::Numeric => write!(f, "numeric"),
            ColumnKind::NonNumeric => write!(f, "non-numeric"),
        }
    }
}

/// Name, declared type and null presence of a single column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    /// Polars dtype as displayed (e.g. `i64`, `str`)
    pub dtype: String,
    pub kind: ColumnKind,
    /// True when the column holds at least one null
    pub nullable: bool,
}

/// Number of columns sharing a declared dtype
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DtypeCount {
    pub dtype: String,
    pub count: usize,
}

/// Basic shape and size of the dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetOverview {
    pub total_records: usize,
    pub total_columns: usize,
    pub memory_usage_kb: f64,
}

/// Whether a column counts as numeric for correlation and statistics.
///
/// Booleans, strings and temporal types are non-numeric.
pub fn is_numeric(column: &Column) -> bool {
    column.dtype().is_primitive_numeric()
}

/// Read a numeric column as `f64`, with nulls and NaN as `None`
pub(crate) fn float_values(column: &Column) -> Result<Vec<Option<f64>>> {
    let cast = column.cast(&DataType::Float64)?;
    let values = cast
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect();
    Ok(values)
}

/// Classify every column by declared type, in dataset order
pub fn classify_columns(df: &DataFrame) -> Vec<ColumnSummary> {
    df.get_columns()
        .iter()
        .map(|col| ColumnSummary {
            name: col.name().to_string(),
            dtype: col.dtype().to_string(),
            kind: if is_numeric(col) {
                ColumnKind::Numeric
            } else {
                ColumnKind::NonNumeric
            },
            nullable: col.null_count() > 0,
        })
        .collect()
}

/// Names of the numeric columns, in dataset order
pub fn numeric_columns(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|col| is_numeric(col))
        .map(|col| col.name().to_string())
        .collect()
}

/// Count columns per declared dtype.
///
/// Sorted by count descending; dtypes with equal counts keep the order in
/// which they first appear in the dataset.
pub fn dtype_summary(df: &DataFrame) -> Vec<DtypeCount> {
    let mut counts: Vec<DtypeCount> = Vec::new();

    for col in df.get_columns() {
        let dtype = col.dtype().to_string();
        match counts.iter_mut().find(|c| c.dtype == dtype) {
            Some(entry) => entry.count += 1,
            None => counts.push(DtypeCount { dtype, count: 1 }),
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    debug!(distinct_dtypes = counts.len(), "Computed dtype summary");
    counts
}

/// Row count, column count and estimated in-memory size
pub fn dataset_overview(df: &DataFrame) -> DatasetOverview {
    let (rows, cols) = df.shape();
    DatasetOverview {
        total_records: rows,
        total_columns: cols,
        memory_usage_kb: df.estimated_size() as f64 / 1024.0,
    }
}
