//! Error types for the analysis engine.
//!
//! Only caller mistakes surface as errors. Analyses that do not apply to the
//! dataset (a textual target, no numeric columns) return empty results, and
//! statistics over columns without values are reported as NaN.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Result alias used throughout the analysis pipeline.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Errors that can occur while analyzing a dataset.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A requested column (target or feature) does not exist in the dataset.
    #[error("Column '{name}' not found in dataset. Available columns: {available:?}")]
    ColumnNotFound {
        /// Name that was requested
        name: String,
        /// Columns present in the dataset
        available: Vec<String>,
    },

    /// A statistic that needs numbers was requested for a non-numeric column.
    #[error("Column '{name}' is not numeric (dtype: {dtype})")]
    NotNumeric {
        /// Column name
        name: String,
        /// Declared dtype of the column
        dtype: String,
    },

    /// The dataset has no columns, so no target can be resolved.
    #[error("Dataset has no columns")]
    NoColumns,

    /// Underlying polars failure while reading column data.
    #[error(transparent)]
    Polars(#[from] PolarsError),
}

impl AnalysisError {
    /// Build a `ColumnNotFound` error listing the dataset's columns.
    pub fn column_not_found(name: &str, df: &polars::prelude::DataFrame) -> Self {
        Self::ColumnNotFound {
            name: name.to_string(),
            available: df
                .get_column_names()
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}
