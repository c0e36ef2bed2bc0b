//! Missing value profiling and imputation guidance

use polars::prelude::*;
use serde::Serialize;
use tracing::debug;

use super::error::Result;

/// Null statistics for a single column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingEntry {
    pub column: String,
    pub null_count: usize,
    /// `null_count / row_count * 100`
    pub null_percent: f64,
}

/// Columns with at least one missing cell, most-missing first
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MissingReport {
    pub entries: Vec<MissingEntry>,
    /// Missing cells summed over all reported columns
    pub total_missing: usize,
    /// `total_missing` as a share of every cell in the dataset
    pub percent_of_dataset: f64,
}

impl MissingReport {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entry for a column, if it has missing values
    pub fn get(&self, column: &str) -> Option<&MissingEntry> {
        self.entries.iter().find(|e| e.column == column)
    }
}

/// Count missing cells per column.
///
/// Nulls and floating-point NaN both count as missing. Columns without missing
/// cells are left out. Entries are sorted by percentage descending; ties keep
/// dataset column order.
pub fn profile_missing(df: &DataFrame) -> Result<MissingReport> {
    let rows = df.height();
    if rows == 0 {
        return Ok(MissingReport::default());
    }

    let mut entries: Vec<MissingEntry> = Vec::new();

    for column in df.get_columns() {
        let null_count = missing_count(column)?;
        if null_count == 0 {
            continue;
        }
        entries.push(MissingEntry {
            column: column.name().to_string(),
            null_count,
            null_percent: null_count as f64 / rows as f64 * 100.0,
        });
    }

    // Stable sort keeps column order for equal percentages
    entries.sort_by(|a, b| b.null_percent.total_cmp(&a.null_percent));

    let total_missing: usize = entries.iter().map(|e| e.null_count).sum();
    let total_cells = rows * df.width();
    let percent_of_dataset = total_missing as f64 / total_cells as f64 * 100.0;

    debug!(
        columns_with_missing = entries.len(),
        total_missing, "Profiled missing values"
    );

    Ok(MissingReport {
        entries,
        total_missing,
        percent_of_dataset,
    })
}

fn missing_count(column: &Column) -> Result<usize> {
    let nulls = column.null_count();
    let nans = match column.dtype() {
        DataType::Float32 | DataType::Float64 => {
            let cast = column.cast(&DataType::Float64)?;
            cast.f64()?
                .into_iter()
                .filter(|v| matches!(v, Some(x) if x.is_nan()))
                .count()
        }
        _ => 0,
    };
    Ok(nulls + nans)
}

/// Shared justification for median-based imputation
pub const MEDIAN_RATIONALE: &str = "Median is robust to outliers and maintains distribution shape \
better than mean for skewed financial data.";

/// Recommended treatment of missing values for a known column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImputationGuidance {
    pub column: &'static str,
    pub strategy: &'static str,
    /// Grouping column for stratified medians, if any
    pub stratify_by: Option<&'static str>,
    /// Missing share observed when the guidance was written
    pub observed_missing_percent: f64,
    pub note: &'static str,
    pub rationale: &'static str,
}

static IMPUTATION_GUIDANCE: [ImputationGuidance; 3] = [
    ImputationGuidance {
        column: "Income",
        strategy: "Median imputation, stratified by Employment_Status",
        stratify_by: Some("Employment_Status"),
        observed_missing_percent: 7.8,
        note: "Preserves group-level distributions",
        rationale: MEDIAN_RATIONALE,
    },
    ImputationGuidance {
        column: "Loan_Balance",
        strategy: "Median imputation, stratified by delinquency status",
        stratify_by: Some("Delinquent_Account"),
        observed_missing_percent: 5.8,
        note: "Avoids distortion in imbalanced datasets",
        rationale: MEDIAN_RATIONALE,
    },
    ImputationGuidance {
        column: "Credit_Score",
        strategy: "Straight median imputation",
        stratify_by: None,
        observed_missing_percent: 0.4,
        note: "Minimal missingness",
        rationale: MEDIAN_RATIONALE,
    },
];

/// All imputation guidance entries
pub fn imputation_guidance() -> &'static [ImputationGuidance] {
    &IMPUTATION_GUIDANCE
}

/// Guidance for one column; `None` means no specific guidance exists
pub fn imputation_guidance_for(column: &str) -> Option<&'static ImputationGuidance> {
    IMPUTATION_GUIDANCE.iter().find(|g| g.column == column)
}
