//! Target column resolution and value extraction
//!
//! The label column is picked heuristically by name. Its cells are surfaced as
//! [`TargetValue`]s so numeric and textual targets share one grouping path.

use std::cmp::Ordering;
use std::fmt;

use polars::prelude::*;
use serde::Serialize;
use tracing::debug;

use super::error::{AnalysisError, Result};

/// Substrings that mark a column as the label, checked in this order
pub const TARGET_NAME_PATTERNS: [&str; 3] = ["delinquent", "default", "target"];

/// A single target cell, used as a grouping key
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum TargetValue {
    Number(f64),
    Text(String),
    Missing,
}

impl TargetValue {
    fn rank(&self) -> u8 {
        match self {
            TargetValue::Number(_) => 0,
            TargetValue::Text(_) => 1,
            TargetValue::Missing => 2,
        }
    }

    /// True for a numeric cell equal to `value`
    pub fn is_number(&self, value: f64) -> bool {
        matches!(self, TargetValue::Number(v) if *v == value)
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, TargetValue::Missing)
    }
}

// Numbers sort before text, missing sorts last.
impl Ord for TargetValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            // -0.0 and 0.0 are the same class
            (TargetValue::Number(a), TargetValue::Number(b)) => {
                (a + 0.0).total_cmp(&(b + 0.0))
            }
            (TargetValue::Text(a), TargetValue::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for TargetValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for TargetValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TargetValue {}

impl fmt::Display for TargetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetValue::Number(v) => write!(f, "{}", v),
            TargetValue::Text(s) => write!(f, "{}", s),
            TargetValue::Missing => write!(f, "null"),
        }
    }
}

/// Look up a column, mapping absence to [`AnalysisError::ColumnNotFound`]
pub fn require_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name)
        .map_err(|_| AnalysisError::column_not_found(name, df))
}

/// Heuristically identify the label column.
///
/// Returns the first column (in dataset order) whose lower-cased name contains
/// any of [`TARGET_NAME_PATTERNS`]; falls back to the first column.
pub fn resolve_target(df: &DataFrame) -> Result<String> {
    let names = df.get_column_names();
    let first = names.first().ok_or(AnalysisError::NoColumns)?;

    let matched = names.iter().find(|name| {
        let lower = name.as_str().to_lowercase();
        TARGET_NAME_PATTERNS
            .iter()
            .any(|pattern| lower.contains(pattern))
    });

    let target = matched.unwrap_or(first).to_string();
    debug!(target_column = %target, heuristic = matched.is_some(), "Resolved target column");
    Ok(target)
}

/// Read the target column as grouping keys, one per row.
///
/// Numeric and boolean columns yield numbers (NaN counts as missing); all
/// other dtypes are rendered as text.
pub fn target_values(df: &DataFrame, target: &str) -> Result<Vec<TargetValue>> {
    let column = require_column(df, target)?;
    column_values(column)
}

fn column_values(column: &Column) -> Result<Vec<TargetValue>> {
    let dtype = column.dtype();
    if dtype.is_primitive_numeric() || dtype == &DataType::Boolean {
        let cast = column.cast(&DataType::Float64)?;
        let values = cast
            .f64()?
            .into_iter()
            .map(|v| match v {
                Some(x) if !x.is_nan() => TargetValue::Number(x + 0.0),
                _ => TargetValue::Missing,
            })
            .collect();
        Ok(values)
    } else {
        let cast = column.cast(&DataType::String)?;
        let values = cast
            .str()?
            .into_iter()
            .map(|v| match v {
                Some(s) => TargetValue::Text(s.to_string()),
                None => TargetValue::Missing,
            })
            .collect();
        Ok(values)
    }
}

/// Number of distinct non-missing target values
pub fn distinct_target_values(values: &[TargetValue]) -> usize {
    let mut distinct: Vec<&TargetValue> = values.iter().filter(|v| !v.is_missing()).collect();
    distinct.sort();
    distinct.dedup();
    distinct.len()
}
