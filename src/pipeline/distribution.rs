//! Target distribution and per-class feature statistics
//!
//! Everything here groups rows by [`TargetValue`]. The distribution keeps a
//! group for missing targets; the per-class statistics drop it, matching the
//! usual group-by semantics.

use std::collections::BTreeMap;

use polars::prelude::*;
use serde::Serialize;
use tracing::debug;

use super::error::{AnalysisError, Result};
use super::schema::{float_values, is_numeric, numeric_columns};
use super::target::{distinct_target_values, require_column, target_values, TargetValue};

/// Rows shown per class by [`sample_by_target`]
pub const DEFAULT_SAMPLE_SIZE: usize = 5;

/// Columns shown in class samples when the caller does not choose; the target
/// column is appended
pub const DEFAULT_SAMPLE_COLUMNS: [&str; 4] =
    ["Customer_ID", "Missed_Payments", "Credit_Score", "Income"];

/// Columns compared by [`group_means`] when the caller does not choose
pub const DEFAULT_COMPARE_COLUMNS: [&str; 3] = ["Missed_Payments", "Credit_Score", "Income"];

/// Preferred features for per-class distribution displays
pub const KEY_DISTRIBUTION_FEATURES: [&str; 6] = [
    "Age",
    "Income",
    "Credit_Score",
    "Credit_Utilization",
    "Debt_to_Income_Ratio",
    "Missed_Payments",
];

/// Per-class distributions are only shown for targets with at most this many classes
pub const MAX_TARGET_CLASSES_FOR_DISTRIBUTION: usize = 10;

/// Count and share of one target value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetClass {
    pub value: TargetValue,
    pub count: usize,
    /// Share of all rows, rounded to two decimals
    pub percent: f64,
}

/// Target value counts, sorted by value ascending (missing last)
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TargetDistribution {
    pub target: String,
    pub classes: Vec<TargetClass>,
}

impl TargetDistribution {
    /// Number of distinct groups, a missing-target group included
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn is_binary(&self) -> bool {
        self.classes.len() == 2
    }

    /// Raw counts in value order
    pub fn raw_counts(&self) -> Vec<(TargetValue, usize)> {
        self.classes
            .iter()
            .map(|c| (c.value.clone(), c.count))
            .collect()
    }

    pub fn total(&self) -> usize {
        self.classes.iter().map(|c| c.count).sum()
    }
}

/// Leading rows of each binary class
#[derive(Debug, Clone)]
pub struct TargetSamples {
    /// Rows where the target equals 1
    pub positive: DataFrame,
    /// Rows where the target equals 0
    pub negative: DataFrame,
}

/// Mean of each compared column for one target value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMeanRow {
    pub value: TargetValue,
    /// One entry per compared column; NaN when the group has no values
    pub means: Vec<f64>,
}

/// Per-class means of the compared columns
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GroupMeans {
    pub columns: Vec<String>,
    pub groups: Vec<GroupMeanRow>,
}

impl GroupMeans {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Mean of `column` within the group for `value`
    pub fn get(&self, value: &TargetValue, column: &str) -> Option<f64> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.groups
            .iter()
            .find(|g| &g.value == value)
            .map(|g| g.means[idx])
    }
}

/// Standard descriptive statistics over non-null values.
///
/// With no values every field except `count` is NaN; `std` needs two values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DescriptiveStats {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator)
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Descriptive statistics of one column for each target value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetDescription {
    pub column: String,
    pub groups: Vec<(TargetValue, DescriptiveStats)>,
}

/// Count each target value and its share of all rows.
///
/// Missing target cells form their own group, sorted after all values.
pub fn target_distribution(df: &DataFrame, target: &str) -> Result<TargetDistribution> {
    let values = target_values(df, target)?;
    let total = values.len();

    let mut counts: BTreeMap<TargetValue, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }

    let classes: Vec<TargetClass> = counts
        .into_iter()
        .map(|(value, count)| TargetClass {
            value,
            count,
            percent: round2(count as f64 / total as f64 * 100.0),
        })
        .collect();

    debug!(target_column = target, classes = classes.len(), "Computed target distribution");

    Ok(TargetDistribution {
        target: target.to_string(),
        classes,
    })
}

/// Leading rows where the target is 1 and where it is 0.
///
/// `columns` restricts the displayed columns; `None` uses
/// [`DEFAULT_SAMPLE_COLUMNS`] plus the target. Requested columns absent from
/// the dataset are skipped, and when none of them exist the defaults are used
/// instead. Dataset row order is preserved.
pub fn sample_by_target(
    df: &DataFrame,
    target: &str,
    columns: Option<&[&str]>,
    limit: usize,
) -> Result<TargetSamples> {
    let values = target_values(df, target)?;

    let defaults = || {
        let mut cols: Vec<&str> = DEFAULT_SAMPLE_COLUMNS.to_vec();
        cols.push(target);
        cols
    };
    let requested: Vec<&str> = columns.map(|c| c.to_vec()).unwrap_or_else(defaults);
    let mut available = present_columns(df, &requested);
    if available.is_empty() {
        debug!(target_column = target, "No requested sample columns present, using defaults");
        available = present_columns(df, &defaults());
    }
    let projected = df.select(available)?;

    let positive = rows_matching(&projected, &values, 1.0, limit)?;
    let negative = rows_matching(&projected, &values, 0.0, limit)?;

    Ok(TargetSamples { positive, negative })
}

fn rows_matching(
    df: &DataFrame,
    values: &[TargetValue],
    wanted: f64,
    limit: usize,
) -> Result<DataFrame> {
    let flags: Vec<bool> = values.iter().map(|v| v.is_number(wanted)).collect();
    let mask = Series::new("mask".into(), flags);
    let matched = df.filter(mask.bool()?)?;
    Ok(matched.head(Some(limit)))
}

/// Requested names that exist in the dataset, first occurrence only
fn present_columns(df: &DataFrame, requested: &[&str]) -> Vec<String> {
    let mut available: Vec<String> = Vec::new();
    for name in requested {
        if df.column(name).is_ok() && !available.iter().any(|c| c == name) {
            available.push(name.to_string());
        }
    }
    available
}

/// Mean of each requested numeric column per target value.
///
/// `columns` of `None` uses [`DEFAULT_COMPARE_COLUMNS`]. Absent or non-numeric
/// columns are skipped; if none remain the result is empty. Rows with a
/// missing target are not grouped.
pub fn group_means(df: &DataFrame, target: &str, columns: Option<&[&str]>) -> Result<GroupMeans> {
    let values = target_values(df, target)?;

    let requested: Vec<&str> = columns
        .map(|c| c.to_vec())
        .unwrap_or_else(|| DEFAULT_COMPARE_COLUMNS.to_vec());
    let available: Vec<String> = present_columns(df, &requested)
        .into_iter()
        .filter(|name| df.column(name).map(is_numeric).unwrap_or(false))
        .collect();

    if available.is_empty() {
        return Ok(GroupMeans::default());
    }

    let groups = group_rows(&values);
    let mut column_values: Vec<Vec<Option<f64>>> = Vec::with_capacity(available.len());
    for name in &available {
        column_values.push(float_values(require_column(df, name)?)?);
    }

    let rows = groups
        .into_iter()
        .map(|(value, indices)| {
            let means = column_values
                .iter()
                .map(|col| {
                    let present: Vec<f64> = indices.iter().filter_map(|&i| col[i]).collect();
                    mean(&present)
                })
                .collect();
            GroupMeanRow { value, means }
        })
        .collect();

    Ok(GroupMeans {
        columns: available,
        groups: rows,
    })
}

/// Count, mean, standard deviation, min, quartiles and max of `column` for
/// each target value, over non-null values.
pub fn describe_by_target(
    df: &DataFrame,
    target: &str,
    column: &str,
) -> Result<TargetDescription> {
    let values = target_values(df, target)?;
    let col = require_column(df, column)?;
    if !is_numeric(col) {
        return Err(AnalysisError::NotNumeric {
            name: column.to_string(),
            dtype: col.dtype().to_string(),
        });
    }
    let data = float_values(col)?;

    let groups = group_rows(&values)
        .into_iter()
        .map(|(value, indices)| {
            let present: Vec<f64> = indices.iter().filter_map(|&i| data[i]).collect();
            (value, describe(&present))
        })
        .collect();

    Ok(TargetDescription {
        column: column.to_string(),
        groups,
    })
}

/// Descriptive statistics of a numeric column over all rows
pub fn describe_column(df: &DataFrame, column: &str) -> Result<DescriptiveStats> {
    let col = require_column(df, column)?;
    if !is_numeric(col) {
        return Err(AnalysisError::NotNumeric {
            name: column.to_string(),
            dtype: col.dtype().to_string(),
        });
    }
    let present: Vec<f64> = float_values(col)?.into_iter().flatten().collect();
    Ok(describe(&present))
}

/// Whether per-class distributions apply: numeric columns exist and the
/// target has at most [`MAX_TARGET_CLASSES_FOR_DISTRIBUTION`] distinct values
pub fn distribution_eligible(df: &DataFrame, target: &str) -> Result<bool> {
    if numeric_columns(df).is_empty() {
        return Ok(false);
    }
    let values = target_values(df, target)?;
    Ok(distinct_target_values(&values) <= MAX_TARGET_CLASSES_FOR_DISTRIBUTION)
}

/// Default features for per-class distributions.
///
/// The first three [`KEY_DISTRIBUTION_FEATURES`] that are numeric and not the
/// target; otherwise the first three numeric columns.
pub fn default_distribution_features(df: &DataFrame, target: &str) -> Vec<String> {
    let numeric = numeric_columns(df);
    let key: Vec<String> = KEY_DISTRIBUTION_FEATURES
        .iter()
        .filter(|f| **f != target && numeric.iter().any(|n| n == *f))
        .map(|f| f.to_string())
        .collect();

    let chosen = if key.is_empty() { numeric } else { key };
    chosen.into_iter().take(3).collect()
}

/// Row indices per non-missing target value, in value order
fn group_rows(values: &[TargetValue]) -> BTreeMap<TargetValue, Vec<usize>> {
    let mut groups: BTreeMap<TargetValue, Vec<usize>> = BTreeMap::new();
    for (idx, value) in values.iter().enumerate() {
        if value.is_missing() {
            continue;
        }
        groups.entry(value.clone()).or_default().push(idx);
    }
    groups
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn describe(values: &[f64]) -> DescriptiveStats {
    let count = values.len();
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let avg = mean(values);
    let std = if count < 2 {
        f64::NAN
    } else {
        let ss: f64 = values.iter().map(|v| (v - avg).powi(2)).sum();
        (ss / (count - 1) as f64).sqrt()
    };

    DescriptiveStats {
        count,
        mean: avg,
        std,
        min: sorted.first().copied().unwrap_or(f64::NAN),
        q25: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q75: quantile(&sorted, 0.75),
        max: sorted.last().copied().unwrap_or(f64::NAN),
    }
}

/// Linear-interpolated quantile of sorted values
fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
