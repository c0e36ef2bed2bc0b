//! Pearson correlation against the target and across numeric features
//!
//! Both analyses use pairwise-complete observations: a row only contributes
//! to a pair when both of its cells are present.

use faer::Mat;
use polars::prelude::*;
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use super::error::Result;
use super::schema::{float_values, is_numeric};
use super::target::require_column;

/// Correlation of one feature with the target
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetCorrelation {
    pub feature: String,
    pub correlation: f64,
}

/// Features ranked by signed correlation with the target, highest first
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CorrelationReport {
    pub target: String,
    pub correlations: Vec<TargetCorrelation>,
}

impl CorrelationReport {
    pub fn is_empty(&self) -> bool {
        self.correlations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.correlations.len()
    }

    pub fn get(&self, feature: &str) -> Option<f64> {
        self.correlations
            .iter()
            .find(|c| c.feature == feature)
            .map(|c| c.correlation)
    }
}

/// Symmetric correlation matrix over the numeric columns
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Mat<f64>,
}

impl CorrelationMatrix {
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Coefficient between two named columns
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.values[(i, j)])
    }

    /// Matrix as nested rows, for serialization
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.values.nrows())
            .map(|i| (0..self.values.ncols()).map(|j| self.values[(i, j)]).collect())
            .collect()
    }
}

/// Correlate every numeric feature with the target.
///
/// Returns an empty report when the target is not numeric. The target is left
/// out of its own report, and so are features whose coefficient is undefined
/// (fewer than two complete pairs or zero variance). Sorted descending by
/// signed coefficient; equal coefficients keep dataset column order.
pub fn correlation_with_target(df: &DataFrame, target: &str) -> Result<CorrelationReport> {
    let target_col = require_column(df, target)?;

    if !is_numeric(target_col) {
        debug!(target_column = target, "Target is not numeric, skipping correlation");
        return Ok(CorrelationReport {
            target: target.to_string(),
            correlations: Vec::new(),
        });
    }

    let target_values = float_values(target_col)?;
    let features = numeric_float_columns(df, Some(target))?;

    let mut correlations: Vec<TargetCorrelation> = features
        .par_iter()
        .filter_map(|(name, values)| {
            pairwise_pearson(values, &target_values).map(|correlation| TargetCorrelation {
                feature: name.clone(),
                correlation,
            })
        })
        .collect();

    // Stable sort on the column-ordered collection
    correlations.sort_by(|a, b| b.correlation.total_cmp(&a.correlation));

    debug!(
        target_column = target,
        features = correlations.len(),
        "Computed correlations with target"
    );

    Ok(CorrelationReport {
        target: target.to_string(),
        correlations,
    })
}

/// Correlation matrix over all numeric columns.
///
/// The diagonal is 1.0. Off-diagonal cells without a defined coefficient hold
/// NaN. Empty when the dataset has no numeric columns.
pub fn full_correlation_matrix(df: &DataFrame) -> Result<CorrelationMatrix> {
    let columns = numeric_float_columns(df, None)?;
    let n = columns.len();

    // Upper triangle pairs
    let pairs: Vec<(usize, usize)> = (0..n)
        .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
        .collect();

    let coefficients: Vec<f64> = pairs
        .par_iter()
        .map(|&(i, j)| pairwise_pearson(&columns[i].1, &columns[j].1).unwrap_or(f64::NAN))
        .collect();

    let mut values = Mat::<f64>::zeros(n, n);
    for i in 0..n {
        values[(i, i)] = 1.0;
    }
    for (&(i, j), &r) in pairs.iter().zip(coefficients.iter()) {
        values[(i, j)] = r;
        values[(j, i)] = r;
    }

    debug!(columns = n, "Computed full correlation matrix");

    Ok(CorrelationMatrix {
        columns: columns.into_iter().map(|(name, _)| name).collect(),
        values,
    })
}

/// Numeric columns as `f64` vectors, optionally skipping one column
fn numeric_float_columns(
    df: &DataFrame,
    exclude: Option<&str>,
) -> Result<Vec<(String, Vec<Option<f64>>)>> {
    df.get_columns()
        .iter()
        .filter(|col| is_numeric(col) && Some(col.name().as_str()) != exclude)
        .map(|col| -> Result<(String, Vec<Option<f64>>)> {
            Ok((col.name().to_string(), float_values(col)?))
        })
        .collect()
}

/// Pearson correlation over rows where both values are present.
///
/// `None` when fewer than two complete rows exist or either side is constant.
fn pairwise_pearson(x: &[Option<f64>], y: &[Option<f64>]) -> Option<f64> {
    let complete: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();

    let n = complete.len();
    if n < 2 {
        return None;
    }

    let mean_x = complete.iter().map(|(a, _)| a).sum::<f64>() / n as f64;
    let mean_y = complete.iter().map(|(_, b)| b).sum::<f64>() / n as f64;

    let mut cov_xy = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in &complete {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov_xy += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    let r = cov_xy / (var_x.sqrt() * var_y.sqrt());
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}
