//! Complete exploratory analysis report
//!
//! Runs every analysis over one dataset snapshot, collects the results in a
//! serializable [`EdaReport`], and writes it out as JSON, a flat CSV summary,
//! and optionally a zip bundle of both.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use polars::prelude::*;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::pipeline::{
    self, assess_imbalance, classify_columns, correlation_with_target, dataset_overview,
    default_distribution_features, describe_by_target, describe_column, distribution_eligible,
    dtype_summary, full_correlation_matrix, group_means, imbalance_warning,
    imputation_guidance_for, model_recommendations, numeric_columns, profile_missing,
    sample_by_target, target_distribution, ColumnSummary, CorrelationReport, DatasetOverview,
    DescriptiveStats, DtypeCount, GroupMeans, ImbalanceAssessment, ImputationGuidance, MissingReport, ModelRecommendations,
    TargetDescription, TargetDistribution, DEFAULT_SAMPLE_SIZE,
};

/// How the target column was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetSource {
    /// Picked by the name heuristic
    Heuristic,
    /// Given on the command line or selected interactively
    User,
}

/// Inputs for building a report
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    pub input_file: String,
    pub target: String,
    pub target_source: TargetSource,
    /// Columns for per-class statistics; `None` picks the key features
    pub feature_columns: Option<Vec<String>>,
    /// Rows kept per class in the samples
    pub sample_size: usize,
}

impl AnalysisOptions {
    pub fn new(input_file: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            input_file: input_file.into(),
            target: target.into(),
            target_source: TargetSource::Heuristic,
            feature_columns: None,
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }
}

/// Report metadata
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub timestamp: String,
    pub riskscope_version: String,
    pub input_file: String,
    pub target_column: String,
    pub target_source: TargetSource,
}

/// Leading rows of each binary class, values as JSON scalars
#[derive(Debug, Clone, Default, Serialize)]
pub struct SampleRecords {
    pub columns: Vec<String>,
    pub positive: Vec<Vec<Value>>,
    pub negative: Vec<Vec<Value>>,
}

/// Full correlation matrix as nested rows
#[derive(Debug, Clone, Default, Serialize)]
pub struct MatrixSection {
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

/// Whole-dataset statistics of one numeric column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStats {
    pub column: String,
    #[serde(flatten)]
    pub stats: DescriptiveStats,
}

/// Everything computed for one dataset
#[derive(Debug, Clone, Serialize)]
pub struct EdaReport {
    pub metadata: ReportMetadata,
    pub overview: DatasetOverview,
    pub columns: Vec<ColumnSummary>,
    pub dtype_counts: Vec<DtypeCount>,
    pub numeric_summary: Vec<ColumnStats>,
    pub missing: MissingReport,
    /// Guidance for columns that have missing values
    pub imputation: Vec<&'static ImputationGuidance>,
    pub target_distribution: TargetDistribution,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imbalance: Option<ImbalanceAssessment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imbalance_warning: Option<f64>,
    pub samples: SampleRecords,
    pub group_means: GroupMeans,
    pub correlations: CorrelationReport,
    pub correlation_matrix: MatrixSection,
    pub feature_distributions: Vec<TargetDescription>,
    pub recommendations: ModelRecommendations,
}

impl EdaReport {
    /// Run all analyses in dependency order.
    ///
    /// Fails only when the target or a requested feature column is missing.
    pub fn build(df: &DataFrame, options: &AnalysisOptions) -> pipeline::Result<Self> {
        let target = options.target.as_str();

        let columns = classify_columns(df);
        let dtype_counts = dtype_summary(df);
        let overview = dataset_overview(df);
        let numeric_summary = numeric_columns(df)
            .into_iter()
            .map(|column| {
                describe_column(df, &column).map(|stats| ColumnStats { column, stats })
            })
            .collect::<pipeline::Result<Vec<_>>>()?;

        let missing = profile_missing(df)?;
        let imputation = missing
            .entries
            .iter()
            .filter_map(|e| imputation_guidance_for(&e.column))
            .collect();

        let distribution = target_distribution(df, target)?;
        let imbalance = assess_imbalance(&distribution);
        let warning = imbalance_warning(&distribution);

        let samples = sample_by_target(df, target, None, options.sample_size)?;
        let samples = SampleRecords {
            columns: samples
                .positive
                .get_column_names()
                .iter()
                .map(|s| s.to_string())
                .collect(),
            positive: frame_records(&samples.positive)?,
            negative: frame_records(&samples.negative)?,
        };
        let means = group_means(df, target, None)?;

        let correlations = correlation_with_target(df, target)?;
        let matrix = full_correlation_matrix(df)?;
        let correlation_matrix = MatrixSection {
            values: matrix.to_rows(),
            columns: matrix.columns,
        };

        let feature_distributions = if distribution_eligible(df, target)? {
            let features = match &options.feature_columns {
                Some(cols) => cols.clone(),
                None => default_distribution_features(df, target),
            };
            describe_features(df, target, &features)?
        } else {
            Vec::new()
        };

        let recommendations = model_recommendations(df, target)?;

        info!(
            target_column = target,
            missing_columns = missing.len(),
            correlated_features = correlations.len(),
            "Built EDA report"
        );

        Ok(Self {
            metadata: ReportMetadata {
                timestamp: Utc::now().to_rfc3339(),
                riskscope_version: env!("CARGO_PKG_VERSION").to_string(),
                input_file: options.input_file.clone(),
                target_column: target.to_string(),
                target_source: options.target_source,
            },
            overview,
            columns,
            dtype_counts,
            numeric_summary,
            missing,
            imputation,
            target_distribution: distribution,
            imbalance,
            imbalance_warning: warning,
            samples,
            group_means: means,
            correlations,
            correlation_matrix,
            feature_distributions,
            recommendations,
        })
    }
}

/// Per-class statistics for each requested feature; non-numeric ones are skipped
fn describe_features(
    df: &DataFrame,
    target: &str,
    features: &[String],
) -> pipeline::Result<Vec<TargetDescription>> {
    let mut descriptions = Vec::with_capacity(features.len());
    for feature in features {
        match describe_by_target(df, target, feature) {
            Ok(description) => descriptions.push(description),
            Err(pipeline::AnalysisError::NotNumeric { name, dtype }) => {
                warn!(column = %name, dtype = %dtype, "Skipping non-numeric feature");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(descriptions)
}

/// Rows of a frame as JSON scalars
fn frame_records(df: &DataFrame) -> pipeline::Result<Vec<Vec<Value>>> {
    let mut records = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let mut record = Vec::with_capacity(df.width());
        for column in df.get_columns() {
            record.push(any_value_to_json(column.get(row)?));
        }
        records.push(record);
    }
    Ok(records)
}

fn any_value_to_json(value: AnyValue) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(b) => Value::Bool(b),
        AnyValue::String(s) => Value::String(s.to_string()),
        AnyValue::StringOwned(s) => Value::String(s.to_string()),
        other => match other.extract::<f64>() {
            Some(v) => serde_json::Number::from_f64(v)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            None => Value::String(other.to_string()),
        },
    }
}

/// Export the report as pretty-printed JSON
pub fn export_report_json(report: &EdaReport, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create report file: {}", path.display()))?;
    serde_json::to_writer_pretty(file, report)
        .with_context(|| format!("Failed to write report JSON: {}", path.display()))?;
    Ok(())
}

/// Export a flat per-column summary as CSV.
///
/// Columns: column, dtype, kind, missing_count, missing_pct,
/// correlation_with_target, imputation_strategy.
pub fn export_summary_csv(report: &EdaReport, path: &Path) -> Result<()> {
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;

    writeln!(
        file,
        "column,dtype,kind,missing_count,missing_pct,correlation_with_target,imputation_strategy"
    )?;

    for column in &report.columns {
        let missing = report.missing.get(&column.name);
        let missing_count = missing.map(|m| m.null_count).unwrap_or(0);
        let missing_pct = missing.map(|m| m.null_percent).unwrap_or(0.0);
        let correlation = report
            .correlations
            .get(&column.name)
            .map(|c| format!("{:.4}", c))
            .unwrap_or_default();
        let strategy = imputation_guidance_for(&column.name)
            .filter(|_| missing.is_some())
            .map(|g| g.strategy)
            .unwrap_or("");

        writeln!(
            file,
            "{},{},{},{},{:.2},{},{}",
            escape_csv_field(&column.name),
            escape_csv_field(&column.dtype),
            column.kind,
            missing_count,
            missing_pct,
            correlation,
            escape_csv_field(strategy)
        )?;
    }

    Ok(())
}

/// Escape a field for CSV (handle commas and quotes)
fn escape_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Package the JSON report and CSV summary into a zip archive.
///
/// The individual files are removed once packaged.
pub fn package_reports(report_path: &Path, csv_path: &Path, zip_path: &Path) -> Result<()> {
    use std::io::Read;
    use ::zip::write::SimpleFileOptions;
    use ::zip::ZipWriter;

    let zip_file = std::fs::File::create(zip_path)
        .with_context(|| format!("Failed to create zip file: {}", zip_path.display()))?;

    let mut zip = ZipWriter::new(zip_file);
    let options = SimpleFileOptions::default()
        .compression_method(::zip::CompressionMethod::Deflated)
        .unix_permissions(0o644);

    let mut add_file_to_zip = |path: &Path, default_name: &str| -> Result<()> {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(default_name);
        zip.start_file(filename, options)
            .with_context(|| format!("Failed to add {} to zip", filename))?;
        let mut content = Vec::new();
        std::fs::File::open(path)
            .with_context(|| format!("Failed to open file: {}", path.display()))?
            .read_to_end(&mut content)?;
        zip.write_all(&content)?;
        Ok(())
    };

    add_file_to_zip(report_path, "eda_report.json")?;
    add_file_to_zip(csv_path, "eda_summary.csv")?;

    zip.finish().context("Failed to finalize zip file")?;

    std::fs::remove_file(report_path).ok();
    std::fs::remove_file(csv_path).ok();

    Ok(())
}
