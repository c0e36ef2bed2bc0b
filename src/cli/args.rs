//! Command-line argument definitions using clap

use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};

/// riskscope - Exploratory analysis and modeling guidance for delinquency datasets
#[derive(Parser, Debug)]
#[command(name = "riskscope")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Input file path (CSV or Parquet)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Target column name.
    /// If not provided, a column whose name contains "delinquent", "default"
    /// or "target" is proposed and can be confirmed interactively.
    #[arg(short, long)]
    pub target: Option<String>,

    /// Numeric columns to describe per target class (comma-separated).
    /// Defaults to up to three key credit features.
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,

    /// Rows shown per target class in the sample tables
    #[arg(long, default_value = "5")]
    pub sample_size: usize,

    /// Report output path (JSON).
    /// Defaults to input directory with '_eda_report.json' suffix.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Package the JSON report and CSV summary into a single zip file
    #[arg(long, default_value = "false")]
    pub bundle: bool,

    /// Skip interactive prompts and accept heuristic choices
    #[arg(long, default_value = "false")]
    pub no_confirm: bool,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,

    /// Increase diagnostic logging on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Print the modeling plan: candidate models, metrics, fairness checks
    /// and next steps. Needs no dataset.
    Plan,
}

impl Cli {
    pub fn input(&self) -> Option<&PathBuf> {
        self.input.as_ref()
    }

    /// Feature columns requested with `--columns`, if any
    pub fn feature_columns(&self) -> Option<Vec<String>> {
        if self.columns.is_empty() {
            None
        } else {
            Some(self.columns.clone())
        }
    }

    /// Get the JSON report path, deriving from input if not explicitly provided.
    pub fn report_path(&self) -> Option<PathBuf> {
        let input = self.input.as_ref()?;
        Some(
            self.output
                .clone()
                .unwrap_or_else(|| sibling_path(input, "_eda_report.json")),
        )
    }

    /// CSV summary path, next to the JSON report
    pub fn summary_path(&self) -> Option<PathBuf> {
        self.report_path()
            .map(|report| sibling_path(&report, "_summary.csv"))
    }

    /// Zip bundle path, next to the JSON report
    pub fn bundle_path(&self) -> Option<PathBuf> {
        self.report_path().map(|report| report.with_extension("zip"))
    }
}

/// `dir/stem.ext` becomes `dir/stem{suffix}`
fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("riskscope");
    parent.join(format!("{}{}", stem, suffix))
}
