//! Tests for CLI argument parsing and the binary

use assert_cmd::Command;
use clap::Parser;
use predicates::prelude::*;
use riskscope::cli::{Cli, Commands};
use std::path::PathBuf;

#[path = "common/mod.rs"]
mod common;

#[test]
fn test_cli_default_values() {
    let cli = Cli::parse_from(["riskscope", "-i", "data.csv"]);

    assert!(cli.target.is_none());
    assert!(cli.columns.is_empty());
    assert_eq!(cli.sample_size, 5);
    assert!(!cli.bundle);
    assert!(!cli.no_confirm, "Default no_confirm should be false");
    assert_eq!(cli.infer_schema_length, 10000);
    assert_eq!(cli.verbose, 0);
}

#[test]
fn test_cli_report_path_derivation() {
    let cli = Cli::parse_from(["riskscope", "-i", "/path/to/data.parquet"]);
    assert_eq!(
        cli.report_path().unwrap(),
        PathBuf::from("/path/to/data_eda_report.json")
    );
}

#[test]
fn test_cli_plan_subcommand() {
    let cli = Cli::parse_from(["riskscope", "plan"]);
    assert_eq!(cli.command, Some(Commands::Plan));
    assert!(cli.input().is_none());
}

#[test]
fn test_binary_plan() {
    Command::cargo_bin("riskscope")
        .unwrap()
        .arg("plan")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logistic Regression"))
        .stdout(predicate::str::contains("NEXT STEPS"));
}

#[test]
fn test_binary_requires_input() {
    Command::cargo_bin("riskscope")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file is required"));
}

#[test]
fn test_binary_full_run() {
    let mut df = common::create_scenario_dataframe();
    let (temp_dir, csv_path) = common::create_temp_csv(&mut df);

    Command::cargo_bin("riskscope")
        .unwrap()
        .args(["-i", csv_path.to_str().unwrap(), "--no-confirm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("MISSING VALUES"))
        .stdout(predicate::str::contains("Delinquent_Account"));

    assert!(temp_dir.path().join("test_data_eda_report.json").exists());
    assert!(temp_dir
        .path()
        .join("test_data_eda_report_summary.csv")
        .exists());
}

#[test]
fn test_binary_bundle() {
    let mut df = common::create_customer_dataframe();
    let (temp_dir, csv_path) = common::create_temp_csv(&mut df);

    Command::cargo_bin("riskscope")
        .unwrap()
        .args([
            "-i",
            csv_path.to_str().unwrap(),
            "-t",
            "Delinquent_Account",
            "--columns",
            "Income,Credit_Score",
            "--bundle",
            "--no-confirm",
        ])
        .assert()
        .success();

    assert!(temp_dir.path().join("test_data_eda_report.zip").exists());
    assert!(!temp_dir.path().join("test_data_eda_report.json").exists());
}

#[test]
fn test_binary_unknown_target() {
    let mut df = common::create_customer_dataframe();
    let (_temp_dir, csv_path) = common::create_temp_csv(&mut df);

    Command::cargo_bin("riskscope")
        .unwrap()
        .args(["-i", csv_path.to_str().unwrap(), "-t", "Nope", "--no-confirm"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}
