//! Integration tests for missing value profiling and imputation guidance

use riskscope::pipeline::{imputation_guidance, imputation_guidance_for, profile_missing};

#[path = "common/mod.rs"]
mod common;

#[test]
fn test_profile_sorted_descending() {
    let df = common::create_missing_test_dataframe();
    let report = profile_missing(&df).unwrap();

    let columns: Vec<&str> = report.entries.iter().map(|e| e.column.as_str()).collect();
    assert_eq!(
        columns,
        vec!["col_all_missing", "col_40pct_missing", "col_20pct_missing"]
    );
    common::assert_close(report.entries[0].null_percent, 100.0, 1e-9);
    common::assert_close(report.entries[1].null_percent, 40.0, 1e-9);
    common::assert_close(report.entries[2].null_percent, 20.0, 1e-9);
}

#[test]
fn test_profile_excludes_complete_columns() {
    let df = common::create_missing_test_dataframe();
    let report = profile_missing(&df).unwrap();

    assert!(report.get("col_complete").is_none());
    assert!(report.get("target").is_none());
}

#[test]
fn test_profile_totals() {
    let df = common::create_missing_test_dataframe();
    let report = profile_missing(&df).unwrap();

    // 5 + 2 + 1 missing cells out of 25
    assert_eq!(report.total_missing, 8);
    common::assert_close(report.percent_of_dataset, 32.0, 1e-9);
}

#[test]
fn test_scenario_missing_profile() {
    let df = common::create_scenario_dataframe();
    let report = profile_missing(&df).unwrap();

    assert_eq!(report.len(), 3);
    let income = report.get("Income").unwrap();
    assert_eq!(income.null_count, 39);
    common::assert_close(income.null_percent, 7.8, 1e-9);

    let loan = report.get("Loan_Balance").unwrap();
    assert_eq!(loan.null_count, 29);
    common::assert_close(loan.null_percent, 5.8, 1e-9);

    let credit = report.get("Credit_Score").unwrap();
    assert_eq!(credit.null_count, 2);
    common::assert_close(credit.null_percent, 0.4, 1e-9);

    assert_eq!(report.entries[0].column, "Income");
}

#[test]
fn test_guidance_matches_scenario() {
    let df = common::create_scenario_dataframe();
    let report = profile_missing(&df).unwrap();

    for entry in &report.entries {
        let guidance = imputation_guidance_for(&entry.column).unwrap();
        common::assert_close(guidance.observed_missing_percent, entry.null_percent, 1e-9);
    }
}

#[test]
fn test_guidance_lookup() {
    assert_eq!(imputation_guidance().len(), 3);
    assert_eq!(
        imputation_guidance_for("Income").unwrap().stratify_by,
        Some("Employment_Status")
    );
    assert_eq!(
        imputation_guidance_for("Loan_Balance").unwrap().stratify_by,
        Some("Delinquent_Account")
    );
    assert!(imputation_guidance_for("Credit_Score")
        .unwrap()
        .stratify_by
        .is_none());
    assert!(imputation_guidance_for("Age").is_none());
}
