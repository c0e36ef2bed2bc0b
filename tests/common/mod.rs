//! Shared test utilities and fixture generators
#![allow(dead_code)]

use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Ten customers with a binary `Delinquent_Account` target.
///
/// - 3 delinquent (30%), 7 current
/// - `Income`: 2 nulls, lower for delinquent customers
/// - `Credit_Score`: 1 null
/// - `Missed_Payments`: rises with delinquency
/// - `Employment_Status`: text
pub fn create_customer_dataframe() -> DataFrame {
    df! {
        "Customer_ID" => ["C01", "C02", "C03", "C04", "C05", "C06", "C07", "C08", "C09", "C10"],
        "Age" => [34i64, 45, 29, 52, 38, 41, 27, 60, 33, 48],
        "Income" => [Some(28000.0f64), Some(72000.0), None, Some(95000.0), Some(31000.0),
                     Some(64000.0), None, Some(88000.0), Some(25000.0), Some(70000.0)],
        "Credit_Score" => [Some(540i64), Some(710), Some(690), Some(780), Some(560),
                           None, Some(650), Some(800), Some(520), Some(720)],
        "Missed_Payments" => [4i64, 0, 1, 0, 5, 1, 2, 0, 6, 0],
        "Employment_Status" => ["Unemployed", "Employed", "Employed", "Employed", "Self-employed",
                                "Employed", "Unemployed", "Retired", "Unemployed", "Employed"],
        "Delinquent_Account" => [1i64, 0, 0, 0, 1, 0, 0, 0, 1, 0],
    }
    .unwrap()
}

/// Deterministic 500-row dataset with the published missing-value profile.
///
/// - 80 delinquent rows (16%), every sixth row up to row 474
/// - `Income`: 39 nulls (7.8%)
/// - `Loan_Balance`: 29 nulls (5.8%)
/// - `Credit_Score`: 2 nulls (0.4%)
/// - `Missed_Payments` tracks delinquency; `Age` does not
pub fn create_scenario_dataframe() -> DataFrame {
    let rows = 500usize;
    let delinquent: Vec<i64> = (0..rows)
        .map(|i| if i % 6 == 0 && i / 6 < 80 { 1 } else { 0 })
        .collect();

    let ids: Vec<String> = (0..rows).map(|i| format!("CUST{:04}", i)).collect();
    let age: Vec<i64> = (0..rows).map(|i| 21 + (i as i64 * 7) % 50).collect();
    let income: Vec<Option<f64>> = (0..rows)
        .map(|i| {
            if i % 13 == 5 && i / 13 < 39 {
                None
            } else {
                let base = 30000.0 + ((i * 37) % 60) as f64 * 1000.0;
                Some(if delinquent[i] == 1 { base * 0.7 } else { base })
            }
        })
        .collect();
    let loan_balance: Vec<Option<f64>> = (0..rows)
        .map(|i| {
            if i % 17 == 3 && i / 17 < 29 {
                None
            } else {
                Some(5000.0 + ((i * 53) % 40) as f64 * 500.0)
            }
        })
        .collect();
    let credit_score: Vec<Option<i64>> = (0..rows)
        .map(|i| {
            if i == 100 || i == 401 {
                None
            } else {
                let base = 600 + ((i * 11) % 200) as i64;
                Some(if delinquent[i] == 1 { base - 80 } else { base })
            }
        })
        .collect();
    let missed: Vec<i64> = (0..rows)
        .map(|i| {
            if delinquent[i] == 1 {
                3 + (i % 4) as i64
            } else {
                (i % 3) as i64
            }
        })
        .collect();

    df! {
        "Customer_ID" => ids,
        "Age" => age,
        "Income" => income,
        "Loan_Balance" => loan_balance,
        "Credit_Score" => credit_score,
        "Missed_Payments" => missed,
        "Delinquent_Account" => delinquent,
    }
    .unwrap()
}

/// Columns with 0%, 20%, 40% and 100% missing values
pub fn create_missing_test_dataframe() -> DataFrame {
    df! {
        "col_complete" => [1.0f64, 2.0, 3.0, 4.0, 5.0],
        "col_20pct_missing" => [Some(1.0f64), None, Some(3.0), Some(4.0), Some(5.0)],
        "col_40pct_missing" => [Some(1.0f64), Some(2.0), None, None, Some(5.0)],
        "col_all_missing" => [None::<f64>, None, None, None, None],
        "target" => [0i32, 1, 0, 1, 0],
    }
    .unwrap()
}

/// Known correlation patterns against a numeric target
pub fn create_correlation_test_dataframe() -> DataFrame {
    df! {
        "target" => [0i32, 1, 0, 1, 0, 1, 0, 1, 0, 1],
        "a" => [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0],
        "b" => [2.0f64, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0, 16.0, 18.0, 20.0], // b = 2a
        "c" => [10.0f64, 9.0, 8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0], // c = 11 - a
        "d" => [5.0f64, 1.0, 8.0, 2.0, 9.0, 3.0, 7.0, 4.0, 6.0, 0.0],
        "constant" => [5.0f64; 10],
    }
    .unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("test_data.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Assert that a DataFrame has expected shape
pub fn assert_shape(df: &DataFrame, expected_rows: usize, expected_cols: usize) {
    let (rows, cols) = df.shape();
    assert_eq!(rows, expected_rows, "Row count mismatch: expected {}, got {}", expected_rows, rows);
    assert_eq!(cols, expected_cols, "Column count mismatch: expected {}, got {}", expected_cols, cols);
}

/// Assert approximate equality of two floats
pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() < tolerance,
        "expected {} within {}, got {}",
        expected,
        tolerance,
        actual
    );
}
