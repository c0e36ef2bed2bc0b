//! Integration tests for imbalance assessment and model recommendations

use polars::prelude::*;
use riskscope::pipeline::{
    assess_imbalance, imbalance_warning, model_recommendations, target_distribution,
    ImbalanceSeverity, EVALUATION_METRICS, MODEL_SHORTLIST,
};

#[path = "common/mod.rs"]
mod common;

const TARGET: &str = "Delinquent_Account";

#[test]
fn test_scenario_is_severely_imbalanced() {
    let df = common::create_scenario_dataframe();
    let dist = target_distribution(&df, TARGET).unwrap();

    let assessment = assess_imbalance(&dist).unwrap();
    assert_eq!(assessment.minority_percent, 16.0);
    assert_eq!(assessment.severity, ImbalanceSeverity::Severe);
    assert_eq!(imbalance_warning(&dist), Some(16.0));
}

#[test]
fn test_customer_target_is_moderate_without_warning() {
    let df = common::create_customer_dataframe();
    let dist = target_distribution(&df, TARGET).unwrap();

    let assessment = assess_imbalance(&dist).unwrap();
    assert_eq!(assessment.severity, ImbalanceSeverity::Moderate);
    assert_eq!(imbalance_warning(&dist), None);
}

#[test]
fn test_multiclass_target_not_assessed() {
    let df = common::create_customer_dataframe();
    let dist = target_distribution(&df, "Employment_Status").unwrap();
    assert!(assess_imbalance(&dist).is_none());
    assert!(imbalance_warning(&dist).is_none());
}

#[test]
fn test_negative_zero_target_stays_binary() {
    let df = df! { "t" => [0.0f64, -0.0, 1.0, 0.0], }.unwrap();
    let distribution = target_distribution(&df, "t").unwrap();
    assert!(distribution.is_binary());
    assert_eq!(distribution.classes[0].count, 3);

    let assessment = assess_imbalance(&distribution).unwrap();
    assert_eq!(assessment.minority_percent, 25.0);
    assert_eq!(assessment.severity, ImbalanceSeverity::Moderate);
}

#[test]
fn test_single_value_target_not_assessed() {
    let df = df! {
        "target" => [1i64, 1, 1, 1],
    }
    .unwrap();
    let dist = target_distribution(&df, "target").unwrap();

    assert_eq!(dist.len(), 1);
    assert_eq!(dist.classes[0].percent, 100.0);
    assert!(assess_imbalance(&dist).is_none());
}

#[test]
fn test_recommendations_for_scenario() {
    let df = common::create_scenario_dataframe();
    let recs = model_recommendations(&df, TARGET).unwrap();

    let imbalance = recs.class_imbalance.unwrap();
    assert_eq!(imbalance.severity, ImbalanceSeverity::Severe);
    assert_eq!(recs.imbalance_strategies.len(), 3);
    assert_eq!(recs.suggested_models.len(), MODEL_SHORTLIST.len());
    assert_eq!(recs.suggested_models[0].name, MODEL_SHORTLIST[0].name);
}

#[test]
fn test_recommendations_count_all_classes() {
    let df = common::create_customer_dataframe();
    let recs = model_recommendations(&df, "Employment_Status").unwrap();

    // Retired and Self-employed each hold 1 of 10 rows
    let imbalance = recs.class_imbalance.unwrap();
    common::assert_close(imbalance.minority_percent, 10.0, 1e-9);
    assert_eq!(imbalance.severity, ImbalanceSeverity::Severe);
}

#[test]
fn test_recommendations_ignore_missing_target() {
    let df = df! {
        "target" => [Some(1i64), Some(0), None, Some(0), None],
    }
    .unwrap();
    let recs = model_recommendations(&df, "target").unwrap();
    let imbalance = recs.class_imbalance.unwrap();
    common::assert_close(imbalance.minority_percent, 100.0 / 3.0, 1e-9);
    assert_eq!(imbalance.severity, ImbalanceSeverity::Moderate);
}

#[test]
fn test_all_missing_target_has_no_assessment() {
    let df = df! {
        "target" => [None::<i64>, None, None],
    }
    .unwrap();
    let recs = model_recommendations(&df, "target").unwrap();
    assert!(recs.class_imbalance.is_none());
}

#[test]
fn test_recommendations_serialize() {
    let df = common::create_scenario_dataframe();
    let recs = model_recommendations(&df, TARGET).unwrap();
    let json = serde_json::to_value(&recs).unwrap();

    assert_eq!(json["class_imbalance"]["severity"], "severe");
    assert_eq!(json["suggested_models"].as_array().unwrap().len(), 4);
    assert!(EVALUATION_METRICS.iter().any(|m| m.name == "ROC-AUC"));
}
