//! Integration tests for target distribution and per-class statistics

use riskscope::pipeline::{
    default_distribution_features, describe_by_target, describe_column, distribution_eligible,
    group_means, sample_by_target, target_distribution, AnalysisError, TargetValue,
    DEFAULT_SAMPLE_SIZE,
};

#[path = "common/mod.rs"]
mod common;

const TARGET: &str = "Delinquent_Account";

#[test]
fn test_binary_distribution() {
    let df = common::create_customer_dataframe();
    let dist = target_distribution(&df, TARGET).unwrap();

    assert!(dist.is_binary());
    assert_eq!(dist.total(), 10);
    assert_eq!(
        dist.raw_counts(),
        vec![(TargetValue::Number(0.0), 7), (TargetValue::Number(1.0), 3)]
    );
    assert_eq!(dist.classes[0].percent, 70.0);
    assert_eq!(dist.classes[1].percent, 30.0);
}

#[test]
fn test_text_distribution_sorted_by_value() {
    let df = common::create_customer_dataframe();
    let dist = target_distribution(&df, "Employment_Status").unwrap();

    let values: Vec<String> = dist.classes.iter().map(|c| c.value.to_string()).collect();
    assert_eq!(values, vec!["Employed", "Retired", "Self-employed", "Unemployed"]);
    assert_eq!(dist.classes[0].count, 5);
    assert_eq!(dist.classes[0].percent, 50.0);
}

#[test]
fn test_scenario_distribution() {
    let df = common::create_scenario_dataframe();
    let dist = target_distribution(&df, TARGET).unwrap();

    assert_eq!(dist.classes[0].count, 420);
    assert_eq!(dist.classes[1].count, 80);
    assert_eq!(dist.classes[1].percent, 16.0);
}

#[test]
fn test_samples_preserve_row_order() {
    let df = common::create_customer_dataframe();
    let samples = sample_by_target(&df, TARGET, None, DEFAULT_SAMPLE_SIZE).unwrap();

    assert_eq!(samples.positive.height(), 3);
    assert_eq!(samples.negative.height(), 5);
    assert_eq!(
        samples.positive.get_column_names(),
        &["Customer_ID", "Missed_Payments", "Credit_Score", "Income", TARGET]
    );

    let ids: Vec<Option<&str>> = samples
        .negative
        .column("Customer_ID")
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(
        ids,
        vec![Some("C02"), Some("C03"), Some("C04"), Some("C06"), Some("C07")]
    );
}

#[test]
fn test_samples_with_text_target_are_empty() {
    let df = common::create_customer_dataframe();
    let samples = sample_by_target(&df, "Employment_Status", None, 5).unwrap();
    assert_eq!(samples.positive.height(), 0);
    assert_eq!(samples.negative.height(), 0);
}

#[test]
fn test_group_means_default_columns() {
    let df = common::create_customer_dataframe();
    let means = group_means(&df, TARGET, None).unwrap();

    assert_eq!(means.columns, vec!["Missed_Payments", "Credit_Score", "Income"]);
    let positive = TargetValue::Number(1.0);
    let negative = TargetValue::Number(0.0);

    common::assert_close(means.get(&positive, "Missed_Payments").unwrap(), 5.0, 1e-9);
    common::assert_close(means.get(&positive, "Income").unwrap(), 28000.0, 1e-6);
    common::assert_close(means.get(&negative, "Income").unwrap(), 77800.0, 1e-6);
    common::assert_close(means.get(&negative, "Credit_Score").unwrap(), 725.0, 1e-9);
}

#[test]
fn test_group_means_skip_absent_and_text_columns() {
    let df = common::create_customer_dataframe();
    let means = group_means(&df, TARGET, Some(&["Nope", "Employment_Status"][..])).unwrap();
    assert!(means.is_empty());
}

#[test]
fn test_describe_by_target() {
    let df = common::create_customer_dataframe();
    let description = describe_by_target(&df, TARGET, "Income").unwrap();

    assert_eq!(description.groups.len(), 2);
    let (value, stats) = &description.groups[1];
    assert_eq!(*value, TargetValue::Number(1.0));
    assert_eq!(stats.count, 3);
    common::assert_close(stats.mean, 28000.0, 1e-6);
    common::assert_close(stats.std, 3000.0, 1e-6);
    common::assert_close(stats.min, 25000.0, 1e-9);
    common::assert_close(stats.q25, 26500.0, 1e-6);
    common::assert_close(stats.median, 28000.0, 1e-9);
    common::assert_close(stats.q75, 29500.0, 1e-6);
    common::assert_close(stats.max, 31000.0, 1e-9);

    // Nulls are excluded from the count
    assert_eq!(description.groups[0].1.count, 5);
}

#[test]
fn test_describe_rejects_text_column() {
    let df = common::create_customer_dataframe();
    let err = describe_by_target(&df, TARGET, "Customer_ID").unwrap_err();
    assert!(matches!(err, AnalysisError::NotNumeric { .. }));
    assert!(describe_column(&df, "Employment_Status").is_err());
}

#[test]
fn test_distribution_eligibility_and_defaults() {
    let df = common::create_customer_dataframe();
    assert!(distribution_eligible(&df, TARGET).unwrap());
    assert_eq!(
        default_distribution_features(&df, TARGET),
        vec!["Age", "Income", "Credit_Score"]
    );

    // 500 distinct customer IDs are too many classes
    let scenario = common::create_scenario_dataframe();
    assert!(!distribution_eligible(&scenario, "Customer_ID").unwrap());
}
