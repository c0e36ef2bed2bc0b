//! Modeling guidance tables
//!
//! Every table here is immutable data. The only entry point that looks at the
//! dataset is [`model_recommendations`], which measures class balance and
//! attaches it to the model shortlist.

use std::collections::BTreeMap;

use polars::prelude::*;
use serde::Serialize;
use tracing::debug;

use super::error::Result;
use super::imbalance::{ImbalanceAssessment, IMBALANCE_STRATEGIES};
use super::target::{target_values, TargetValue};

/// A candidate model with its trade-offs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelCandidate {
    pub name: &'static str,
    pub pros: &'static [&'static str],
    pub cons: &'static [&'static str],
    pub when_to_use: &'static str,
}

/// How to read one evaluation metric
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricGuide {
    pub name: &'static str,
    pub definition: &'static str,
    pub use_case: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limitation: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpretation: Option<&'static str>,
}

/// A named group of example items (feature ideas or action items)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuidanceGroup {
    pub name: &'static str,
    pub items: &'static [&'static str],
}

/// Description of the baseline model chosen for the first iteration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChosenModelLogic {
    pub model_type: &'static str,
    pub description: &'static str,
    pub workflow: &'static [&'static str],
    pub key_features: &'static [&'static str],
    pub pseudocode: &'static str,
}

/// Class balance merged with the model shortlist
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelRecommendations {
    /// `None` when the target has no non-missing values
    pub class_imbalance: Option<ImbalanceAssessment>,
    pub imbalance_strategies: &'static [&'static str],
    pub suggested_models: &'static [ModelCandidate],
}

pub static MODEL_SHORTLIST: [ModelCandidate; 4] = [
    ModelCandidate {
        name: "Logistic Regression",
        pros: &[
            "Easy to interpret",
            "Works well with structured data",
            "Good baseline",
        ],
        cons: &["May struggle with weak individual correlations"],
        when_to_use: "For probability-based predictions and business interpretability",
    },
    ModelCandidate {
        name: "Decision Tree",
        pros: &[
            "Transparent decision paths",
            "Handles categorical data",
            "Clear risk segmentation",
        ],
        cons: &["Prone to overfitting"],
        when_to_use: "When explainability is critical for stakeholders",
    },
    ModelCandidate {
        name: "Random Forest",
        pros: &[
            "Handles feature interactions",
            "Robust to outliers",
            "Good performance",
        ],
        cons: &["Less interpretable than decision trees"],
        when_to_use: "When accuracy is prioritized and data quality is good",
    },
    ModelCandidate {
        name: "Gradient Boosting",
        pros: &["State-of-the-art performance", "Captures complex patterns"],
        cons: &[
            "More computational resources needed",
            "Hyperparameter tuning required",
        ],
        when_to_use: "When maximum predictive performance is needed",
    },
];

pub static EVALUATION_METRICS: [MetricGuide; 5] = [
    MetricGuide {
        name: "Accuracy",
        definition: "Overall correctness of the model (correct predictions / total predictions)",
        use_case: "General performance overview",
        formula: None,
        limitation: Some("Misleading for imbalanced datasets"),
        interpretation: None,
    },
    MetricGuide {
        name: "Precision",
        definition: "Of predicted delinquent customers, how many are actually delinquent",
        use_case: "When false positives are costly",
        formula: Some("TP / (TP + FP)"),
        limitation: None,
        interpretation: None,
    },
    MetricGuide {
        name: "Recall",
        definition: "Of actual delinquent customers, how many are correctly identified",
        use_case: "When false negatives are costly (financial loss)",
        formula: Some("TP / (TP + FN)"),
        limitation: None,
        interpretation: None,
    },
    MetricGuide {
        name: "F1 Score",
        definition: "Weighted balance between precision and recall",
        use_case: "When both false positives and negatives matter",
        formula: Some("2 * (Precision * Recall) / (Precision + Recall)"),
        limitation: None,
        interpretation: None,
    },
    MetricGuide {
        name: "ROC-AUC",
        definition: "Assesses model's ability to distinguish between classes",
        use_case: "Comprehensive model ranking ability assessment",
        formula: None,
        limitation: None,
        interpretation: Some("Close to 1.0 = excellent, Close to 0.5 = random guessing"),
    },
];

pub static BIAS_FAIRNESS_CHECKLIST: [&str; 7] = [
    "Historical bias: Does the training data contain past unfair decisions?",
    "Selection bias: Are all demographic groups equally represented?",
    "Proxy bias: Could certain variables act as proxies for protected characteristics?",
    "Disparate impact: Does the model disproportionately predict risk for specific groups?",
    "Fairness testing: Use formal metrics (demographic parity, equalized odds)",
    "Explainability: Can predictions be justified to customers?",
    "Regulatory compliance: Does the model comply with fair lending laws?",
];

pub static FAIRNESS_PRINCIPLES: [&str; 4] = [
    "Transparency: Decision-makers must understand why predictions are made",
    "Fairness: Model should not systematically disadvantage demographic groups",
    "Compliance: Ensure adherence to fair lending and anti-discrimination laws",
    "Auditability: Document model decisions and outcomes for regulatory review",
];

pub static FEATURE_ENGINEERING: [GuidanceGroup; 4] = [
    GuidanceGroup {
        name: "Interaction Terms",
        items: &[
            "Credit_Utilization × Missed_Payments",
            "Debt_to_Income_Ratio × Credit_Score",
            "Income × Age",
        ],
    },
    GuidanceGroup {
        name: "Temporal Features",
        items: &[
            "Payment trend from Month_1 to Month_5",
            "Recent payment volatility",
            "Account activity trend",
        ],
    },
    GuidanceGroup {
        name: "Binning/Discretization",
        items: &[
            "Age groups (young, middle-age, senior)",
            "Income brackets (low, medium, high)",
            "Credit score tiers (poor, fair, good, excellent)",
        ],
    },
    GuidanceGroup {
        name: "Polynomial Features",
        items: &["Credit_Score^2", "Income^2", "Debt_to_Income_Ratio^2"],
    },
];

pub static NEXT_STEPS: [GuidanceGroup; 5] = [
    GuidanceGroup {
        name: "Data Preparation",
        items: &[
            "Apply median imputation for Income, Loan_Balance, Credit_Score",
            "Validate imputation doesn't introduce bias",
            "Check for outliers and anomalies",
        ],
    },
    GuidanceGroup {
        name: "Feature Engineering",
        items: &[
            "Create interaction terms",
            "Consider binning continuous variables",
            "Explore polynomial features",
        ],
    },
    GuidanceGroup {
        name: "Model Development",
        items: &[
            "Start with baseline models (Logistic Regression, Decision Trees)",
            "Apply class weighting or SMOTE for imbalance",
            "Use stratified K-fold cross-validation",
        ],
    },
    GuidanceGroup {
        name: "Evaluation",
        items: &[
            "Prioritize Recall, Precision, F1, ROC-AUC",
            "Align decision thresholds with business risk tolerance",
            "Perform fairness audits across demographic groups",
        ],
    },
    GuidanceGroup {
        name: "Deployment",
        items: &[
            "Ensure model interpretability",
            "Create monitoring and drift detection",
            "Plan integration with business workflows",
        ],
    },
];

pub static DATASET_STRENGTHS: [&str; 4] = [
    "Dataset is relatively clean (minimal missing data)",
    "Good sample size (500 records)",
    "Mix of demographic, credit behavior, and account features",
    "All key risk factors are represented",
];

pub static DATASET_CHALLENGES: [&str; 4] = [
    "Significant class imbalance (~16% delinquent)",
    "Weak individual feature correlations",
    "Missing data in Income and Loan_Balance",
    "Overlapping distributions between classes",
];

pub static CHOSEN_MODEL: ChosenModelLogic = ChosenModelLogic {
    model_type: "Logistic Regression",
    description: "A statistical model that predicts the probability of delinquency using a logistic function",
    workflow: &[
        "1. Data preprocessing: Handle missing values, encode categorical variables",
        "2. Feature selection: Choose relevant predictors (Income, Credit_Score, etc.)",
        "3. Model training: Fit logistic regression on training data",
        "4. Probability prediction: Output delinquency probability (0-1)",
        "5. Threshold application: Classify as delinquent if probability > threshold",
    ],
    key_features: &[
        "Income - Financial stability indicator",
        "Credit_Score - Historical credit behavior",
        "Credit_Utilization - Current debt burden",
        "Debt_to_Income_Ratio - Debt capacity measure",
        "Missed_Payments - Recent payment behavior",
    ],
    pseudocode: "\
features = preprocess(customer)
log_odds = intercept + sum(coefficient_i * feature_i)
probability = 1 / (1 + exp(-log_odds))
prediction = probability > threshold ? Delinquent : Non-delinquent",
};

/// Measure class balance of the target and merge it with the model shortlist.
///
/// The minority share is the smallest class count over all non-missing target
/// values, for any number of classes.
pub fn model_recommendations(df: &DataFrame, target: &str) -> Result<ModelRecommendations> {
    let values = target_values(df, target)?;

    let mut counts: BTreeMap<TargetValue, usize> = BTreeMap::new();
    for value in values.into_iter().filter(|v| !v.is_missing()) {
        *counts.entry(value).or_insert(0) += 1;
    }

    let total: usize = counts.values().sum();
    let class_imbalance = counts.values().min().map(|&minority| {
        ImbalanceAssessment::from_minority_percent(minority as f64 / total as f64 * 100.0)
    });

    debug!(
        target_column = target,
        classes = counts.len(),
        severity = ?class_imbalance.map(|a| a.severity),
        "Built model recommendations"
    );

    Ok(ModelRecommendations {
        class_imbalance,
        imbalance_strategies: &IMBALANCE_STRATEGIES,
        suggested_models: &MODEL_SHORTLIST,
    })
}
