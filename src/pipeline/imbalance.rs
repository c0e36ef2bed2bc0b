//! Class imbalance severity for binary targets

use serde::Serialize;
use tracing::warn;

use super::distribution::TargetDistribution;

/// Minority share below which imbalance is severe
pub const SEVERE_MINORITY_PERCENT: f64 = 20.0;

/// Minority share below which imbalance is moderate
pub const MODERATE_MINORITY_PERCENT: f64 = 40.0;

/// Minority share below which displays warn about imbalance.
///
/// Independent of the severity thresholds above.
pub const IMBALANCE_WARNING_PERCENT: f64 = 30.0;

/// Handling strategies suggested whenever imbalance is reported
pub const IMBALANCE_STRATEGIES: [&str; 3] = [
    "Use appropriate evaluation metrics (Precision, Recall, F1, ROC-AUC)",
    "Consider class weighting in models",
    "Apply resampling techniques if needed",
];

/// Bucketed class imbalance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImbalanceSeverity {
    /// Minority below 20%
    Severe,
    /// Minority from 20% up to 40%
    Moderate,
    /// Minority at 40% or more
    Mild,
}

impl ImbalanceSeverity {
    /// Bucket a minority share; boundaries belong to the milder bucket
    pub fn from_minority_percent(minority_percent: f64) -> Self {
        if minority_percent < SEVERE_MINORITY_PERCENT {
            Self::Severe
        } else if minority_percent < MODERATE_MINORITY_PERCENT {
            Self::Moderate
        } else {
            Self::Mild
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Severe => "severe",
            Self::Moderate => "moderate",
            Self::Mild => "mild",
        }
    }
}

impl std::fmt::Display for ImbalanceSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minority share and its severity bucket
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImbalanceAssessment {
    pub minority_percent: f64,
    pub severity: ImbalanceSeverity,
}

impl ImbalanceAssessment {
    pub fn from_minority_percent(minority_percent: f64) -> Self {
        Self {
            minority_percent,
            severity: ImbalanceSeverity::from_minority_percent(minority_percent),
        }
    }
}

/// Assess imbalance of a binary target.
///
/// `None` unless the distribution has exactly two groups (a missing-target
/// group counts as one). The minority share is the smaller of the two
/// percentages.
pub fn assess_imbalance(distribution: &TargetDistribution) -> Option<ImbalanceAssessment> {
    if !distribution.is_binary() {
        return None;
    }
    let minority = distribution
        .classes
        .iter()
        .map(|c| c.percent)
        .fold(f64::INFINITY, f64::min);
    Some(ImbalanceAssessment::from_minority_percent(minority))
}

/// Minority share when a binary target falls below
/// [`IMBALANCE_WARNING_PERCENT`], for display warnings
pub fn imbalance_warning(distribution: &TargetDistribution) -> Option<f64> {
    let assessment = assess_imbalance(distribution)?;
    if assessment.minority_percent < IMBALANCE_WARNING_PERCENT {
        warn!(
            target_column = %distribution.target,
            minority_percent = assessment.minority_percent,
            "Class imbalance detected"
        );
        Some(assessment.minority_percent)
    } else {
        None
    }
}
