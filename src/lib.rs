//! riskscope: exploratory analysis for credit delinquency datasets
//!
//! Profiles a tabular customer dataset (schema, missing values, target
//! distribution, correlations, class imbalance) and pairs the findings with
//! static modeling guidance. The analyses live in [`pipeline`]; [`report`]
//! assembles them into a serializable report.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
