//! Pipeline module - the analysis and recommendation engine
//!
//! Every analysis is a pure function of a `DataFrame` snapshot. The intended
//! order is schema, target, missing values, distribution, correlation,
//! imbalance, recommendations.

pub mod correlation;
pub mod distribution;
pub mod error;
pub mod imbalance;
pub mod loader;
pub mod missing;
pub mod recommend;
pub mod schema;
pub mod target;

pub use correlation::*;
pub use distribution::*;
pub use error::{AnalysisError, Result};
pub use imbalance::*;
pub use loader::*;
pub use missing::*;
pub use recommend::*;
pub use schema::*;
pub use target::*;
