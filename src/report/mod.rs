//! Report module - assembling, exporting and displaying analysis results

pub mod eda_report;
pub mod summary;

pub use eda_report::*;
pub use summary::*;
