//! Terminal helpers - styling, spinners and diagnostic logging

pub mod logging;
pub mod progress;
pub mod styling;

pub use logging::*;
pub use progress::*;
pub use styling::*;
