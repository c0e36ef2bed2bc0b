//! Diagnostic logging via `tracing`
//!
//! Console output for the user goes through [`super::styling`]; this module
//! only configures the structured diagnostics written to stderr.
//!
//! Verbosity maps to levels as follows (`RUST_LOG` takes precedence):
//!
//! - 0: `warn`
//! - 1 (`-v`): `info`
//! - 2 (`-vv`): `debug`
//! - 3+ (`-vvv`): `trace`

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Log level for a CLI verbosity count
pub fn level_for_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(verbosity: u8) -> Result<()> {
    let level = level_for_verbosity(verbosity);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("riskscope={}", level.as_str().to_lowercase())));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}
