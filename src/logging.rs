//! Logging setup
//!
//! Diagnostics go to stderr so stdout stays reserved for the operator
//! dialogue.

use crate::config::debug_enabled;
use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_FILTER: &str = "warn,prodmon_oauth_setup=info";
const DEBUG_FILTER: &str = "warn,prodmon_oauth_setup=debug";

/// Pick the filter directive.
///
/// An explicit level wins, then `PRODMON_SETUP_DEBUG`, then `RUST_LOG`,
/// then [`DEFAULT_FILTER`].
pub fn build_filter(log_level: Option<&str>) -> Result<EnvFilter> {
    if let Some(level) = log_level {
        return Ok(EnvFilter::try_new(level)?);
    }
    if debug_enabled() {
        return Ok(EnvFilter::new(DEBUG_FILTER));
    }
    Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)))
}

/// Install the global subscriber.
///
/// # Examples
/// ```no_run
/// use prodmon_oauth_setup::logging::init_logger;
///
/// init_logger(None).unwrap();
/// ```
pub fn init_logger(log_level: Option<&str>) -> Result<()> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .compact();

    tracing_subscriber::registry()
        .with(build_filter(log_level)?)
        .with(fmt_layer)
        .try_init()?;

    tracing::debug!("Logger initialized");
    Ok(())
}
