// src/logging.rs

//! Logging setup for `coursedag` using `tracing` + `tracing-subscriber`.
//!
//! Filter selection, first match wins:
//! 1. `--log-level` on the command line, applied to every target.
//! 2. `COURSEDAG_LOG`, parsed as an `EnvFilter` directive string, so
//!    `COURSEDAG_LOG=coursedag::cascade=debug` narrows output to the
//!    cascade resolver.
//! 3. `info`.
//!
//! Output goes to stderr; stdout is reserved for command reports.

use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::LogLevel;

/// Env var holding filter directives.
pub const LOG_ENV: &str = "COURSEDAG_LOG";

/// Install the global subscriber. Call once, before any command runs.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let filter = match cli_level {
        Some(lvl) => EnvFilter::new(directive_for(lvl)),
        None => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info")),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))?;

    Ok(())
}

fn directive_for(lvl: LogLevel) -> &'static str {
    match lvl {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}
