// src/logging.rs

//! Logging setup for `plzrun` using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the diagnostic log level:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `PLZRUN_LOG` environment variable (e.g. "info", "debug")
//! 3. default to `info`
//!
//! The per-attempt report lines ("Run 1/3 using ...") are emitted on the
//! [`REPORT_TARGET`] target, which stays enabled at `info` whatever the
//! diagnostic level is. Logs are sent to STDERR so the supervised command
//! owns stdout.

use std::io::IsTerminal;

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

/// Target used by [`crate::supervisor::TracingReporter`].
pub const REPORT_TARGET: &str = "plzrun::report";

/// Initialise global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let level = match cli_level {
        Some(lvl) => level_from_log_level(lvl),
        None => std::env::var("PLZRUN_LOG")
            .ok()
            .and_then(|s| parse_level_str(&s))
            .unwrap_or(tracing::Level::INFO),
    };

    fmt()
        .with_env_filter(build_filter(level)?)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{e}"))
        .context("installing tracing subscriber")?;

    Ok(())
}

/// Filter that applies `level` to diagnostics but always lets report lines through.
pub fn build_filter(level: tracing::Level) -> Result<EnvFilter> {
    let directives = format!("{},{REPORT_TARGET}=info", level_directive(level));
    EnvFilter::try_new(&directives).with_context(|| format!("invalid log filter '{directives}'"))
}

fn level_directive(level: tracing::Level) -> &'static str {
    match level {
        tracing::Level::ERROR => "error",
        tracing::Level::WARN => "warn",
        tracing::Level::INFO => "info",
        tracing::Level::DEBUG => "debug",
        tracing::Level::TRACE => "trace",
    }
}

fn level_from_log_level(lvl: LogLevel) -> tracing::Level {
    match lvl {
        LogLevel::Error => tracing::Level::ERROR,
        LogLevel::Warn => tracing::Level::WARN,
        LogLevel::Info => tracing::Level::INFO,
        LogLevel::Debug => tracing::Level::DEBUG,
        LogLevel::Trace => tracing::Level::TRACE,
    }
}

fn parse_level_str(s: &str) -> Option<tracing::Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(tracing::Level::ERROR),
        "warn" | "warning" => Some(tracing::Level::WARN),
        "info" => Some(tracing::Level::INFO),
        "debug" => Some(tracing::Level::DEBUG),
        "trace" => Some(tracing::Level::TRACE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_level_names_case_insensitively() {
        assert_eq!(parse_level_str(" Debug "), Some(tracing::Level::DEBUG));
        assert_eq!(parse_level_str("warning"), Some(tracing::Level::WARN));
        assert_eq!(parse_level_str("loud"), None);
    }

    #[test]
    fn report_target_survives_error_level() {
        let filter = build_filter(tracing::Level::ERROR).unwrap();
        let rendered = filter.to_string().to_lowercase();
        assert!(rendered.contains("plzrun::report=info"), "got {rendered}");
    }
}
