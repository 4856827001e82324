// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! Flags may only appear before the command: the first positional token and
//! everything after it are handed to the shell untouched, so
//! `plzrun -r 2 curl -s https://example.com` keeps `-s` for curl.

use clap::{ArgAction, CommandFactory, Parser, ValueEnum};

use crate::config::RetryBudget;

/// Command-line arguments for `plzrun`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "plzrun",
    version,
    disable_version_flag = true,
    about = "A tool for supervising and retrying command line executions. Runs something until it succeeds.",
    long_about = None
)]
pub struct CliArgs {
    /// How many times to retry the command if it fails (-1 is infinite tries).
    #[arg(
        short,
        long,
        value_name = "N",
        default_value = "-1",
        allow_negative_numbers = true,
        value_parser = parse_retry_budget
    )]
    pub retries: RetryBudget,

    /// How long to wait in between executions, in seconds.
    ///
    /// 0 disables waiting. Defaults to 0, or 1 when `--exponential` is given.
    #[arg(short, long, value_name = "SECONDS")]
    pub sleep: Option<u64>,

    /// Apply exponential backoff to sleep durations (exponent 1.5).
    #[arg(short, long)]
    pub exponential: bool,

    /// Reset the terminal before each run, watch(1) style.
    ///
    /// Unlike watch(1), earlier output stays in scrollback and the screen is
    /// not cleared at exit.
    #[arg(short, long)]
    pub clear: bool,

    /// Diagnostic logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `PLZRUN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Display version information.
    #[arg(short = 'v', long, action = ArgAction::Version)]
    version: (),

    /// The command to run, interpreted by `$SHELL`.
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Value parser for `--retries`: an integer `>= -1`, where `-1` is unbounded.
pub fn parse_retry_budget(raw: &str) -> Result<RetryBudget, String> {
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{raw}' is not a whole number"))?;
    RetryBudget::from_encoded(value).map_err(|e| e.to_string())
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

/// Print the long help text to stdout.
pub fn print_usage() -> std::io::Result<()> {
    CliArgs::command().print_long_help()
}
