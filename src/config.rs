// src/config.rs

//! Immutable supervisor configuration, built once from parsed CLI arguments.

use std::fmt;

use crate::cli::CliArgs;
use crate::errors::{PlzrunError, Result};

/// Base sleep applied when `--exponential` is given without a usable `--sleep`.
pub const EXPONENTIAL_DEFAULT_SLEEP_SECS: u64 = 1;

/// How many additional attempts are allowed after the first failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryBudget {
    /// Keep retrying until success or interrupt.
    Unbounded,
    /// At most this many retries, i.e. `n + 1` attempts in total.
    Limited(u32),
}

impl RetryBudget {
    /// Decode the CLI form: `-1` is unbounded, anything `>= 0` is a limit.
    pub fn from_encoded(value: i64) -> Result<Self> {
        match value {
            -1 => Ok(RetryBudget::Unbounded),
            n if n < -1 => Err(PlzrunError::Config(format!(
                "retries must be -1 (unbounded) or a non-negative number, got {n}"
            ))),
            n => u32::try_from(n).map(RetryBudget::Limited).map_err(|_| {
                PlzrunError::Config(format!("retries value {n} is too large"))
            }),
        }
    }

    /// Total attempts allowed, or `None` when unbounded.
    pub fn max_attempts(&self) -> Option<u64> {
        match self {
            RetryBudget::Unbounded => None,
            RetryBudget::Limited(n) => Some(u64::from(*n) + 1),
        }
    }

    /// Whether another attempt may follow a failed attempt number `attempt` (1-based).
    pub fn allows_retry_after(&self, attempt: u64) -> bool {
        match self {
            RetryBudget::Unbounded => true,
            RetryBudget::Limited(n) => attempt <= u64::from(*n),
        }
    }
}

/// Renders the total number of attempts, or `∞`.
impl fmt::Display for RetryBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max_attempts() {
            Some(total) => write!(f, "{total}"),
            None => f.write_str("∞"),
        }
    }
}

/// Shell used to interpret the command string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellSpec {
    pub program: String,
    pub flag: String,
}

impl ShellSpec {
    /// Resolve from the current process environment (`$SHELL`).
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var("SHELL").ok())
    }

    /// Resolve from a raw `$SHELL` value, falling back to the platform shell
    /// when it is unset or blank.
    pub fn from_env_value(value: Option<String>) -> Self {
        match value {
            Some(program) if !program.trim().is_empty() => Self {
                program,
                flag: "-c".to_string(),
            },
            _ => Self::platform_default(),
        }
    }

    pub fn platform_default() -> Self {
        if cfg!(windows) {
            Self {
                program: "cmd".to_string(),
                flag: "/C".to_string(),
            }
        } else {
            Self {
                program: "/bin/sh".to_string(),
                flag: "-c".to_string(),
            }
        }
    }
}

impl fmt::Display for ShellSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)
    }
}

/// Everything the supervision loop needs, fixed for the lifetime of the run.
#[derive(Debug, Clone, PartialEq)]
pub struct SupervisorConfig {
    pub command: String,
    pub retries: RetryBudget,
    pub base_sleep_secs: u64,
    pub exponential: bool,
    pub clear: bool,
    pub shell: ShellSpec,
}

/// What the parsed arguments ask for.
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    /// No command was given: print usage and exit successfully.
    Usage,
    Supervise(SupervisorConfig),
}

impl SupervisorConfig {
    /// Build the configuration from CLI arguments.
    ///
    /// `--exponential` with no sleep (or a zero sleep) gets a base sleep of
    /// [`EXPONENTIAL_DEFAULT_SLEEP_SECS`] here, before any multiplier applies.
    pub fn from_args(args: &CliArgs, shell: ShellSpec) -> Invocation {
        if args.command.is_empty() {
            return Invocation::Usage;
        }

        let requested_sleep = args.sleep.unwrap_or(0);
        let base_sleep_secs = if args.exponential && requested_sleep == 0 {
            EXPONENTIAL_DEFAULT_SLEEP_SECS
        } else {
            requested_sleep
        };

        Invocation::Supervise(SupervisorConfig {
            command: args.command.join(" "),
            retries: args.retries,
            base_sleep_secs,
            exponential: args.exponential,
            clear: args.clear,
            shell,
        })
    }
}
