// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod supervisor;

use anyhow::{Context, Result};
use tracing::debug;

use crate::cli::CliArgs;
use crate::config::{Invocation, ShellSpec, SupervisorConfig};
use crate::exec::ShellSpawner;
use crate::supervisor::{InterruptListener, Supervisor, TracingReporter};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - configuration from the parsed arguments and `$SHELL`
/// - Ctrl-C handling
/// - the shell spawner and tracing reporter
///
/// and returns the exit code for the process. It never exits by itself.
pub async fn run(args: CliArgs) -> Result<i32> {
    let config = match SupervisorConfig::from_args(&args, ShellSpec::from_env()) {
        Invocation::Usage => {
            cli::print_usage().context("printing usage")?;
            return Ok(0);
        }
        Invocation::Supervise(config) => config,
    };

    debug!(?config, "configuration resolved");

    let interrupts = InterruptListener::install().context("installing Ctrl-C handler")?;

    let supervisor = Supervisor::new(config, ShellSpawner::new(), TracingReporter::new(), interrupts);
    let outcome = supervisor.run().await;

    Ok(outcome.exit_code())
}
