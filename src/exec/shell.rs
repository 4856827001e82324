// src/exec/shell.rs

//! Production spawner: runs the command through the user's shell.

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::errors::{PlzrunError, Result};

use super::{CommandSpec, Spawner, Termination};

/// Runs `<shell> -c <command>` with the supervisor's own stdin/stdout/stderr,
/// working directory and environment.
#[derive(Debug, Clone, Default)]
pub struct ShellSpawner;

impl ShellSpawner {
    pub fn new() -> Self {
        Self
    }

    fn build_command(spec: &CommandSpec) -> Command {
        let mut cmd = Command::new(&spec.shell.program);
        cmd.arg(&spec.shell.flag)
            .arg(&spec.command)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(false);
        cmd
    }
}

impl Spawner for ShellSpawner {
    fn spawn_and_wait(
        &mut self,
        spec: &CommandSpec,
    ) -> Pin<Box<dyn Future<Output = Result<Termination>> + Send + '_>> {
        let mut cmd = Self::build_command(spec);
        let shell = spec.shell.program.clone();

        Box::pin(async move {
            let mut child = cmd.spawn().map_err(|source| PlzrunError::Spawn {
                shell: shell.clone(),
                source,
            })?;

            debug!(pid = child.id(), %shell, "child process started");

            let status = child
                .wait()
                .await
                .map_err(|source| PlzrunError::Wait { source })?;
            let termination = Termination::from_status(status);

            debug!(
                exit_code = termination.exit_code,
                signal = ?termination.signal,
                "child process exited"
            );

            Ok(termination)
        })
    }
}
