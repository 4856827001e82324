// src/exec/spawner.rs

//! Pluggable spawner abstraction.
//!
//! The supervisor talks to a `Spawner` instead of `tokio::process` directly.
//! This keeps the retry loop testable with a scripted fake while the
//! production implementation lives in [`super::shell`].

use std::future::Future;
use std::pin::Pin;

use crate::config::{ShellSpec, SupervisorConfig};
use crate::errors::Result;

use super::Termination;

/// One command line plus the shell that interprets it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub shell: ShellSpec,
    pub command: String,
}

impl CommandSpec {
    pub fn from_config(config: &SupervisorConfig) -> Self {
        Self {
            shell: config.shell.clone(),
            command: config.command.clone(),
        }
    }
}

/// Trait abstracting how a single attempt is executed.
pub trait Spawner: Send {
    /// Start the command and wait for it to terminate.
    ///
    /// An `Err` means the command never started (the shell is missing, not
    /// executable, ...). A command that started and failed is an
    /// `Ok(Termination)` with a nonzero exit code.
    fn spawn_and_wait(
        &mut self,
        spec: &CommandSpec,
    ) -> Pin<Box<dyn Future<Output = Result<Termination>> + Send + '_>>;
}
