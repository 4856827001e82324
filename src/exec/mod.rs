// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually running the supervised command
//! through the user's shell, using `tokio::process::Command`, and reporting
//! how it terminated.
//!
//! - [`termination`] turns an OS exit status into a [`Termination`], mapping
//!   signal deaths onto a stable exit code.
//! - [`spawner`] provides the `Spawner` trait the supervisor talks to, which
//!   tests replace with a scripted fake.
//! - [`shell`] is the production `ShellSpawner`.

pub mod shell;
pub mod spawner;
pub mod termination;

pub use shell::ShellSpawner;
pub use spawner::{CommandSpec, Spawner};
pub use termination::{INTERRUPT_SIGNAL, Termination};
