// src/supervisor/report.rs

//! User-facing progress lines.
//!
//! The supervisor describes what happens as [`SupervisorEvent`]s and hands
//! them to a [`Reporter`]. Production uses [`TracingReporter`], which emits
//! one timestamped line per event; tests record the events instead.

use std::io::Write;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::config::RetryBudget;
use crate::exec::Termination;
use crate::logging::REPORT_TARGET;

/// Moves the cursor home, then clears the visible screen. Scrollback is kept.
pub const SCREEN_RESET: &str = "\x1b[H\x1b[2J";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SupervisorEvent {
    /// Reset the visible terminal before the next run banner.
    ScreenReset,
    RunStarted {
        attempt: u64,
        budget: RetryBudget,
        shell: String,
        command: String,
    },
    Succeeded,
    /// The child died to the interrupt signal, or failed after Ctrl-C.
    Interrupted { termination: Termination },
    AttemptFailed { termination: Termination },
    RetryLimitHit { attempts: u64 },
    Pausing { duration: Duration },
    InterruptedWhilePaused,
    SpawnFailed { message: String },
    WaitFailed { message: String },
}

pub trait Reporter: Send {
    fn report(&mut self, event: &SupervisorEvent);
}

/// Renders events as log lines on the `plzrun::report` target.
#[derive(Debug, Default)]
pub struct TracingReporter;

impl TracingReporter {
    pub fn new() -> Self {
        Self
    }

    fn reset_screen(&self) {
        if let Err(e) = write_screen_reset(&mut std::io::stdout().lock()) {
            debug!(error = %e, "failed to reset terminal");
        }
    }
}

pub fn write_screen_reset(out: &mut impl Write) -> std::io::Result<()> {
    out.write_all(SCREEN_RESET.as_bytes())?;
    out.flush()
}

impl Reporter for TracingReporter {
    fn report(&mut self, event: &SupervisorEvent) {
        match event {
            SupervisorEvent::ScreenReset => self.reset_screen(),
            SupervisorEvent::RunStarted {
                attempt,
                budget,
                shell,
                command,
            } => {
                info!(target: REPORT_TARGET, "Run {attempt}/{budget} using {shell}: {command}");
            }
            SupervisorEvent::Succeeded => {
                info!(target: REPORT_TARGET, "Exited with success (exit code 0)");
            }
            SupervisorEvent::Interrupted { termination } => match termination.signal_name() {
                Some(name) => info!(target: REPORT_TARGET, "Terminated by {name} (Ctrl-C)"),
                None => info!(
                    target: REPORT_TARGET,
                    "Interrupted by Ctrl-C (exit code {})", termination.exit_code
                ),
            },
            SupervisorEvent::AttemptFailed { termination } => match termination.signal_name() {
                Some(name) => warn!(
                    target: REPORT_TARGET,
                    "Exited with code {} ({name})", termination.exit_code
                ),
                None => warn!(target: REPORT_TARGET, "Exited with code {}", termination.exit_code),
            },
            SupervisorEvent::RetryLimitHit { attempts } => {
                error!(target: REPORT_TARGET, attempts, "Retry limit hit - aborting");
            }
            SupervisorEvent::Pausing { duration } => {
                info!(
                    target: REPORT_TARGET,
                    "Pausing for {}s between executions",
                    duration.as_secs()
                );
            }
            SupervisorEvent::InterruptedWhilePaused => {
                info!(target: REPORT_TARGET, "Interrupted by Ctrl-C while pausing");
            }
            SupervisorEvent::SpawnFailed { message } => {
                error!(target: REPORT_TARGET, "Could not start command: {message}");
            }
            SupervisorEvent::WaitFailed { message } => {
                error!(target: REPORT_TARGET, "Stopped supervising: {message}");
            }
        }
    }
}
