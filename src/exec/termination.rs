// src/exec/termination.rs

//! How a child process ended.

use std::fmt;
use std::process::ExitStatus;

/// Signal number of the user interrupt (Ctrl-C).
#[cfg(unix)]
pub const INTERRUPT_SIGNAL: i32 = libc::SIGINT;
#[cfg(not(unix))]
pub const INTERRUPT_SIGNAL: i32 = 2;

/// Exit code used when the OS reports neither a code nor a signal.
pub const UNKNOWN_EXIT_CODE: i32 = 1;

/// Offset added to a signal number when a child died to a signal, matching
/// the convention POSIX shells use for `$?`.
pub const SIGNAL_EXIT_CODE_BASE: i32 = 128;

/// Result of one finished attempt.
///
/// `exit_code` is always populated: a child killed by signal `N` reports
/// `128 + N` (so SIGINT gives 130, SIGTERM 143).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Termination {
    pub exit_code: i32,
    pub signal: Option<i32>,
}

impl Termination {
    pub fn exited(exit_code: i32) -> Self {
        Self {
            exit_code,
            signal: None,
        }
    }

    pub fn signaled(signal: i32) -> Self {
        Self {
            exit_code: SIGNAL_EXIT_CODE_BASE + signal,
            signal: Some(signal),
        }
    }

    pub fn from_status(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return Self::exited(code);
        }
        match raw_signal(&status) {
            Some(signal) => Self::signaled(signal),
            None => Self::exited(UNKNOWN_EXIT_CODE),
        }
    }

    pub fn is_success(&self) -> bool {
        self.signal.is_none() && self.exit_code == 0
    }

    /// True when the child died to the interrupt signal.
    pub fn is_interrupt(&self) -> bool {
        self.signal == Some(INTERRUPT_SIGNAL)
    }

    pub fn signal_name(&self) -> Option<String> {
        self.signal.map(signal_name)
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.signal_name() {
            Some(name) => write!(f, "exit code {} ({name})", self.exit_code),
            None => write!(f, "exit code {}", self.exit_code),
        }
    }
}

#[cfg(unix)]
fn raw_signal(status: &ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn raw_signal(_status: &ExitStatus) -> Option<i32> {
    None
}

/// Human readable name for a signal number, e.g. `SIGTERM`.
#[cfg(unix)]
pub fn signal_name(signal: i32) -> String {
    let name = match signal {
        libc::SIGHUP => "SIGHUP",
        libc::SIGINT => "SIGINT",
        libc::SIGQUIT => "SIGQUIT",
        libc::SIGILL => "SIGILL",
        libc::SIGTRAP => "SIGTRAP",
        libc::SIGABRT => "SIGABRT",
        libc::SIGBUS => "SIGBUS",
        libc::SIGFPE => "SIGFPE",
        libc::SIGKILL => "SIGKILL",
        libc::SIGUSR1 => "SIGUSR1",
        libc::SIGSEGV => "SIGSEGV",
        libc::SIGUSR2 => "SIGUSR2",
        libc::SIGPIPE => "SIGPIPE",
        libc::SIGALRM => "SIGALRM",
        libc::SIGTERM => "SIGTERM",
        other => return format!("signal {other}"),
    };
    name.to_string()
}

#[cfg(not(unix))]
pub fn signal_name(signal: i32) -> String {
    format!("signal {signal}")
}
