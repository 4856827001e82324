// src/supervisor/outcome.rs

use std::fmt;

use crate::errors::{INTERNAL_ERROR_EXIT_CODE, SPAWN_FAILURE_EXIT_CODE};

/// Terminal result of a supervision run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    Interrupted { exit_code: i32 },
    ExhaustedRetries { exit_code: i32, attempts: u64 },
    SpawnFailed { message: String },
    /// The command started, but waiting for it failed.
    WaitFailed { message: String },
}

impl Outcome {
    /// Exit code the `plzrun` process should terminate with.
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Succeeded => 0,
            Outcome::Interrupted { exit_code } => *exit_code,
            Outcome::ExhaustedRetries { exit_code, .. } => *exit_code,
            Outcome::SpawnFailed { .. } => SPAWN_FAILURE_EXIT_CODE,
            Outcome::WaitFailed { .. } => INTERNAL_ERROR_EXIT_CODE,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Succeeded => f.write_str("succeeded"),
            Outcome::Interrupted { exit_code } => write!(f, "interrupted (exit code {exit_code})"),
            Outcome::ExhaustedRetries {
                exit_code,
                attempts,
            } => write!(f, "gave up after {attempts} attempts (exit code {exit_code})"),
            Outcome::SpawnFailed { message } => write!(f, "could not start command: {message}"),
            Outcome::WaitFailed { message } => write!(f, "{message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes() {
        assert_eq!(Outcome::Succeeded.exit_code(), 0);
        assert_eq!(Outcome::Interrupted { exit_code: 130 }.exit_code(), 130);
        assert_eq!(
            Outcome::ExhaustedRetries {
                exit_code: 7,
                attempts: 3
            }
            .exit_code(),
            7
        );
        assert_eq!(
            Outcome::SpawnFailed {
                message: "nope".into()
            }
            .exit_code(),
            SPAWN_FAILURE_EXIT_CODE
        );
        assert_eq!(
            Outcome::WaitFailed {
                message: "gone".into()
            }
            .exit_code(),
            INTERNAL_ERROR_EXIT_CODE
        );
    }
}
