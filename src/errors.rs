// src/errors.rs

//! Crate-wide error type and exit code constants.

use thiserror::Error;

/// Exit code reported when the shell itself could not be started.
///
/// Chosen to stay clear of the shell's own 126/127 "not executable" /
/// "not found" codes, which a command that *did* start can legitimately
/// return.
pub const SPAWN_FAILURE_EXIT_CODE: i32 = 125;

/// Exit code for internal failures (logging, signal registration, or losing
/// track of a command that did start).
pub const INTERNAL_ERROR_EXIT_CODE: i32 = 1;

#[derive(Error, Debug)]
pub enum PlzrunError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("could not spawn '{shell}': {source}")]
    Spawn {
        shell: String,
        #[source]
        source: std::io::Error,
    },

    #[error("lost track of the running command: {source}")]
    Wait {
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, PlzrunError>;
