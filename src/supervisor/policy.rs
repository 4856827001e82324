// src/supervisor/policy.rs

//! Pure retry policy state machine.
//!
//! This module decides, after each attempt, whether to stop or run again and
//! how long to pause first. It has no Tokio types, no processes and no IO,
//! so every transition can be unit tested directly.

use std::time::Duration;

use crate::config::{RetryBudget, SupervisorConfig};
use crate::exec::Termination;

use super::Outcome;

/// Factor the pause multiplier grows by after each failed attempt when
/// exponential backoff is on.
pub const BACKOFF_EXPONENT: f64 = 1.5;

/// Where the supervision loop currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Retrying,
    Succeeded,
    Interrupted,
    ExhaustedRetries,
    SpawnFailed,
    WaitFailed,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Phase::Succeeded
                | Phase::Interrupted
                | Phase::ExhaustedRetries
                | Phase::SpawnFailed
                | Phase::WaitFailed
        )
    }
}

/// Mutable loop state, owned by the policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopState {
    pub attempt: u64,
    pub sleep_multiplier: f64,
    pub last_exit_code: i32,
}

impl Default for LoopState {
    fn default() -> Self {
        Self {
            attempt: 0,
            sleep_multiplier: 1.0,
            last_exit_code: 0,
        }
    }
}

/// What the loop should do after an attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Stop with this outcome.
    Finish(Outcome),
    /// Run again, pausing first when `pause` is set.
    Retry { pause: Option<Duration> },
}

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    budget: RetryBudget,
    base_sleep_secs: u64,
    exponential: bool,
    state: LoopState,
    phase: Phase,
}

impl RetryPolicy {
    pub fn new(budget: RetryBudget, base_sleep_secs: u64, exponential: bool) -> Self {
        Self {
            budget,
            base_sleep_secs,
            exponential,
            state: LoopState::default(),
            phase: Phase::Idle,
        }
    }

    pub fn from_config(config: &SupervisorConfig) -> Self {
        Self::new(config.retries, config.base_sleep_secs, config.exponential)
    }

    pub fn state(&self) -> &LoopState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn budget(&self) -> RetryBudget {
        self.budget
    }

    /// Enter `Running` for the next attempt and return its 1-based number.
    pub fn begin_attempt(&mut self) -> u64 {
        debug_assert!(!self.phase.is_terminal(), "attempt started after {:?}", self.phase);
        self.state.attempt += 1;
        self.phase = Phase::Running;
        self.state.attempt
    }

    /// Decide what follows a finished attempt.
    ///
    /// `interrupt_seen` is true when the supervisor itself received an
    /// interrupt while the attempt ran. A failing attempt in that case is
    /// treated as interrupted even if the shell turned the signal into a
    /// plain exit code.
    pub fn on_termination(&mut self, termination: Termination, interrupt_seen: bool) -> Decision {
        self.state.last_exit_code = termination.exit_code;

        if termination.is_interrupt() || (interrupt_seen && !termination.is_success()) {
            return self.finish(
                Phase::Interrupted,
                Outcome::Interrupted {
                    exit_code: termination.exit_code,
                },
            );
        }

        if termination.is_success() {
            return self.finish(Phase::Succeeded, Outcome::Succeeded);
        }

        if !self.budget.allows_retry_after(self.state.attempt) {
            return self.finish(
                Phase::ExhaustedRetries,
                Outcome::ExhaustedRetries {
                    exit_code: termination.exit_code,
                    attempts: self.state.attempt,
                },
            );
        }

        // The pause uses the current multiplier; growth only affects the next one.
        let pause = self.pause_for(self.state.sleep_multiplier);
        if self.exponential {
            self.state.sleep_multiplier *= BACKOFF_EXPONENT;
        }
        self.phase = Phase::Retrying;
        Decision::Retry { pause }
    }

    /// The command could not be started at all; never retried.
    pub fn on_spawn_failure(&mut self, message: impl Into<String>) -> Outcome {
        self.phase = Phase::SpawnFailed;
        Outcome::SpawnFailed {
            message: message.into(),
        }
    }

    /// The command started but waiting for it failed; never retried.
    pub fn on_wait_failure(&mut self, message: impl Into<String>) -> Outcome {
        self.phase = Phase::WaitFailed;
        Outcome::WaitFailed {
            message: message.into(),
        }
    }

    /// An interrupt arrived during the pause between attempts.
    pub fn on_interrupt_while_paused(&mut self) -> Outcome {
        self.phase = Phase::Interrupted;
        Outcome::Interrupted {
            exit_code: self.state.last_exit_code,
        }
    }

    /// `ceil(base * multiplier)` seconds, or `None` when the base sleep is 0.
    ///
    /// Saturates at `Duration::MAX` once the product no longer fits.
    pub fn pause_for(&self, multiplier: f64) -> Option<Duration> {
        if self.base_sleep_secs == 0 {
            return None;
        }
        let secs = (self.base_sleep_secs as f64 * multiplier).ceil();
        Some(Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX))
    }

    fn finish(&mut self, phase: Phase, outcome: Outcome) -> Decision {
        self.phase = phase;
        Decision::Finish(outcome)
    }
}
