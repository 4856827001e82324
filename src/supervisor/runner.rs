// src/supervisor/runner.rs

use std::fmt;

use tracing::debug;

use crate::config::SupervisorConfig;
use crate::errors::PlzrunError;
use crate::exec::{CommandSpec, Spawner, Termination};

use super::interrupt::InterruptListener;
use super::policy::{Decision, RetryPolicy};
use super::report::{Reporter, SupervisorEvent};
use super::Outcome;

/// Runs the command until the retry policy says stop.
///
/// This is the async shell around [`RetryPolicy`]: it spawns attempts through
/// a [`Spawner`], sleeps between them, watches for interrupts and reports
/// progress. All decisions are delegated to the policy. It never exits the
/// process; the returned [`Outcome`] carries the exit code.
pub struct Supervisor<S: Spawner, R: Reporter> {
    config: SupervisorConfig,
    spec: CommandSpec,
    policy: RetryPolicy,
    spawner: S,
    reporter: R,
    interrupts: InterruptListener,
}

impl<S: Spawner, R: Reporter> fmt::Debug for Supervisor<S, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Supervisor")
            .field("config", &self.config)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl<S: Spawner, R: Reporter> Supervisor<S, R> {
    pub fn new(
        config: SupervisorConfig,
        spawner: S,
        reporter: R,
        interrupts: InterruptListener,
    ) -> Self {
        let spec = CommandSpec::from_config(&config);
        let policy = RetryPolicy::from_config(&config);
        Self {
            config,
            spec,
            policy,
            spawner,
            reporter,
            interrupts,
        }
    }

    /// Main supervision loop.
    pub async fn run(mut self) -> Outcome {
        debug!(config = ?self.config, "supervision started");

        loop {
            let attempt = self.policy.begin_attempt();

            if self.config.clear {
                self.reporter.report(&SupervisorEvent::ScreenReset);
            }
            self.reporter.report(&SupervisorEvent::RunStarted {
                attempt,
                budget: self.policy.budget(),
                shell: self.spec.shell.program.clone(),
                command: self.spec.command.clone(),
            });

            self.interrupts.mark_seen();
            let termination = match self.spawner.spawn_and_wait(&self.spec).await {
                Ok(termination) => termination,
                Err(err @ PlzrunError::Spawn { .. }) => {
                    let message = err.to_string();
                    self.reporter.report(&SupervisorEvent::SpawnFailed {
                        message: message.clone(),
                    });
                    let outcome = self.policy.on_spawn_failure(message);
                    return self.finish(outcome);
                }
                Err(err) => {
                    let message = err.to_string();
                    self.reporter.report(&SupervisorEvent::WaitFailed {
                        message: message.clone(),
                    });
                    let outcome = self.policy.on_wait_failure(message);
                    return self.finish(outcome);
                }
            };
            let interrupt_seen = self.interrupts.pending();

            match self.policy.on_termination(termination, interrupt_seen) {
                Decision::Finish(outcome) => {
                    self.report_final(&outcome, termination);
                    return self.finish(outcome);
                }
                Decision::Retry { pause } => {
                    self.reporter
                        .report(&SupervisorEvent::AttemptFailed { termination });

                    // Interrupts that land after the attempt ended still stop the loop.
                    let interrupted = match pause {
                        None => self.interrupts.pending(),
                        Some(duration) => {
                            self.reporter.report(&SupervisorEvent::Pausing { duration });
                            tokio::select! {
                                _ = tokio::time::sleep(duration) => false,
                                _ = self.interrupts.interrupted() => true,
                            }
                        }
                    };
                    if interrupted {
                        self.reporter.report(&SupervisorEvent::InterruptedWhilePaused);
                        let outcome = self.policy.on_interrupt_while_paused();
                        return self.finish(outcome);
                    }
                }
            }
        }
    }

    fn report_final(&mut self, outcome: &Outcome, termination: Termination) {
        match outcome {
            Outcome::Succeeded => self.reporter.report(&SupervisorEvent::Succeeded),
            Outcome::Interrupted { .. } => self
                .reporter
                .report(&SupervisorEvent::Interrupted { termination }),
            Outcome::ExhaustedRetries { attempts, .. } => {
                self.reporter
                    .report(&SupervisorEvent::AttemptFailed { termination });
                self.reporter.report(&SupervisorEvent::RetryLimitHit {
                    attempts: *attempts,
                });
            }
            // Reported where the spawner error is handled.
            Outcome::SpawnFailed { .. } | Outcome::WaitFailed { .. } => {}
        }
    }

    fn finish(&self, outcome: Outcome) -> Outcome {
        debug!(
            attempts = self.policy.state().attempt,
            phase = ?self.policy.phase(),
            exit_code = outcome.exit_code(),
            "supervision finished: {outcome}"
        );
        outcome
    }
}
