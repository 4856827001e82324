use std::collections::VecDeque;
use std::future::Future;
use std::io;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use plzrun::errors::{PlzrunError, Result};
use plzrun::exec::{CommandSpec, Spawner, Termination};
use plzrun::supervisor::InterruptTrigger;
use tokio::time::Instant;

/// One scripted attempt.
#[derive(Debug, Clone, Copy)]
pub enum FakeAttempt {
    /// The command ran and terminated like this.
    Ran(Termination),
    /// The shell could not be started.
    SpawnFails(io::ErrorKind),
    /// The shell started, but waiting for it failed.
    WaitFails(io::ErrorKind),
}

/// A fake spawner that:
/// - plays back a script of attempt results, repeating the last one forever
/// - records when each attempt started (on Tokio's clock, so paused-time
///   tests see exact pause lengths)
/// - optionally delivers an interrupt while a given attempt is running
#[derive(Debug, Clone)]
pub struct FakeSpawner {
    script: VecDeque<FakeAttempt>,
    fallback: FakeAttempt,
    interrupt_during: Option<(usize, InterruptTrigger)>,
    started_at: Arc<Mutex<Vec<Instant>>>,
    specs: Arc<Mutex<Vec<CommandSpec>>>,
}

impl FakeSpawner {
    pub fn scripted(script: Vec<FakeAttempt>) -> Self {
        let fallback = *script
            .last()
            .expect("script needs at least one attempt");
        Self {
            script: script.into(),
            fallback,
            interrupt_during: None,
            started_at: Arc::new(Mutex::new(Vec::new())),
            specs: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every attempt ends with the same exit code.
    pub fn always_exits(code: i32) -> Self {
        Self::scripted(vec![FakeAttempt::Ran(Termination::exited(code))])
    }

    /// `failures` attempts exit with `code`, then the command succeeds.
    pub fn fails_then_succeeds(failures: usize, code: i32) -> Self {
        let mut script = vec![FakeAttempt::Ran(Termination::exited(code)); failures];
        script.push(FakeAttempt::Ran(Termination::exited(0)));
        Self::scripted(script)
    }

    /// Fire `trigger` while attempt number `attempt` (1-based) runs, as if
    /// the user pressed Ctrl-C and the command exited on its own terms.
    pub fn interrupt_during(mut self, attempt: usize, trigger: InterruptTrigger) -> Self {
        self.interrupt_during = Some((attempt, trigger));
        self
    }

    /// Shared handle to the start instants of every attempt so far.
    pub fn started_at(&self) -> Arc<Mutex<Vec<Instant>>> {
        Arc::clone(&self.started_at)
    }

    /// Shared handle to the command specs each attempt was given.
    pub fn specs(&self) -> Arc<Mutex<Vec<CommandSpec>>> {
        Arc::clone(&self.specs)
    }

    fn next_attempt(&mut self) -> FakeAttempt {
        self.script.pop_front().unwrap_or(self.fallback)
    }
}

impl Spawner for FakeSpawner {
    fn spawn_and_wait(
        &mut self,
        spec: &CommandSpec,
    ) -> Pin<Box<dyn Future<Output = Result<Termination>> + Send + '_>> {
        let attempt_no = {
            let mut started = self.started_at.lock().unwrap();
            started.push(Instant::now());
            started.len()
        };
        self.specs.lock().unwrap().push(spec.clone());
        if let Some((when, trigger)) = &self.interrupt_during {
            if *when == attempt_no {
                trigger.interrupt();
            }
        }
        let attempt = self.next_attempt();
        let shell = spec.shell.program.clone();

        Box::pin(async move {
            match attempt {
                FakeAttempt::Ran(termination) => Ok(termination),
                FakeAttempt::SpawnFails(kind) => Err(PlzrunError::Spawn {
                    shell,
                    source: io::Error::from(kind),
                }),
                FakeAttempt::WaitFails(kind) => Err(PlzrunError::Wait {
                    source: io::Error::from(kind),
                }),
            }
        })
    }
}
