use std::sync::{Arc, Mutex};

use plzrun::supervisor::{Reporter, SupervisorEvent};

/// Reporter that keeps every event for later assertions.
#[derive(Debug, Clone, Default)]
pub struct RecordingReporter {
    events: Arc<Mutex<Vec<SupervisorEvent>>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SupervisorEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Number of `RunStarted` events, i.e. attempts made.
    pub fn runs(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, SupervisorEvent::RunStarted { .. }))
            .count()
    }

    pub fn contains(&self, event: &SupervisorEvent) -> bool {
        self.events().contains(event)
    }
}

impl Reporter for RecordingReporter {
    fn report(&mut self, event: &SupervisorEvent) {
        tracing::debug!(?event, "recorded supervisor event");
        self.events.lock().unwrap().push(event.clone());
    }
}
