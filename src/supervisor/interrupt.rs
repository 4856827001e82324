// src/supervisor/interrupt.rs

//! Interrupt (Ctrl-C) delivery to the supervisor.
//!
//! Ctrl-C reaches every process in the foreground group, so the child and the
//! supervisor both see it. The listener keeps the supervisor alive and counts
//! interrupt requests; the loop compares the count before and after each
//! attempt or pause.

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::errors::Result;

/// Receives interrupt requests.
#[derive(Debug)]
pub struct InterruptListener {
    rx: watch::Receiver<u64>,
    seen: u64,
    // Keeps `rx` open for listeners with no real source.
    _keepalive: Option<watch::Sender<u64>>,
}

/// Test/driver side of [`InterruptListener::channel`].
#[derive(Debug, Clone)]
pub struct InterruptTrigger {
    tx: watch::Sender<u64>,
}

impl InterruptTrigger {
    pub fn interrupt(&self) {
        self.tx.send_modify(|count| *count += 1);
    }
}

impl InterruptListener {
    /// A listener that never fires.
    pub fn never() -> Self {
        let (tx, rx) = watch::channel(0);
        Self {
            rx,
            seen: 0,
            _keepalive: Some(tx),
        }
    }

    /// A listener driven manually through the returned trigger.
    pub fn channel() -> (InterruptTrigger, Self) {
        let (tx, rx) = watch::channel(0);
        let listener = Self {
            rx,
            seen: 0,
            _keepalive: None,
        };
        (InterruptTrigger { tx }, listener)
    }

    /// Install the process-wide interrupt handler.
    ///
    /// Must be called from within a Tokio runtime. From this point on the
    /// supervisor no longer dies to SIGINT itself.
    #[cfg(unix)]
    pub fn install() -> Result<Self> {
        use tokio::signal::unix::{SignalKind, signal};

        let mut sigint = signal(SignalKind::interrupt())?;
        let (trigger, listener) = Self::channel();

        tokio::spawn(async move {
            while sigint.recv().await.is_some() {
                debug!("interrupt received by supervisor");
                trigger.interrupt();
            }
        });

        Ok(listener)
    }

    #[cfg(not(unix))]
    pub fn install() -> Result<Self> {
        let (trigger, listener) = Self::channel();

        tokio::spawn(async move {
            loop {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    warn!(error = %e, "failed to listen for Ctrl+C");
                    return;
                }
                debug!("interrupt received by supervisor");
                trigger.interrupt();
            }
        });

        Ok(listener)
    }

    /// Forget any interrupts delivered so far.
    pub fn mark_seen(&mut self) {
        self.seen = *self.rx.borrow_and_update();
    }

    /// Whether an interrupt arrived since the last [`mark_seen`](Self::mark_seen).
    pub fn pending(&self) -> bool {
        *self.rx.borrow() != self.seen
    }

    /// Resolve once an interrupt arrives that has not been seen yet.
    pub async fn interrupted(&mut self) {
        loop {
            if self.pending() {
                return;
            }
            if self.rx.changed().await.is_err() {
                warn!("interrupt source closed; interrupts will be ignored");
                std::future::pending::<()>().await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn trigger_marks_pending_until_seen() {
        let (trigger, mut listener) = InterruptListener::channel();
        assert!(!listener.pending());

        trigger.interrupt();
        assert!(listener.pending());

        listener.mark_seen();
        assert!(!listener.pending());
    }

    #[tokio::test(start_paused = true)]
    async fn interrupted_waits_for_new_interrupt() {
        let (trigger, mut listener) = InterruptListener::channel();
        trigger.interrupt();
        listener.mark_seen();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(3)).await;
            trigger.interrupt();
        });

        let started = tokio::time::Instant::now();
        listener.interrupted().await;
        assert_eq!(started.elapsed(), Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn never_listener_does_not_fire() {
        let mut listener = InterruptListener::never();
        let res = tokio::time::timeout(Duration::from_secs(60), listener.interrupted()).await;
        assert!(res.is_err());
    }
}
