// src/supervisor/mod.rs

//! The supervision loop.
//!
//! - [`policy`] is the pure retry state machine (attempt counting, backoff,
//!   terminal outcomes).
//! - [`runner`] is the async shell that spawns attempts, sleeps and feeds
//!   results back into the policy.
//! - [`interrupt`] delivers Ctrl-C to the loop.
//! - [`report`] turns loop events into user-facing lines.

pub mod interrupt;
pub mod outcome;
pub mod policy;
pub mod report;
pub mod runner;

pub use interrupt::{InterruptListener, InterruptTrigger};
pub use outcome::Outcome;
pub use policy::{BACKOFF_EXPONENT, Decision, LoopState, Phase, RetryPolicy};
pub use report::{Reporter, SupervisorEvent, TracingReporter};
pub use runner::Supervisor;
