//! Deferred callbacks for the toggle pulse
//!
//! The orchestrator never touches a clock directly; the browser schedules
//! with `setTimeout`, tests fire timers by hand.

use std::time::Duration;

/// How long a toggled task keeps its "shake" pulse
pub const PULSE_DURATION: Duration = Duration::from_millis(400);

/// Runs a callback once after a delay
pub trait Scheduler {
    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> Box<dyn TimerHandle>;
}

/// A scheduled callback
///
/// Dropping a handle must NOT cancel it; only `cancel` does.
pub trait TimerHandle {
    fn cancel(self: Box<Self>);
}
