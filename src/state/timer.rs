//! Cancellable one-shot task driven by explicit ticks.

use std::time::Duration;

/// One-shot delayed task.
///
/// At most one firing is pending at a time; scheduling again replaces it.
/// The task never fires after `cancel`.
#[derive(Debug, Clone, Default)]
pub struct ScheduledTask {
    remaining: Option<Duration>,
}

impl ScheduledTask {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the task to fire once `delay` has elapsed.
    pub fn schedule(&mut self, delay: Duration) {
        self.remaining = Some(delay);
    }

    /// Disarm. Returns whether a firing was pending.
    pub fn cancel(&mut self) -> bool {
        self.remaining.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.remaining.is_some()
    }

    /// Advance by `dt`. Returns true exactly once, when the delay runs out.
    pub fn tick(&mut self, dt: Duration) -> bool {
        match self.remaining {
            Some(left) if dt >= left => {
                self.remaining = None;
                true
            }
            Some(left) => {
                self.remaining = Some(left - dt);
                false
            }
            None => false,
        }
    }
}
