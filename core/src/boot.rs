//! Timed boot sequence shown before the shell becomes interactive.

use std::fmt;
use std::time::Duration;

use orbit_types::{BOOT_PROGRESS_MAX, BootPhase, BootState, BootTiming};

type CompletionFn = Box<dyn FnOnce()>;

/// Lifecycle of the boot timer. Moves strictly left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BootTimer {
    /// `start` has not been called.
    Idle,
    /// Interval timer armed; `carry` is time not yet consumed by a tick.
    Ticking { carry: Duration },
    /// Progress hit 100; waiting out the exit transition.
    Exiting { remaining: Duration },
    /// Completion callback has fired.
    Done,
    /// Torn down before completion. The callback was dropped uninvoked.
    Cancelled,
}

/// Progress sequence `0..=100` through init → loading → ready.
///
/// Single-shot: once completed or cancelled it cannot be restarted.
pub struct BootSequence {
    timing: BootTiming,
    state: BootState,
    timer: BootTimer,
    on_complete: Option<CompletionFn>,
}

impl BootSequence {
    #[must_use]
    pub fn new(timing: BootTiming) -> Self {
        Self {
            timing,
            state: BootState::default(),
            timer: BootTimer::Idle,
            on_complete: None,
        }
    }

    /// Arm the interval timer. `on_complete` fires once, `exit_delay` after
    /// progress reaches 100. Calling `start` again is a no-op.
    pub fn start(&mut self, on_complete: impl FnOnce() + 'static) {
        if self.timer != BootTimer::Idle {
            tracing::debug!(timer = ?self.timer, "Boot sequence already started");
            return;
        }
        self.on_complete = Some(Box::new(on_complete));
        self.timer = BootTimer::Ticking {
            carry: Duration::ZERO,
        };
        tracing::debug!(tick = ?self.timing.tick, "Boot sequence started");
    }

    /// Advance the timers by one frame's worth of time.
    pub fn advance(&mut self, delta: Duration) {
        let mut leftover = delta;

        if let BootTimer::Ticking { carry } = self.timer {
            let mut carry = carry.saturating_add(leftover);
            leftover = Duration::ZERO;
            while carry >= self.timing.tick {
                carry -= self.timing.tick;
                self.tick();
                if !matches!(self.timer, BootTimer::Ticking { .. }) {
                    // Time past the final tick counts toward the exit delay.
                    leftover = carry;
                    break;
                }
            }
            if let BootTimer::Ticking { .. } = self.timer {
                self.timer = BootTimer::Ticking { carry };
            }
        }

        if let BootTimer::Exiting { remaining } = self.timer {
            if leftover >= remaining {
                self.complete();
            } else {
                self.timer = BootTimer::Exiting {
                    remaining: remaining - leftover,
                };
            }
        }
    }

    /// Apply a single progress step. Ignored unless the interval timer is armed.
    pub fn tick(&mut self) {
        if !matches!(self.timer, BootTimer::Ticking { .. }) {
            return;
        }

        self.state.progress = (self.state.progress + 1).min(BOOT_PROGRESS_MAX);
        let next = self.state.phase.next_for(self.state.progress);
        if next != self.state.phase {
            tracing::debug!(from = ?self.state.phase, to = ?next, progress = self.state.progress, "Boot phase changed");
            self.state.phase = next;
        }

        if self.state.progress >= BOOT_PROGRESS_MAX {
            self.state.exiting = true;
            tracing::debug!(delay = ?self.timing.exit_delay, "Boot progress complete, exiting");
            if self.timing.exit_delay.is_zero() {
                self.complete();
            } else {
                self.timer = BootTimer::Exiting {
                    remaining: self.timing.exit_delay,
                };
            }
        }
    }

    /// Release the timer without invoking the completion callback.
    pub fn cancel(&mut self) {
        if matches!(self.timer, BootTimer::Done | BootTimer::Cancelled) {
            return;
        }
        self.on_complete = None;
        self.timer = BootTimer::Cancelled;
        tracing::debug!(progress = self.state.progress, "Boot sequence cancelled");
    }

    #[must_use]
    pub fn state(&self) -> BootState {
        self.state
    }

    #[must_use]
    pub fn phase(&self) -> BootPhase {
        self.state.phase
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.timer == BootTimer::Done
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(
            self.timer,
            BootTimer::Ticking { .. } | BootTimer::Exiting { .. }
        )
    }

    fn complete(&mut self) {
        self.timer = BootTimer::Done;
        if let Some(on_complete) = self.on_complete.take() {
            tracing::debug!("Boot sequence handing off to shell");
            on_complete();
        }
    }
}

impl Drop for BootSequence {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for BootSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootSequence")
            .field("timing", &self.timing)
            .field("state", &self.state)
            .field("timer", &self.timer)
            .field("has_callback", &self.on_complete.is_some())
            .finish()
    }
}
