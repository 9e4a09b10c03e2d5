//! Page scroll offset and programmatic smooth scrolling.

use std::mem;
use std::time::Duration;

use orbit_types::ui::{EffectTimer, ease_out_cubic};

use crate::navigation::ScrollPort;

#[derive(Debug, Clone)]
struct SmoothScroll {
    from: u16,
    to: u16,
    timer: EffectTimer,
}

impl SmoothScroll {
    fn offset(&self) -> u16 {
        let t = ease_out_cubic(self.timer.progress());
        let from = f32::from(self.from);
        let to = f32::from(self.to);
        (from + (to - from) * t).round() as u16
    }
}

/// What happened to the scroll position since the previous frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollStep {
    /// The offset changed.
    pub moved: bool,
    /// A programmatic scroll finished, was applied instantly, or was
    /// interrupted by the user.
    pub settled: bool,
}

/// Owns the page scroll offset.
///
/// User scrolling is applied immediately and interrupts any animation.
/// Programmatic scrolling animates with ease-out-cubic over
/// `smooth_duration`, or jumps when the duration is zero.
#[derive(Debug, Clone)]
pub struct Scroller {
    offset: u16,
    max_offset: u16,
    smooth_duration: Duration,
    animation: Option<SmoothScroll>,
    step: ScrollStep,
}

impl Scroller {
    #[must_use]
    pub fn new(smooth_duration: Duration) -> Self {
        Self {
            offset: 0,
            max_offset: 0,
            smooth_duration,
            animation: None,
            step: ScrollStep::default(),
        }
    }

    #[must_use]
    pub fn offset(&self) -> u16 {
        self.offset
    }

    #[must_use]
    pub fn max_offset(&self) -> u16 {
        self.max_offset
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Animation target, if a programmatic scroll is in flight.
    #[must_use]
    pub fn target(&self) -> Option<u16> {
        self.animation.as_ref().map(|a| a.to)
    }

    /// Update the scrollable range (content height minus viewport height).
    pub fn set_max_offset(&mut self, max_offset: u16) {
        self.max_offset = max_offset;
        if let Some(animation) = &mut self.animation {
            animation.to = animation.to.min(max_offset);
        }
        self.set_offset(self.offset.min(max_offset));
    }

    /// Scroll by `rows` (negative is up). Returns true if the offset changed.
    pub fn scroll_by(&mut self, rows: i32) -> bool {
        self.interrupt();
        let target = (i32::from(self.offset) + rows).clamp(0, i32::from(self.max_offset));
        self.set_offset(u16::try_from(target).unwrap_or(self.max_offset))
    }

    /// Jump to `offset` immediately. Returns true if the offset changed.
    pub fn jump_to(&mut self, offset: u16) -> bool {
        self.interrupt();
        self.set_offset(offset.min(self.max_offset))
    }

    /// Advance the animation and report what changed since the last call.
    pub fn advance(&mut self, delta: Duration) -> ScrollStep {
        if let Some(animation) = &mut self.animation {
            animation.timer.advance(delta);
            let next = animation.offset();
            let finished = animation.timer.is_finished();
            self.set_offset(next);
            if finished {
                self.animation = None;
                self.step.settled = true;
            }
        }
        mem::take(&mut self.step)
    }

    fn interrupt(&mut self) {
        if self.animation.take().is_some() {
            tracing::debug!(offset = self.offset, "Smooth scroll interrupted");
            self.step.settled = true;
        }
    }

    fn set_offset(&mut self, offset: u16) -> bool {
        if offset == self.offset {
            return false;
        }
        self.offset = offset;
        self.step.moved = true;
        true
    }
}

impl ScrollPort for Scroller {
    fn smooth_scroll_to(&mut self, offset: u16) {
        let to = offset.min(self.max_offset);
        self.animation = None;

        if self.smooth_duration.is_zero() || to == self.offset {
            self.set_offset(to);
            self.step.settled = true;
            return;
        }

        self.animation = Some(SmoothScroll {
            from: self.offset,
            to,
            timer: EffectTimer::new(self.smooth_duration),
        });
    }
}
