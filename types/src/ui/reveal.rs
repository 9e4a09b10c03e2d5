//! Section entrance effects.
//!
//! Each section slides in the first time it becomes visible and then stays
//! put for the rest of the session.

use std::time::Duration;

use super::animation::{AnimPhase, EffectTimer, ease_out_cubic};
use crate::SectionId;

#[derive(Debug, Clone)]
pub struct RevealEffect {
    section: SectionId,
    timer: EffectTimer,
}

impl RevealEffect {
    #[must_use]
    pub fn new(section: SectionId, duration: Duration) -> Self {
        Self {
            section,
            timer: EffectTimer::new(duration),
        }
    }

    pub fn advance(&mut self, delta: Duration) {
        self.timer.advance(delta);
    }

    #[must_use]
    pub fn phase(&self) -> AnimPhase {
        self.timer.phase()
    }

    #[must_use]
    pub fn section(&self) -> SectionId {
        self.section
    }

    /// Columns the content is still shifted right, shrinking to zero.
    #[must_use]
    pub fn offset(&self, max_shift: u16) -> u16 {
        let remaining = 1.0 - ease_out_cubic(self.timer.progress());
        (remaining * f32::from(max_shift)).round() as u16
    }
}

/// Tracks which sections have already been revealed.
#[derive(Debug, Clone, Default)]
pub struct RevealTracker {
    revealed: Vec<SectionId>,
    running: Vec<RevealEffect>,
    duration: Duration,
}

impl RevealTracker {
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            revealed: Vec::new(),
            running: Vec::new(),
            duration,
        }
    }

    /// Mark a section visible. Starts its effect only the first time.
    pub fn mark_visible(&mut self, section: SectionId) {
        if self.revealed.contains(&section) {
            return;
        }
        self.revealed.push(section);
        if !self.duration.is_zero() {
            self.running.push(RevealEffect::new(section, self.duration));
        }
    }

    pub fn advance(&mut self, delta: Duration) {
        for effect in &mut self.running {
            effect.advance(delta);
        }
        self.running
            .retain(|effect| !matches!(effect.phase(), AnimPhase::Completed));
    }

    #[must_use]
    pub fn is_revealed(&self, section: SectionId) -> bool {
        self.revealed.contains(&section)
    }

    #[must_use]
    pub fn effect(&self, section: SectionId) -> Option<&RevealEffect> {
        self.running.iter().find(|e| e.section() == section)
    }
}
