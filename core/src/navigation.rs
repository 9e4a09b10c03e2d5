//! Active-section arbitration.
//!
//! [`NavigationController`] is the only writer of [`NavigationState`].
//! Several sources compete to decide the active section; precedence is
//!
//! 1. focus lock: while an input holds focus, the focused section stays
//!    active and visibility reports are recorded but not applied;
//! 2. manual navigation settling: while a requested scroll is in flight only
//!    its target may become active, so sections scrolled past on the way
//!    do not flash in the navbar;
//! 3. intersection: the section most visible above the activation ratio.
//!
//! `scroll_to_section` never writes the active section itself. The scroll it
//! starts is picked up by visibility reports once the target settles.

use std::time::Duration;

use orbit_types::{NavigationState, PageGeometry, SectionId, SectionRegistry};

use crate::focus::{ContainerId, FocusProbe};
use crate::intersection::IntersectionEntry;

/// Receiver of programmatic scroll requests.
pub trait ScrollPort {
    /// Bring page row `offset` to the top of the viewport, smoothly.
    fn smooth_scroll_to(&mut self, offset: u16);
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct LiveRatio {
    ratio: f32,
    in_view: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BlurCheck {
    container: ContainerId,
    remaining: Duration,
}

#[derive(Debug, Clone)]
pub struct NavigationController {
    registry: SectionRegistry,
    state: NavigationState,
    /// Latest visibility per section, indexed by registry order. Kept
    /// current even while focus-locked so unlocking resumes from live state.
    live: Vec<LiveRatio>,
    pending_navigation: Option<SectionId>,
    blur_check: Option<BlurCheck>,
    blur_grace: Duration,
}

impl NavigationController {
    #[must_use]
    pub fn new(registry: SectionRegistry, blur_grace: Duration) -> Self {
        let live = vec![
            LiveRatio {
                ratio: 0.0,
                in_view: false,
            };
            registry.len()
        ];
        Self {
            state: NavigationState::new(registry.first()),
            registry,
            live,
            pending_navigation: None,
            blur_check: None,
            blur_grace,
        }
    }

    #[must_use]
    pub fn state(&self) -> NavigationState {
        self.state
    }

    #[must_use]
    pub fn active_section(&self) -> SectionId {
        self.state.active_section
    }

    #[must_use]
    pub fn is_focus_locked(&self) -> bool {
        self.state.focus_locked
    }

    #[must_use]
    pub fn scrolled_past_threshold(&self) -> bool {
        self.state.scrolled_past_threshold
    }

    /// Target of a programmatic scroll that has not settled yet.
    #[must_use]
    pub fn pending_navigation(&self) -> Option<SectionId> {
        self.pending_navigation
    }

    #[must_use]
    pub fn has_pending_blur_check(&self) -> bool {
        self.blur_check.is_some()
    }

    pub fn set_scrolled(&mut self, scrolled: bool) {
        self.state.scrolled_past_threshold = scrolled;
    }

    /// Smooth-scroll so the section's top edge meets the viewport's top edge.
    ///
    /// Unknown or not-yet-rendered sections are a silent no-op. Returns
    /// whether a scroll was requested.
    pub fn scroll_to_section(
        &mut self,
        id: SectionId,
        geometry: &PageGeometry,
        port: &mut impl ScrollPort,
    ) -> bool {
        if !self.registry.contains(id) {
            tracing::debug!(section = %id, "Ignoring navigation to unregistered section");
            return false;
        }
        let Some(span) = geometry.span(id) else {
            tracing::debug!(section = %id, "Ignoring navigation to section that is not rendered");
            return false;
        };

        tracing::debug!(section = %id, top = span.top, "Navigating to section");
        self.pending_navigation = Some(id);
        port.smooth_scroll_to(span.top);
        true
    }

    /// Apply one batch of visibility reports.
    pub fn apply_intersections(&mut self, entries: &[IntersectionEntry]) {
        for entry in entries {
            if let Some(index) = self.registry.index_of(entry.id) {
                self.live[index] = LiveRatio {
                    ratio: entry.ratio,
                    in_view: entry.in_view,
                };
            }
        }

        if self.state.focus_locked {
            if entries.iter().any(|e| e.in_view) {
                tracing::debug!("Focus locked, visibility change not applied");
            }
            return;
        }

        if let Some(target) = self.pending_navigation {
            if entries.iter().any(|e| e.id == target && e.in_view) {
                self.pending_navigation = None;
                self.set_active(target);
            }
            return;
        }

        let candidates = entries
            .iter()
            .filter(|e| e.in_view)
            .filter_map(|e| self.registry.index_of(e.id).map(|index| (index, e.ratio)));
        if let Some(index) = best_of(candidates) {
            self.set_active(self.registry.sections()[index].id);
        }
    }

    /// The programmatic scroll finished or was interrupted.
    pub fn navigation_settled(&mut self) {
        let Some(target) = self.pending_navigation.take() else {
            return;
        };
        if self.state.focus_locked {
            return;
        }
        let target_in_view = self
            .registry
            .index_of(target)
            .is_some_and(|index| self.live[index].in_view);
        if target_in_view {
            self.set_active(target);
        } else {
            self.resync_from_live();
        }
    }

    /// A text input inside `section` gained focus.
    ///
    /// Locks the active section to `section` immediately, before any
    /// visibility report arrives.
    pub fn on_input_focus(&mut self, section: SectionId) {
        self.blur_check = None;
        if !self.state.focus_locked {
            tracing::debug!(section = %section, "Focus lock engaged");
        }
        self.state.focus_locked = true;
        if self.registry.contains(section) {
            self.set_active(section);
        }
    }

    /// An input inside `container` lost focus.
    ///
    /// The lock is re-checked after the grace delay, so moving between
    /// fields of the same form never drops it.
    pub fn on_input_blur(&mut self, container: ContainerId) {
        if !self.state.focus_locked {
            return;
        }
        self.blur_check = Some(BlurCheck {
            container,
            remaining: self.blur_grace,
        });
    }

    /// Run due grace checks against the live focus state.
    pub fn advance(&mut self, delta: Duration, focus: &impl FocusProbe) {
        let Some(check) = &mut self.blur_check else {
            return;
        };
        if delta < check.remaining {
            check.remaining -= delta;
            return;
        }

        let container = check.container;
        self.blur_check = None;
        if focus.focused_container() == Some(container) {
            return;
        }

        tracing::debug!(container = %container, "Focus left container, releasing focus lock");
        self.state.focus_locked = false;
        self.resync_from_live();
    }

    /// Drop pending work. Used on teardown.
    pub fn reset_pending(&mut self) {
        self.blur_check = None;
        self.pending_navigation = None;
    }

    fn resync_from_live(&mut self) {
        let candidates = self
            .live
            .iter()
            .enumerate()
            .filter(|(_, live)| live.in_view)
            .map(|(index, live)| (index, live.ratio));
        if let Some(index) = best_of(candidates) {
            self.set_active(self.registry.sections()[index].id);
        }
    }

    fn set_active(&mut self, id: SectionId) {
        if self.state.active_section == id {
            return;
        }
        tracing::debug!(from = %self.state.active_section, to = %id, "Active section changed");
        self.state.active_section = id;
    }
}

/// Highest ratio wins; equal ratios go to the earlier registry index.
fn best_of(candidates: impl Iterator<Item = (usize, f32)>) -> Option<usize> {
    candidates
        .fold(None, |best: Option<(usize, f32)>, (index, ratio)| match best {
            Some((best_index, best_ratio))
                if best_ratio.total_cmp(&ratio).then(index.cmp(&best_index)).is_gt() =>
            {
                best
            }
            _ => Some((index, ratio)),
        })
        .map(|(index, _)| index)
}
