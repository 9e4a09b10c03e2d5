//! Navigation state owned by the navigation controller.

use crate::SectionId;

/// The single mutable navigation record.
///
/// `active_section` always names a registered section. While
/// `focus_locked` is set, viewport visibility does not move it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationState {
    pub active_section: SectionId,
    pub scrolled_past_threshold: bool,
    pub focus_locked: bool,
}

impl NavigationState {
    #[must_use]
    pub fn new(initial: SectionId) -> Self {
        Self {
            active_section: initial,
            scrolled_past_threshold: false,
            focus_locked: false,
        }
    }
}
