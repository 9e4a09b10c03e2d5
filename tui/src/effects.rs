//! Section reveal effects applied at render time.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use orbit_types::SectionId;
use orbit_types::ui::RevealTracker;

/// Widest slide-in, in columns.
pub const REVEAL_SHIFT: u16 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    /// Not seen yet: drawn dimmed.
    Hidden,
    /// Sliding in from the right.
    Sliding { shift: u16 },
    Shown,
}

/// Reveal state of the row owned by `section`. Rows outside any section
/// (the footer) are always shown.
#[must_use]
pub fn reveal_state(reveals: &RevealTracker, section: Option<SectionId>) -> RevealState {
    let Some(section) = section else {
        return RevealState::Shown;
    };
    if let Some(effect) = reveals.effect(section) {
        RevealState::Sliding {
            shift: effect.offset(REVEAL_SHIFT),
        }
    } else if reveals.is_revealed(section) {
        RevealState::Shown
    } else {
        RevealState::Hidden
    }
}

#[must_use]
pub fn apply_reveal(line: &Line<'static>, state: RevealState) -> Line<'static> {
    match state {
        RevealState::Shown | RevealState::Sliding { shift: 0 } => line.clone(),
        RevealState::Sliding { shift } => {
            let mut spans = Vec::with_capacity(line.spans.len() + 1);
            spans.push(Span::raw(" ".repeat(usize::from(shift))));
            spans.extend(line.spans.iter().cloned());
            Line::from(spans).style(line.style)
        }
        RevealState::Hidden => line
            .clone()
            .patch_style(Style::default().add_modifier(Modifier::DIM)),
    }
}

#[cfg(test)]
mod tests {
    use super::{REVEAL_SHIFT, RevealState, apply_reveal, reveal_state};
    use orbit_types::SectionId;
    use orbit_types::ui::RevealTracker;
    use ratatui::style::Modifier;
    use ratatui::text::Line;
    use std::time::Duration;

    #[test]
    fn unseen_sections_are_hidden_and_footer_is_shown() {
        let reveals = RevealTracker::new(Duration::from_millis(600));
        assert_eq!(
            reveal_state(&reveals, Some(SectionId::ABOUT)),
            RevealState::Hidden
        );
        assert_eq!(reveal_state(&reveals, None), RevealState::Shown);
    }

    #[test]
    fn newly_visible_section_slides_then_settles() {
        let mut reveals = RevealTracker::new(Duration::from_millis(600));
        reveals.mark_visible(SectionId::SKILLS);
        assert_eq!(
            reveal_state(&reveals, Some(SectionId::SKILLS)),
            RevealState::Sliding {
                shift: REVEAL_SHIFT
            }
        );
        reveals.advance(Duration::from_millis(600));
        assert_eq!(
            reveal_state(&reveals, Some(SectionId::SKILLS)),
            RevealState::Shown
        );
    }

    #[test]
    fn sliding_prefixes_padding() {
        let line = Line::from("hello");
        let shifted = apply_reveal(&line, RevealState::Sliding { shift: 3 });
        assert_eq!(shifted.width(), 8);
    }

    #[test]
    fn hidden_rows_are_dimmed() {
        let line = Line::from("hello");
        let hidden = apply_reveal(&line, RevealState::Hidden);
        assert!(hidden.style.add_modifier.contains(Modifier::DIM));
    }
}
