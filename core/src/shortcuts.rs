//! Modifier+digit section shortcuts.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use orbit_types::{SectionId, SectionRegistry};

/// Ctrl and Meta from the browser world; terminals deliver the latter as
/// Alt or Super depending on the emulator.
const SHORTCUT_MODIFIERS: KeyModifiers = KeyModifiers::CONTROL
    .union(KeyModifiers::ALT)
    .union(KeyModifiers::SUPER)
    .union(KeyModifiers::META);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortcutBinding {
    pub digit: u32,
    pub section: SectionId,
}

/// Maps modifier+digit `1..=N` to the N registered sections, in order.
#[derive(Debug, Clone)]
pub struct ShortcutDispatcher {
    registry: SectionRegistry,
}

impl ShortcutDispatcher {
    #[must_use]
    pub fn new(registry: SectionRegistry) -> Self {
        Self { registry }
    }

    /// Resolve a key event to a navigation target.
    ///
    /// Returns `None` for anything that is not a bound shortcut, and for
    /// every key while `typing` is true.
    #[must_use]
    pub fn dispatch(&self, key: &KeyEvent, typing: bool) -> Option<SectionId> {
        if key.kind == KeyEventKind::Release || !key.modifiers.intersects(SHORTCUT_MODIFIERS) {
            return None;
        }
        let KeyCode::Char(c) = key.code else {
            return None;
        };
        let digit = c.to_digit(10).filter(|d| *d > 0)?;
        let section = self.registry.get(usize::try_from(digit - 1).ok()?)?;

        if typing {
            tracing::debug!(digit, section = %section, "Shortcut suppressed while typing");
            return None;
        }
        Some(section)
    }

    #[must_use]
    pub fn bindings(&self) -> Vec<ShortcutBinding> {
        self.registry
            .ids()
            .take(9)
            .zip(1..)
            .map(|(section, digit)| ShortcutBinding { digit, section })
            .collect()
    }
}
