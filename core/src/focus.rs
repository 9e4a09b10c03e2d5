//! Input focus tracking.

use std::fmt;

use orbit_types::SectionId;

/// Identity of a region that groups input fields (a form).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerId(&'static str);

impl ContainerId {
    #[must_use]
    pub const fn new(id: &'static str) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// The contact section's form.
pub const CONTACT_FORM: ContainerId = ContainerId::new("contact-form");

/// A focused text input: which field, in which container, in which section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusedInput {
    pub section: SectionId,
    pub container: ContainerId,
    pub field: usize,
}

/// Live view of where text-input focus currently is.
pub trait FocusProbe {
    fn focused_container(&self) -> Option<ContainerId>;

    /// True while a text-input-class element holds focus.
    fn is_typing(&self) -> bool {
        self.focused_container().is_some()
    }
}

/// Records the currently focused input, if any.
#[derive(Debug, Clone, Default)]
pub struct FocusRegistry {
    focused: Option<FocusedInput>,
}

impl FocusRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus(&mut self, input: FocusedInput) {
        self.focused = Some(input);
    }

    /// Drop focus, returning the input that had it.
    pub fn blur(&mut self) -> Option<FocusedInput> {
        self.focused.take()
    }

    #[must_use]
    pub fn focused(&self) -> Option<FocusedInput> {
        self.focused
    }
}

impl FocusProbe for FocusRegistry {
    fn focused_container(&self) -> Option<ContainerId> {
        self.focused.map(|input| input.container)
    }
}
