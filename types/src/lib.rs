//! Core domain types for Orbit.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::missing_panics_doc)] // Panics are documented in assertions

mod boot;
mod geometry;
mod navigation;
pub mod settings;
pub mod ui;

pub use boot::{BOOT_LOADING_THRESHOLD, BOOT_PROGRESS_MAX, BOOT_READY_THRESHOLD, BootPhase, BootState};
pub use geometry::{PageGeometry, SectionSpan};
pub use navigation::NavigationState;
pub use settings::{BandConfig, BootTiming, ShellSettings};

use std::fmt;
use thiserror::Error;

// ============================================================================
// Sections
// ============================================================================

/// Stable identifier of a navigable page section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionId(&'static str);

impl SectionId {
    pub const HOME: Self = Self("home");
    pub const ABOUT: Self = Self("about");
    pub const SKILLS: Self = Self("skills");
    pub const PROJECTS: Self = Self("projects");
    pub const CONTACT: Self = Self("contact");

    #[must_use]
    pub const fn new(id: &'static str) -> Self {
        assert!(!id.is_empty(), "SectionId must not be empty");
        Self(id)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }

    /// Navbar label: the id with its first letter capitalized.
    #[must_use]
    pub fn label(self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A registered section: identity plus its position in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub id: SectionId,
    pub order: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown section: {0}")]
pub struct UnknownSection(pub String);

/// Fixed, ordered list of navigable sections.
///
/// Created once at startup and never mutated. Registry order is the
/// tie-break order everywhere a choice between sections has to be made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRegistry {
    sections: Vec<Section>,
}

impl SectionRegistry {
    /// Build a registry from ids in display order. Duplicate ids keep their
    /// first position.
    #[must_use]
    pub fn new(ids: impl IntoIterator<Item = SectionId>) -> Self {
        let mut sections: Vec<Section> = Vec::new();
        for id in ids {
            if sections.iter().any(|s| s.id == id) {
                continue;
            }
            let order = sections.len();
            sections.push(Section { id, order });
        }
        assert!(!sections.is_empty(), "SectionRegistry needs at least one section");
        Self { sections }
    }

    /// home, about, skills, projects, contact.
    #[must_use]
    pub fn standard() -> Self {
        Self::new([
            SectionId::HOME,
            SectionId::ABOUT,
            SectionId::SKILLS,
            SectionId::PROJECTS,
            SectionId::CONTACT,
        ])
    }

    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn ids(&self) -> impl Iterator<Item = SectionId> + '_ {
        self.sections.iter().map(|s| s.id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<SectionId> {
        self.sections.get(index).map(|s| s.id)
    }

    #[must_use]
    pub fn first(&self) -> SectionId {
        self.sections[0].id
    }

    /// Tie-break rank of `id`, which is also its index in [`Self::sections`].
    #[must_use]
    pub fn index_of(&self, id: SectionId) -> Option<usize> {
        self.sections.iter().find(|s| s.id == id).map(|s| s.order)
    }

    #[must_use]
    pub fn contains(&self, id: SectionId) -> bool {
        self.index_of(id).is_some()
    }

    /// Resolve a textual id (case-insensitive, surrounding whitespace ignored).
    pub fn parse(&self, raw: &str) -> Result<SectionId, UnknownSection> {
        let wanted = raw.trim();
        self.ids()
            .find(|id| id.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownSection(wanted.to_string()))
    }
}

impl Default for SectionRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::{SectionId, SectionRegistry, UnknownSection};

    #[test]
    fn standard_registry_order() {
        let registry = SectionRegistry::standard();
        let ids: Vec<&str> = registry.ids().map(SectionId::as_str).collect();
        assert_eq!(ids, ["home", "about", "skills", "projects", "contact"]);
        assert_eq!(registry.sections()[3].order, 3);
    }

    #[test]
    fn duplicates_keep_first_position() {
        let registry =
            SectionRegistry::new([SectionId::HOME, SectionId::ABOUT, SectionId::HOME]);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.index_of(SectionId::ABOUT), Some(1));
    }

    #[test]
    fn index_of_reports_registered_order() {
        let registry = SectionRegistry::new([
            SectionId::CONTACT,
            SectionId::HOME,
            SectionId::CONTACT,
            SectionId::SKILLS,
        ]);
        for section in registry.sections() {
            assert_eq!(registry.index_of(section.id), Some(section.order));
            assert_eq!(registry.get(section.order), Some(section.id));
        }
        assert_eq!(registry.index_of(SectionId::CONTACT), Some(0));
        assert_eq!(registry.index_of(SectionId::ABOUT), None);
    }

    #[test]
    fn parse_is_case_insensitive() {
        let registry = SectionRegistry::standard();
        assert_eq!(registry.parse(" Skills "), Ok(SectionId::SKILLS));
        assert_eq!(
            registry.parse("blog"),
            Err(UnknownSection("blog".to_string()))
        );
    }

    #[test]
    fn label_capitalizes() {
        assert_eq!(SectionId::PROJECTS.label(), "Projects");
    }

    #[test]
    fn unknown_section_is_not_contained() {
        let registry = SectionRegistry::standard();
        assert!(!registry.contains(SectionId::new("footer")));
        assert_eq!(registry.get(9), None);
    }
}
