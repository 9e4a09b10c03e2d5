//! Page geometry produced by the renderer.
//!
//! Positions are in terminal rows measured from the top of the page.

use crate::SectionId;

/// Vertical extent of one rendered section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpan {
    pub id: SectionId,
    pub top: u16,
    pub height: u16,
}

impl SectionSpan {
    #[must_use]
    pub fn bottom(&self) -> u16 {
        self.top.saturating_add(self.height)
    }
}

/// Layout of the whole page for the current frame.
///
/// Sections that are not mounted yet simply have no span.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageGeometry {
    spans: Vec<SectionSpan>,
    content_height: u16,
}

impl PageGeometry {
    #[must_use]
    pub fn new(spans: Vec<SectionSpan>, content_height: u16) -> Self {
        let tallest = spans.iter().map(SectionSpan::bottom).max().unwrap_or(0);
        Self {
            spans,
            content_height: content_height.max(tallest),
        }
    }

    /// Stack sections top to bottom in the given order.
    #[must_use]
    pub fn stacked(heights: impl IntoIterator<Item = (SectionId, u16)>) -> Self {
        let mut top = 0u16;
        let mut spans = Vec::new();
        for (id, height) in heights {
            spans.push(SectionSpan { id, top, height });
            top = top.saturating_add(height);
        }
        Self::new(spans, top)
    }

    #[must_use]
    pub fn spans(&self) -> &[SectionSpan] {
        &self.spans
    }

    #[must_use]
    pub fn span(&self, id: SectionId) -> Option<&SectionSpan> {
        self.spans.iter().find(|s| s.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: SectionId) -> bool {
        self.span(id).is_some()
    }

    #[must_use]
    pub fn content_height(&self) -> u16 {
        self.content_height
    }

    /// Largest valid scroll offset for a viewport of `viewport_height` rows.
    #[must_use]
    pub fn max_offset(&self, viewport_height: u16) -> u16 {
        self.content_height.saturating_sub(viewport_height)
    }

    /// Section whose span covers `row`, if any.
    #[must_use]
    pub fn section_at(&self, row: u16) -> Option<SectionId> {
        self.spans
            .iter()
            .find(|s| row >= s.top && row < s.bottom())
            .map(|s| s.id)
    }
}
