//! Viewport visibility tracking for registered sections.
//!
//! Visibility is measured inside a central band of the viewport: a margin is
//! removed from the top and the bottom, so a section has to occupy a roughly
//! central part of the screen before it counts, not just touch an edge.

use orbit_types::{BandConfig, PageGeometry, SectionId, SectionRegistry, SectionSpan};

const RATIO_EPSILON: f32 = 1e-4;

/// One visibility report for one section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub id: SectionId,
    /// Visible fraction inside the band, `0.0..=1.0`.
    pub ratio: f32,
    /// Any part of the section is inside the band.
    pub is_intersecting: bool,
    /// Ratio is above the activation threshold.
    pub in_view: bool,
}

/// Rows `[top, bottom)` of the page covered by the band.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Band {
    top: f32,
    bottom: f32,
}

impl Band {
    fn new(scroll_offset: u16, viewport_height: u16, margin_percent: u8) -> Self {
        let height = f32::from(viewport_height);
        let margin = height * f32::from(margin_percent) / 100.0;
        let top = f32::from(scroll_offset) + margin;
        let bottom = f32::from(scroll_offset) + height - margin;
        Self {
            top,
            bottom: bottom.max(top),
        }
    }

    fn height(self) -> f32 {
        self.bottom - self.top
    }

    /// Fraction of `span` inside the band.
    ///
    /// The basis is the smaller of the section height and the band height,
    /// so a section taller than the band can still reach 1.0.
    fn ratio(self, span: &SectionSpan) -> f32 {
        let basis = f32::from(span.height).min(self.height());
        if basis <= 0.0 {
            return 0.0;
        }
        let top = f32::from(span.top).max(self.top);
        let bottom = f32::from(span.bottom()).min(self.bottom);
        ((bottom - top).max(0.0) / basis).clamp(0.0, 1.0)
    }
}

/// Observes all registered sections and reports ratio changes.
#[derive(Debug, Clone)]
pub struct ViewportTracker {
    registry: SectionRegistry,
    band: BandConfig,
    /// Latest ratio per section, indexed by registry order.
    live: Vec<f32>,
    /// Sections present in the last observation.
    present: Vec<bool>,
    connected: bool,
}

impl ViewportTracker {
    #[must_use]
    pub fn new(registry: SectionRegistry, band: BandConfig) -> Self {
        let len = registry.len();
        Self {
            registry,
            band,
            live: vec![0.0; len],
            present: vec![false; len],
            connected: false,
        }
    }

    /// Measure every registered section and return entries for those whose
    /// ratio changed, in registry order.
    ///
    /// A newly present section is always reported once; a section that
    /// disappears from the geometry reports ratio 0.
    pub fn observe(
        &mut self,
        geometry: &PageGeometry,
        scroll_offset: u16,
        viewport_height: u16,
    ) -> Vec<IntersectionEntry> {
        let band = Band::new(scroll_offset, viewport_height, self.band.margin_percent);
        let mut entries = Vec::new();

        for (index, id) in self.registry.ids().enumerate() {
            let span = geometry.span(id);
            let ratio = span.map_or(0.0, |span| band.ratio(span));
            let was_present = self.present[index];
            let is_present = span.is_some();

            let changed = (ratio - self.live[index]).abs() > RATIO_EPSILON;
            let first_sight = is_present && (!was_present || !self.connected);
            if changed || first_sight {
                entries.push(self.entry(id, ratio));
            }

            self.live[index] = ratio;
            self.present[index] = is_present;
        }

        self.connected = true;
        entries
    }

    fn entry(&self, id: SectionId, ratio: f32) -> IntersectionEntry {
        IntersectionEntry {
            id,
            ratio,
            is_intersecting: ratio > 0.0,
            in_view: ratio > self.band.activation_ratio,
        }
    }

    #[must_use]
    pub fn ratio_of(&self, id: SectionId) -> f32 {
        self.registry
            .index_of(id)
            .map_or(0.0, |index| self.live[index])
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Stop observing. The next `observe` starts from scratch.
    pub fn disconnect(&mut self) {
        self.live.iter_mut().for_each(|ratio| *ratio = 0.0);
        self.present.iter_mut().for_each(|present| *present = false);
        self.connected = false;
    }
}
