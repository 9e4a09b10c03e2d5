//! The shell context object.
//!
//! One [`Shell`] exists per page. It is created at mount, owns every timer
//! and observer, and releases them on teardown or drop. Presentation code
//! reads state through its getters and requests changes through its write
//! surface; nothing else mutates navigation or boot state.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::KeyEvent;

use orbit_types::ui::RevealTracker;
use orbit_types::{
    BootState, NavigationState, PageGeometry, SectionId, SectionRegistry, ShellSettings,
};

use crate::boot::BootSequence;
use crate::focus::{FocusProbe, FocusRegistry, FocusedInput};
use crate::intersection::ViewportTracker;
use crate::navigation::NavigationController;
use crate::scroll_monitor::ScrollMonitor;
use crate::scroller::Scroller;
use crate::shortcuts::{ShortcutBinding, ShortcutDispatcher};

const REVEAL_DURATION: Duration = Duration::from_millis(600);

#[derive(Debug)]
pub struct Shell {
    registry: SectionRegistry,
    settings: ShellSettings,
    boot: BootSequence,
    /// Set by the boot completion callback.
    handoff: Rc<Cell<bool>>,
    interactive: bool,
    scroller: Scroller,
    monitor: ScrollMonitor,
    tracker: ViewportTracker,
    navigation: NavigationController,
    shortcuts: ShortcutDispatcher,
    focus: FocusRegistry,
    reveals: RevealTracker,
    geometry: PageGeometry,
    viewport_height: u16,
    reduced: bool,
    torn_down: bool,
}

impl Shell {
    /// Create the shell and start the boot sequence (unless configured to
    /// skip it).
    #[must_use]
    pub fn mount(registry: SectionRegistry, settings: ShellSettings) -> Self {
        let reduced_motion = settings.ui.reduced_motion;
        let mut shell = Self {
            boot: BootSequence::new(settings.boot),
            handoff: Rc::new(Cell::new(false)),
            interactive: settings.skip_boot,
            scroller: Scroller::new(smooth_duration(&settings, reduced_motion)),
            monitor: ScrollMonitor::new(settings.scroll_threshold_rows),
            tracker: ViewportTracker::new(registry.clone(), settings.band),
            navigation: NavigationController::new(registry.clone(), settings.blur_grace),
            shortcuts: ShortcutDispatcher::new(registry.clone()),
            focus: FocusRegistry::new(),
            reveals: RevealTracker::new(reveal_duration(reduced_motion)),
            geometry: PageGeometry::default(),
            viewport_height: 0,
            reduced: reduced_motion,
            torn_down: false,
            registry,
            settings,
        };

        if shell.interactive {
            tracing::info!("Boot sequence skipped");
        } else {
            let handoff = Rc::clone(&shell.handoff);
            shell.boot.start(move || handoff.set(true));
        }
        shell
    }

    // ------------------------------------------------------------------
    // Frame loop
    // ------------------------------------------------------------------

    /// Advance everything by one frame.
    ///
    /// Order: boot timer, scroll animation, scroll monitor, viewport
    /// tracker, settling of programmatic scrolls, blur grace checks.
    pub fn frame(&mut self, delta: Duration) {
        if self.torn_down {
            return;
        }

        self.boot.advance(delta);
        if !self.interactive && self.handoff.get() {
            tracing::info!("Shell interactive");
            self.interactive = true;
        }
        if !self.interactive {
            return;
        }

        let step = self.scroller.advance(delta);
        if step.moved {
            self.monitor.notify(self.scroller.offset());
        }
        if let Some(scrolled) = self.monitor.on_frame() {
            self.navigation.set_scrolled(scrolled);
        }

        let entries =
            self.tracker
                .observe(&self.geometry, self.scroller.offset(), self.viewport_height);
        self.navigation.apply_intersections(&entries);
        for entry in entries.iter().filter(|e| e.is_intersecting) {
            self.reveals.mark_visible(entry.id);
        }
        self.reveals.advance(delta);

        if step.settled {
            self.navigation.navigation_settled();
        }

        self.navigation.advance(delta, &self.focus);
    }

    /// Latest page layout from the renderer.
    pub fn set_geometry(&mut self, geometry: PageGeometry, viewport_height: u16) {
        self.scroller
            .set_max_offset(geometry.max_offset(viewport_height));
        self.geometry = geometry;
        self.viewport_height = viewport_height;
    }

    /// Reduced feature set flag from the device-capability check. Only
    /// affects decoration volume, never navigation logic.
    pub fn set_reduced(&mut self, reduced: bool) {
        self.reduced = reduced || self.settings.ui.reduced_motion;
    }

    // ------------------------------------------------------------------
    // Write surface
    // ------------------------------------------------------------------

    /// Smooth-scroll to a section. Silent no-op for unknown or unrendered
    /// sections.
    pub fn scroll_to_section(&mut self, id: SectionId) -> bool {
        if self.torn_down {
            return false;
        }
        self.navigation
            .scroll_to_section(id, &self.geometry, &mut self.scroller)
    }

    /// Route a key through the shortcut dispatcher. Returns true if it
    /// mapped to a section.
    pub fn handle_shortcut(&mut self, key: &KeyEvent) -> bool {
        let typing = self.focus.is_typing();
        match self.shortcuts.dispatch(key, typing) {
            Some(id) => {
                self.scroll_to_section(id);
                true
            }
            None => false,
        }
    }

    pub fn focus_input(&mut self, input: FocusedInput) {
        self.focus.focus(input);
        self.navigation.on_input_focus(input.section);
    }

    pub fn blur_input(&mut self) {
        if let Some(previous) = self.focus.blur() {
            self.navigation.on_input_blur(previous.container);
        }
    }

    /// User scroll by `rows` (negative is up).
    pub fn scroll_by(&mut self, rows: i32) {
        if self.scroller.scroll_by(rows) {
            self.monitor.notify(self.scroller.offset());
        }
    }

    pub fn page_down(&mut self) {
        self.scroll_by(i32::from(self.page_rows()));
    }

    pub fn page_up(&mut self) {
        self.scroll_by(-i32::from(self.page_rows()));
    }

    pub fn scroll_to_top(&mut self) {
        if self.scroller.jump_to(0) {
            self.monitor.notify(self.scroller.offset());
        }
    }

    pub fn scroll_to_bottom(&mut self) {
        if self.scroller.jump_to(self.scroller.max_offset()) {
            self.monitor.notify(self.scroller.offset());
        }
    }

    /// Release timers and observers. Idempotent.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.boot.cancel();
        self.tracker.disconnect();
        self.navigation.reset_pending();
        self.torn_down = true;
        tracing::debug!("Shell torn down");
    }

    // ------------------------------------------------------------------
    // Render boundary
    // ------------------------------------------------------------------

    #[must_use]
    pub fn active_section(&self) -> SectionId {
        self.navigation.active_section()
    }

    #[must_use]
    pub fn navigation(&self) -> NavigationState {
        self.navigation.state()
    }

    #[must_use]
    pub fn scrolled_past_threshold(&self) -> bool {
        self.navigation.scrolled_past_threshold()
    }

    #[must_use]
    pub fn boot_state(&self) -> BootState {
        self.boot.state()
    }

    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    #[must_use]
    pub fn scroll_offset(&self) -> u16 {
        self.scroller.offset()
    }

    #[must_use]
    pub fn viewport_height(&self) -> u16 {
        self.viewport_height
    }

    #[must_use]
    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    #[must_use]
    pub fn registry(&self) -> &SectionRegistry {
        &self.registry
    }

    #[must_use]
    pub fn settings(&self) -> &ShellSettings {
        &self.settings
    }

    #[must_use]
    pub fn is_reduced(&self) -> bool {
        self.reduced
    }

    #[must_use]
    pub fn focused_input(&self) -> Option<FocusedInput> {
        self.focus.focused()
    }

    #[must_use]
    pub fn is_typing(&self) -> bool {
        self.focus.is_typing()
    }

    #[must_use]
    pub fn pending_navigation(&self) -> Option<SectionId> {
        self.navigation.pending_navigation()
    }

    #[must_use]
    pub fn shortcut_bindings(&self) -> Vec<ShortcutBinding> {
        self.shortcuts.bindings()
    }

    #[must_use]
    pub fn reveals(&self) -> &RevealTracker {
        &self.reveals
    }

    #[must_use]
    pub fn scroll_evaluations(&self) -> u64 {
        self.monitor.evaluations()
    }

    fn page_rows(&self) -> u16 {
        self.viewport_height.saturating_sub(2).max(1)
    }
}

impl Drop for Shell {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn smooth_duration(settings: &ShellSettings, reduced_motion: bool) -> Duration {
    if reduced_motion {
        Duration::ZERO
    } else {
        settings.smooth_scroll
    }
}

fn reveal_duration(reduced_motion: bool) -> Duration {
    if reduced_motion {
        Duration::ZERO
    } else {
        REVEAL_DURATION
    }
}
