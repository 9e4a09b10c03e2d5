//! Navigation synchronization core for Orbit.
//!
//! Decides which section is active while the page scrolls, drives
//! programmatic smooth scrolling, runs the boot sequence, and reconciles
//! viewport visibility, navigation requests, shortcuts and input focus into
//! one stable notion of the current section.
//!
//! Everything here is single-threaded and driven by frame deltas: no
//! wall-clock reads, no background tasks. The [`Shell`] is the owned context
//! object that holds every piece for the lifetime of the page.

mod boot;
mod focus;
mod intersection;
mod navigation;
mod scroll_monitor;
mod scroller;
mod shell;
mod shortcuts;

pub use boot::BootSequence;
pub use focus::{CONTACT_FORM, ContainerId, FocusProbe, FocusRegistry, FocusedInput};
pub use intersection::{IntersectionEntry, ViewportTracker};
pub use navigation::{NavigationController, ScrollPort};
pub use scroll_monitor::ScrollMonitor;
pub use scroller::{ScrollStep, Scroller};
pub use shell::Shell;
pub use shortcuts::{ShortcutBinding, ShortcutDispatcher};
