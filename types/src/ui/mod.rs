//! UI state types for the TUI layer.
//!
//! Pure data types with no IO, no async, no ratatui dependency.
//! Used by both the core (state ownership) and tui (rendering/input).

mod animation;
mod options;
mod reveal;

pub use animation::{AnimPhase, EffectTimer, ease_out_cubic};
pub use options::UiOptions;
pub use reveal::{RevealEffect, RevealTracker};
