//! Resolved shell settings shared across crates.
//!
//! Raw TOML deserialization structs (with `Option` fields) stay private in
//! `orbit-config`. The config loader resolves and clamps them into these
//! types at the parse boundary, so every value here is usable as-is.

use std::time::Duration;

use crate::ui::UiOptions;

pub const DEFAULT_BOOT_TICK: Duration = Duration::from_millis(45);
pub const DEFAULT_BOOT_EXIT_DELAY: Duration = Duration::from_millis(1200);
pub const DEFAULT_SCROLL_THRESHOLD_ROWS: u16 = 2;
pub const DEFAULT_BLUR_GRACE: Duration = Duration::from_millis(100);
pub const DEFAULT_SMOOTH_SCROLL: Duration = Duration::from_millis(450);
pub const DEFAULT_BAND_MARGIN_PERCENT: u8 = 10;
pub const DEFAULT_ACTIVATION_RATIO: f32 = 0.5;

/// Timing of the boot sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootTiming {
    /// Interval between progress ticks.
    pub tick: Duration,
    /// Grace delay between reaching 100% and the handoff to the shell.
    pub exit_delay: Duration,
}

impl Default for BootTiming {
    fn default() -> Self {
        Self {
            tick: DEFAULT_BOOT_TICK,
            exit_delay: DEFAULT_BOOT_EXIT_DELAY,
        }
    }
}

/// Central viewport band used to decide whether a section is in view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandConfig {
    /// Percentage of the viewport height removed at the top and at the bottom.
    pub margin_percent: u8,
    /// A section is in view when its ratio is strictly greater than this.
    pub activation_ratio: f32,
}

impl Default for BandConfig {
    fn default() -> Self {
        Self {
            margin_percent: DEFAULT_BAND_MARGIN_PERCENT,
            activation_ratio: DEFAULT_ACTIVATION_RATIO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShellSettings {
    pub boot: BootTiming,
    /// Start directly in the interactive shell.
    pub skip_boot: bool,
    pub scroll_threshold_rows: u16,
    pub blur_grace: Duration,
    pub smooth_scroll: Duration,
    pub band: BandConfig,
    pub ui: UiOptions,
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            boot: BootTiming::default(),
            skip_boot: false,
            scroll_threshold_rows: DEFAULT_SCROLL_THRESHOLD_ROWS,
            blur_grace: DEFAULT_BLUR_GRACE,
            smooth_scroll: DEFAULT_SMOOTH_SCROLL,
            band: BandConfig::default(),
            ui: UiOptions::default(),
        }
    }
}
