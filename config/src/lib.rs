//! Configuration loading for Orbit.
//!
//! The raw TOML structs here are all-optional; [`OrbitConfig::resolve`]
//! turns them into a clamped [`ShellSettings`] at the parse boundary.

use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;

use orbit_types::settings::{
    DEFAULT_ACTIVATION_RATIO, DEFAULT_BAND_MARGIN_PERCENT, DEFAULT_SCROLL_THRESHOLD_ROWS,
};
use orbit_types::ui::UiOptions;
use orbit_types::{BandConfig, BootTiming, ShellSettings};

const MAX_BAND_MARGIN_PERCENT: u8 = 45;
const MIN_ACTIVATION_RATIO: f32 = 0.05;
const MAX_ACTIVATION_RATIO: f32 = 0.95;

pub const REDUCED_MOTION_ENV: &str = "ORBIT_REDUCED_MOTION";

#[derive(Debug, Default, Deserialize)]
pub struct OrbitConfig {
    pub app: Option<AppConfig>,
    pub boot: Option<BootConfig>,
    pub navigation: Option<NavigationConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Use ASCII-only glyphs for the navbar, progress bar and starfield.
    #[serde(default)]
    pub ascii_only: bool,
    /// Enable a high-contrast color palette.
    #[serde(default)]
    pub high_contrast: bool,
    /// Disable smooth scrolling, reveal slides and the starfield.
    #[serde(default)]
    pub reduced_motion: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct BootConfig {
    pub tick_ms: Option<u64>,
    pub exit_delay_ms: Option<u64>,
    /// Skip the splash screen entirely.
    #[serde(default)]
    pub skip: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct NavigationConfig {
    pub scroll_threshold_rows: Option<u16>,
    pub blur_grace_ms: Option<u64>,
    pub smooth_scroll_ms: Option<u64>,
    pub band_margin_percent: Option<u8>,
    pub activation_ratio: Option<f32>,
}

impl OrbitConfig {
    /// Load `~/.orbit/config.toml`. A missing file is `Ok(None)`.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        Self::parse(path, &content).map(Some)
    }

    fn parse(path: &Path, content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|err| {
            tracing::warn!("Failed to parse config at {:?}: {}", path, err);
            ConfigError::Parse {
                path: path.to_path_buf(),
                source: err,
            }
        })
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    /// Resolve into settings, filling defaults and clamping out-of-range values.
    #[must_use]
    pub fn resolve(&self) -> ShellSettings {
        let defaults = ShellSettings::default();

        let ui = self.app.as_ref().map_or_else(UiOptions::default, |app| UiOptions {
            ascii_only: app.ascii_only,
            high_contrast: app.high_contrast,
            reduced_motion: app.reduced_motion,
        });

        let boot = self.boot.as_ref();
        let boot_timing = BootTiming {
            tick: boot
                .and_then(|b| b.tick_ms)
                .map_or(defaults.boot.tick, |ms| Duration::from_millis(ms.max(1))),
            exit_delay: boot
                .and_then(|b| b.exit_delay_ms)
                .map_or(defaults.boot.exit_delay, Duration::from_millis),
        };

        let nav = self.navigation.as_ref();
        let margin_percent = nav
            .and_then(|n| n.band_margin_percent)
            .unwrap_or(DEFAULT_BAND_MARGIN_PERCENT)
            .min(MAX_BAND_MARGIN_PERCENT);
        let activation_ratio = nav
            .and_then(|n| n.activation_ratio)
            .filter(|r| r.is_finite())
            .unwrap_or(DEFAULT_ACTIVATION_RATIO)
            .clamp(MIN_ACTIVATION_RATIO, MAX_ACTIVATION_RATIO);

        ShellSettings {
            boot: boot_timing,
            skip_boot: boot.is_some_and(|b| b.skip),
            scroll_threshold_rows: nav
                .and_then(|n| n.scroll_threshold_rows)
                .unwrap_or(DEFAULT_SCROLL_THRESHOLD_ROWS),
            blur_grace: nav
                .and_then(|n| n.blur_grace_ms)
                .map_or(defaults.blur_grace, Duration::from_millis),
            smooth_scroll: nav
                .and_then(|n| n.smooth_scroll_ms)
                .map_or(defaults.smooth_scroll, Duration::from_millis),
            band: BandConfig {
                margin_percent,
                activation_ratio,
            },
            ui,
        }
    }
}

/// Load and resolve settings, falling back to defaults on any config error.
///
/// `ORBIT_REDUCED_MOTION=1` forces reduced motion regardless of the file.
#[must_use]
pub fn load_settings() -> ShellSettings {
    let config = OrbitConfig::load().ok().flatten().unwrap_or_default();
    let mut settings = config.resolve();
    if reduced_motion_from_env() {
        settings.ui.reduced_motion = true;
    }
    settings
}

fn reduced_motion_from_env() -> bool {
    env::var(REDUCED_MOTION_ENV)
        .map(|value| matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".orbit").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_is_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        assert!(OrbitConfig::load_from(&path).expect("load").is_none());
    }

    #[test]
    fn empty_config_resolves_to_defaults() {
        let settings = OrbitConfig::default().resolve();
        assert_eq!(settings, ShellSettings::default());
    }

    #[test]
    fn parses_all_sections() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        let mut file = fs::File::create(&path).expect("create");
        writeln!(
            file,
            r#"
[app]
reduced_motion = true
ascii_only = true

[boot]
tick_ms = 10
exit_delay_ms = 300
skip = true

[navigation]
scroll_threshold_rows = 4
blur_grace_ms = 250
smooth_scroll_ms = 0
band_margin_percent = 20
activation_ratio = 0.6
"#
        )
        .expect("write");

        let config = OrbitConfig::load_from(&path).expect("load").expect("present");
        let settings = config.resolve();
        assert!(settings.ui.reduced_motion);
        assert!(settings.ui.ascii_only);
        assert!(!settings.ui.high_contrast);
        assert_eq!(settings.boot.tick, Duration::from_millis(10));
        assert_eq!(settings.boot.exit_delay, Duration::from_millis(300));
        assert!(settings.skip_boot);
        assert_eq!(settings.scroll_threshold_rows, 4);
        assert_eq!(settings.blur_grace, Duration::from_millis(250));
        assert_eq!(settings.smooth_scroll, Duration::ZERO);
        assert_eq!(settings.band.margin_percent, 20);
        assert!((settings.band.activation_ratio - 0.6).abs() < f32::EPSILON);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config: OrbitConfig = toml::from_str(
            r#"
[boot]
tick_ms = 0

[navigation]
band_margin_percent = 90
activation_ratio = 1.5
"#,
        )
        .expect("parse");
        let settings = config.resolve();
        assert_eq!(settings.boot.tick, Duration::from_millis(1));
        assert_eq!(settings.band.margin_percent, MAX_BAND_MARGIN_PERCENT);
        assert!((settings.band.activation_ratio - MAX_ACTIVATION_RATIO).abs() < f32::EPSILON);
    }

    #[test]
    fn invalid_toml_reports_parse_error_with_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "[navigation\nblur_grace_ms = ").expect("write");

        let err = OrbitConfig::load_from(&path).expect_err("should fail");
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert_eq!(err.path(), path.as_path());
    }
}
