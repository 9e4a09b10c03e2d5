//! Color theme and glyphs for the Orbit shell.
//!
//! Deep-space palette by default with an optional high-contrast override.

use ratatui::style::{Color, Modifier, Style};

use orbit_types::ui::UiOptions;

mod colors {
    use super::Color;

    // === Backgrounds ===
    pub const BG_DARK: Color = Color::Rgb(10, 10, 20);
    pub const BG_PANEL: Color = Color::Rgb(20, 18, 36);
    pub const BG_BORDER: Color = Color::Rgb(72, 62, 110);

    // === Foregrounds ===
    pub const TEXT_PRIMARY: Color = Color::Rgb(232, 230, 245);
    pub const TEXT_SECONDARY: Color = Color::Rgb(176, 172, 200);
    pub const TEXT_MUTED: Color = Color::Rgb(110, 106, 138);

    // === Brand ===
    pub const PURPLE: Color = Color::Rgb(168, 85, 247);
    pub const PURPLE_DIM: Color = Color::Rgb(110, 70, 160);
    pub const CYAN: Color = Color::Rgb(34, 211, 238);
    pub const BLUE: Color = Color::Rgb(96, 165, 250);

    // === Semantic ===
    pub const SUCCESS: Color = Color::Rgb(74, 222, 128);
    pub const ERROR: Color = Color::Rgb(248, 113, 113);
    pub const STAR: Color = Color::Rgb(200, 200, 230);
}

/// Resolved theme palette used by the UI.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg_dark: Color,
    pub bg_panel: Color,
    pub bg_border: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub primary: Color,
    pub primary_dim: Color,
    pub accent: Color,
    pub blue: Color,
    pub success: Color,
    pub error: Color,
    pub star: Color,
}

impl Palette {
    #[must_use]
    pub fn standard() -> Self {
        Self {
            bg_dark: colors::BG_DARK,
            bg_panel: colors::BG_PANEL,
            bg_border: colors::BG_BORDER,
            text_primary: colors::TEXT_PRIMARY,
            text_secondary: colors::TEXT_SECONDARY,
            text_muted: colors::TEXT_MUTED,
            primary: colors::PURPLE,
            primary_dim: colors::PURPLE_DIM,
            accent: colors::CYAN,
            blue: colors::BLUE,
            success: colors::SUCCESS,
            error: colors::ERROR,
            star: colors::STAR,
        }
    }

    #[must_use]
    pub fn high_contrast() -> Self {
        Self {
            bg_dark: Color::Black,
            bg_panel: Color::Black,
            bg_border: Color::Gray,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            text_muted: Color::DarkGray,
            primary: Color::White,
            primary_dim: Color::Gray,
            accent: Color::Cyan,
            blue: Color::Blue,
            success: Color::Green,
            error: Color::Red,
            star: Color::Gray,
        }
    }
}

#[must_use]
pub fn palette(options: UiOptions) -> Palette {
    if options.high_contrast {
        Palette::high_contrast()
    } else {
        Palette::standard()
    }
}

/// ASCII/Unicode glyphs.
#[derive(Debug, Clone, Copy)]
pub struct Glyphs {
    pub bar_full: &'static str,
    pub bar_empty: &'static str,
    pub star: &'static str,
    pub star_bright: &'static str,
    pub shooting_star: &'static str,
    pub shooting_tail: &'static str,
    pub bullet: &'static str,
    pub cursor: &'static str,
    pub link: &'static str,
    pub ufo: &'static str,
    pub asteroid: &'static str,
    pub rule: &'static str,
    pub active: &'static str,
}

#[must_use]
pub fn glyphs(options: UiOptions) -> Glyphs {
    if options.ascii_only {
        Glyphs {
            bar_full: "#",
            bar_empty: "-",
            star: ".",
            star_bright: "*",
            shooting_star: "*",
            shooting_tail: "-",
            bullet: "*",
            cursor: "_",
            link: "->",
            ufo: "<o>",
            asteroid: "o",
            rule: "-",
            active: ">",
        }
    } else {
        Glyphs {
            bar_full: "█",
            bar_empty: "░",
            star: "·",
            star_bright: "✦",
            shooting_star: "✸",
            shooting_tail: "─",
            bullet: "•",
            cursor: "▏",
            link: "↗",
            ufo: "◖●◗",
            asteroid: "●",
            rule: "─",
            active: "▸",
        }
    }
}

/// Pre-defined styles for common UI elements.
pub mod styles {
    use super::{Modifier, Palette, Style};

    #[must_use]
    pub fn heading(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.primary)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn body(palette: &Palette) -> Style {
        Style::default().fg(palette.text_secondary)
    }

    #[must_use]
    pub fn nav_active(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.bg_dark)
            .bg(palette.accent)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn nav_idle(palette: &Palette) -> Style {
        Style::default().fg(palette.text_secondary)
    }

    #[must_use]
    pub fn key_hint(palette: &Palette) -> Style {
        Style::default().fg(palette.text_muted)
    }

    #[must_use]
    pub fn key_highlight(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn field_error(palette: &Palette) -> Style {
        Style::default().fg(palette.error)
    }
}
