//! Boot splash screen.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use orbit_types::{BOOT_PROGRESS_MAX, BootState};

use crate::theme::{Glyphs, Palette, styles};

const MAX_BAR_WIDTH: usize = 40;

/// Splash rows for `state`, sized for a terminal `width` columns wide.
#[must_use]
pub fn splash_lines(
    state: BootState,
    width: u16,
    palette: &Palette,
    glyphs: &Glyphs,
) -> Vec<Line<'static>> {
    let fade = if state.exiting {
        Modifier::DIM
    } else {
        Modifier::empty()
    };
    let bar_width = usize::from(width).saturating_sub(8).clamp(4, MAX_BAR_WIDTH);
    let filled = usize::from(state.progress.min(BOOT_PROGRESS_MAX)) * bar_width
        / usize::from(BOOT_PROGRESS_MAX);

    vec![
        Line::from(Span::styled(
            "O R B I T",
            styles::heading(palette).add_modifier(fade),
        )),
        Line::from(Span::styled(
            "presentation shell",
            styles::key_hint(palette).add_modifier(fade),
        )),
        Line::default(),
        Line::from(vec![
            Span::styled(
                glyphs.bar_full.repeat(filled),
                Style::default().fg(palette.accent).add_modifier(fade),
            ),
            Span::styled(
                glyphs.bar_empty.repeat(bar_width - filled),
                Style::default().fg(palette.bg_border).add_modifier(fade),
            ),
        ]),
        Line::from(Span::styled(
            format!("{:>3}%", state.progress),
            Style::default().fg(palette.text_primary).add_modifier(fade),
        )),
        Line::default(),
        Line::from(Span::styled(
            state.phase.label(),
            styles::key_highlight(palette).add_modifier(fade),
        )),
    ]
}

pub fn draw_splash(
    frame: &mut Frame,
    area: Rect,
    state: BootState,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let lines = splash_lines(state, area.width, palette, glyphs);
    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).min(area.height);
    let rect = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(height) / 2,
        width: area.width,
        height,
    };
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        rect,
    );
}

#[cfg(test)]
mod tests {
    use super::splash_lines;
    use crate::theme::{Palette, glyphs};
    use orbit_types::ui::UiOptions;
    use orbit_types::{BootPhase, BootState};
    use ratatui::style::Modifier;
    use ratatui::text::Line;

    fn text(lines: &[Line<'_>]) -> String {
        lines
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn state(progress: u8, phase: BootPhase, exiting: bool) -> BootState {
        BootState {
            progress,
            phase,
            exiting,
        }
    }

    #[test]
    fn shows_progress_and_phase_label() {
        let options = UiOptions {
            ascii_only: true,
            ..UiOptions::default()
        };
        let lines = splash_lines(
            state(50, BootPhase::Loading, false),
            48,
            &Palette::standard(),
            &glyphs(options),
        );
        let text = text(&lines);
        assert!(text.contains(" 50%"));
        assert!(text.contains("LOADING SYSTEMS"));
        assert!(text.contains("####################--------------------"));
    }

    #[test]
    fn dims_while_exiting() {
        let lines = splash_lines(
            state(100, BootPhase::Ready, true),
            80,
            &Palette::standard(),
            &glyphs(UiOptions::default()),
        );
        assert!(
            lines[0].spans[0]
                .style
                .add_modifier
                .contains(Modifier::DIM)
        );
    }
}
