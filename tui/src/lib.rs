//! Terminal presentation for the Orbit shell.
//!
//! [`draw`] lays the page out for the current terminal size, reports the
//! resulting geometry to the shell, and renders the navbar, the visible
//! slice of the page and the status line. Input is pumped by
//! [`InputPump`] and applied with [`handle_events`].

mod app;
mod contact;
mod content;
mod effects;
mod input;
mod splash;
mod starfield;
mod theme;

pub use app::{App, Notice, NoticeKind, REDUCED_WIDTH};
pub use contact::{ContactForm, Field, FieldError, Submission};
pub use content::{Page, PageView, build_page};
pub use effects::{REVEAL_SHIFT, RevealState, apply_reveal, reveal_state};
pub use input::{InputPump, apply_event, handle_events};
pub use splash::{draw_splash, splash_lines};
pub use starfield::{StarDensity, Starfield};
pub use theme::{Glyphs, Palette, glyphs, palette, styles};

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

const NAVBAR_HEIGHT: u16 = 2;
const STATUS_HEIGHT: u16 = 1;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &mut App) {
    let options = app.ui_options();
    let palette = palette(options);
    let glyphs = glyphs(options);
    let area = frame.area();

    let bg_block = Block::default().style(Style::default().bg(palette.bg_dark));
    frame.render_widget(bg_block, area);
    app.set_viewport_width(area.width);

    if !app.shell().is_interactive() {
        draw_splash(frame, area, app.shell().boot_state(), &palette, &glyphs);
        app.starfield()
            .render(frame.buffer_mut(), area, &palette, &glyphs);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(NAVBAR_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(area);

    let bindings = app.shell().shortcut_bindings();
    let page = build_page(&PageView {
        width: chunks[1].width,
        viewport_height: chunks[1].height,
        form: app.form(),
        focused_field: app.focused_field(),
        bindings: &bindings,
        palette: &palette,
        glyphs: &glyphs,
    });
    app.shell_mut()
        .set_geometry(page.geometry().clone(), chunks[1].height);

    draw_page(frame, app, &page, chunks[1]);
    app.starfield()
        .render(frame.buffer_mut(), chunks[1], &palette, &glyphs);
    draw_navbar(frame, app, chunks[0], &palette, &glyphs);
    draw_status_bar(frame, app, chunks[2], &palette, &glyphs);
}

fn draw_page(frame: &mut Frame, app: &App, page: &Page, area: Rect) {
    let shell = app.shell();
    let offset = usize::from(shell.scroll_offset());
    let lines: Vec<Line> = page
        .lines()
        .iter()
        .enumerate()
        .skip(offset)
        .take(usize::from(area.height))
        .map(|(row, line)| {
            let section = u16::try_from(row)
                .ok()
                .and_then(|row| page.geometry().section_at(row));
            apply_reveal(line, reveal_state(shell.reveals(), section))
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_navbar(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let shell = app.shell();
    let active = shell.active_section();
    let solid = shell.scrolled_past_threshold();
    let bindings = shell.shortcut_bindings();

    let brand = vec![
        Span::styled(format!(" {} ", glyphs.star_bright), Style::default().fg(palette.accent)),
        Span::styled("ORBIT", styles::heading(palette)),
        Span::raw("   "),
    ];
    let brand_width: usize = brand.iter().map(Span::width).sum();
    let full_width: usize = bindings
        .iter()
        .map(|b| b.section.label().width() + 5)
        .sum();
    let compact = brand_width + full_width > usize::from(area.width);

    let mut spans = brand;
    for binding in &bindings {
        let is_active = binding.section == active;
        let style = if is_active {
            styles::nav_active(palette)
        } else {
            styles::nav_idle(palette)
        };
        if compact {
            spans.push(Span::styled(format!(" {} ", binding.digit), style));
        } else {
            spans.push(Span::styled(binding.digit.to_string(), styles::key_hint(palette)));
            spans.push(Span::styled(format!(" {} ", binding.section.label()), style));
            spans.push(Span::raw(" "));
        }
    }
    if compact {
        spans.push(Span::styled(
            format!(" {}", active.label()),
            styles::key_highlight(palette),
        ));
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    let mut bar = Paragraph::new(Line::from(spans));
    if solid {
        bar = bar.style(Style::default().bg(palette.bg_panel));
        let rule = glyphs.rule.repeat(usize::from(area.width));
        frame.render_widget(
            Paragraph::new(Span::styled(rule, Style::default().fg(palette.bg_border))),
            rows[1],
        );
    }
    frame.render_widget(bar, rows[0]);
}

fn draw_status_bar(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let shell = app.shell();
    let left = if let Some(notice) = app.notice() {
        let color = match notice.kind() {
            NoticeKind::Success => palette.success,
            NoticeKind::Error => palette.error,
        };
        Line::from(Span::styled(
            format!(" {} {}", glyphs.bullet, notice.text()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
    } else if app.is_typing() {
        key_hints(
            &[
                ("Tab", "next field"),
                ("Ctrl+S", "send"),
                ("Esc", "leave form"),
            ],
            palette,
        )
    } else {
        key_hints(
            &[
                ("j/k", "scroll"),
                ("PgUp/PgDn", "page"),
                ("Alt+1-5", "jump"),
                ("Enter", "contact"),
                ("q", "quit"),
            ],
            palette,
        )
    };

    let max = shell.geometry().max_offset(shell.viewport_height());
    let percent = if max == 0 {
        100
    } else {
        u32::from(shell.scroll_offset()) * 100 / u32::from(max)
    };
    let lock = if shell.navigation().focus_locked {
        format!("{} ", glyphs.cursor)
    } else {
        String::new()
    };
    let right = format!("{lock}{} {percent:>3}% ", shell.active_section().label());
    let right_width = u16::try_from(right.width()).unwrap_or(u16::MAX);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(right_width)])
        .split(area);

    frame.render_widget(Paragraph::new(left), chunks[0]);
    frame.render_widget(
        Paragraph::new(Span::styled(right, styles::key_hint(palette))),
        chunks[1],
    );
}

fn key_hints(pairs: &[(&'static str, &'static str)], palette: &Palette) -> Line<'static> {
    let mut spans = vec![Span::raw(" ")];
    for (key, action) in pairs {
        spans.push(Span::styled(*key, styles::key_highlight(palette)));
        spans.push(Span::styled(format!(" {action}  "), styles::key_hint(palette)));
    }
    Line::from(spans)
}
