//! Full-frame render tests through a vt100 virtual terminal.


use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::Terminal;

use orbit_tui::{App, Field, apply_event, draw};
use orbit_types::{SectionId, ShellSettings};
use vt100_backend::VT100Backend;

const FRAME: Duration = Duration::from_millis(16);

/// No starfield: stars would land in the gaps between words.
fn settings(skip_boot: bool) -> ShellSettings {
    let mut settings = ShellSettings {
        skip_boot,
        ..ShellSettings::default()
    };
    settings.ui.reduced_motion = true;
    settings
}

fn terminal(width: u16, height: u16) -> Terminal<VT100Backend> {
    Terminal::new(VT100Backend::new(width, height)).expect("terminal")
}

/// Draw, then advance one frame so the shell sees the new geometry, then
/// draw again.
fn render(terminal: &mut Terminal<VT100Backend>, app: &mut App) -> String {
    terminal.draw(|frame| draw(frame, app)).expect("draw");
    app.advance(FRAME);
    terminal.draw(|frame| draw(frame, app)).expect("draw");
    terminal.backend().contents()
}

/// Run frames until any smooth scroll has finished.
fn settle(terminal: &mut Terminal<VT100Backend>, app: &mut App) {
    for _ in 0..60 {
        app.advance(FRAME);
        terminal.draw(|frame| draw(frame, app)).expect("draw");
    }
}

fn ctrl(c: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
}

#[test]
fn splash_shows_boot_phase() {
    let mut app = App::new(settings(false));
    let mut terminal = terminal(100, 30);
    let screen = render(&mut terminal, &mut app);
    assert!(screen.contains("O R B I T"));
    assert!(screen.contains("INITIALIZING"));
    assert!(!screen.contains("FULL STACK DEVELOPER"));
}

#[test]
fn interactive_page_shows_navbar_and_hero() {
    let mut app = App::new(settings(true));
    let mut terminal = terminal(120, 40);
    let screen = render(&mut terminal, &mut app);

    let navbar = terminal.backend().row(0);
    for label in ["Home", "About", "Skills", "Projects", "Contact"] {
        assert!(navbar.contains(label), "navbar missing {label}: {navbar}");
    }
    assert!(screen.contains("FULL STACK DEVELOPER"));
    assert!(screen.contains("Home"));
}

#[test]
fn shortcut_scrolls_the_page_to_contact() {
    let mut app = App::new(settings(true));
    let mut terminal = terminal(120, 40);
    render(&mut terminal, &mut app);

    apply_event(&mut app, ctrl('5'));
    settle(&mut terminal, &mut app);

    assert_eq!(app.shell().active_section(), SectionId::CONTACT);
    let screen = terminal.backend().contents();
    assert!(screen.contains(Field::Name.label()));
    assert!(screen.contains("Contact"));
}

#[test]
fn rejected_submit_shows_field_errors() {
    let mut app = App::new(settings(true));
    let mut terminal = terminal(120, 40);
    render(&mut terminal, &mut app);
    apply_event(&mut app, ctrl('5'));
    settle(&mut terminal, &mut app);

    assert!(!apply_event(
        &mut app,
        Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
    ));
    assert_eq!(app.focused_field(), Some(Field::Name));
    apply_event(&mut app, ctrl('s'));
    let screen = render(&mut terminal, &mut app);

    assert!(screen.contains("Please fix the errors in the form"));
    assert!(screen.contains("Name is required"));
}

#[test]
fn narrow_terminal_uses_compact_navbar() {
    let mut app = App::new(settings(true));
    let mut terminal = terminal(40, 24);
    render(&mut terminal, &mut app);

    assert!(app.shell().is_reduced());
    let navbar = terminal.backend().row(0);
    assert!(navbar.contains(" 1 "));
    assert!(!navbar.contains("Projects"));
}
