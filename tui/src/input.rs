//! Input handling for the Orbit shell.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{Result, anyhow};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;
use tokio::task::{self, JoinHandle};
use tokio::time;

use crate::app::App;

const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(25); // shutdown responsiveness
const INPUT_CHANNEL_CAPACITY: usize = 1024; // bounded: no OOM
const MAX_EVENTS_PER_FRAME: usize = 64; // never starve rendering

enum InputMsg {
    Event(Event),
    Error(String),
}

/// Reads terminal events on a blocking thread and hands them to the frame
/// loop through a bounded channel.
pub struct InputPump {
    rx: mpsc::Receiver<InputMsg>,
    stop: Arc<AtomicBool>,
    join: Option<JoinHandle<()>>,
}

impl InputPump {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(INPUT_CHANNEL_CAPACITY);
        let stop = Arc::new(AtomicBool::new(false));
        let stop2 = stop.clone();

        let join = task::spawn_blocking(move || input_loop(stop2, tx));
        Self {
            rx,
            stop,
            join: Some(join),
        }
    }

    pub async fn shutdown(&mut self) {
        // Close first so a reader blocked on a full channel wakes up.
        self.rx.close();

        self.stop.store(true, Ordering::Release);
        if let Some(join) = self.join.take() {
            let _ = time::timeout(Duration::from_secs(2), join).await;
        }
    }
}

impl Default for InputPump {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for InputPump {
    fn drop(&mut self) {
        // Best-effort stop; never block in Drop.
        self.rx.close();
        self.stop.store(true, Ordering::Release);
    }
}

fn input_loop(stop: Arc<AtomicBool>, tx: mpsc::Sender<InputMsg>) {
    while !stop.load(Ordering::Acquire) {
        match event::poll(INPUT_POLL_TIMEOUT) {
            Ok(true) => match event::read() {
                Ok(ev) => {
                    // Backpressure instead of dropping: a held key must not
                    // lose events.
                    if tx.blocking_send(InputMsg::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                    break;
                }
            },
            Ok(false) => {}
            Err(e) => {
                let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                break;
            }
        }
    }
}

/// Drain up to one frame's worth of input. Returns true when the app should
/// quit.
pub fn handle_events(app: &mut App, input: &mut InputPump) -> Result<bool> {
    let mut processed = 0;
    while processed < MAX_EVENTS_PER_FRAME {
        let ev = match input.rx.try_recv() {
            Ok(InputMsg::Event(ev)) => ev,
            Ok(InputMsg::Error(msg)) => return Err(anyhow!("input error: {msg}")),
            Err(mpsc::error::TryRecvError::Empty) => break,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                return Err(anyhow!("input pump disconnected"));
            }
        };

        if apply_event(app, ev) {
            return Ok(true);
        }
        processed += 1;
    }
    Ok(app.should_quit())
}

/// Apply a single event. Returns true when the app should quit.
pub fn apply_event(app: &mut App, event: Event) -> bool {
    match event {
        Event::Key(key) => {
            if matches!(key.kind, KeyEventKind::Release) {
                return app.should_quit();
            }

            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                app.request_quit();
                return true;
            }

            // The splash screen swallows everything but quit.
            if !app.shell().is_interactive() {
                return app.should_quit();
            }

            // Modifier+digit goes through the dispatcher in every mode; it
            // refuses on its own while a field is focused.
            if app.shell_mut().handle_shortcut(&key) {
                return app.should_quit();
            }

            if app.is_typing() {
                handle_form_keys(app, key);
            } else {
                handle_page_keys(app, key);
            }
        }
        Event::Paste(text) => {
            if app.is_typing() {
                app.paste(&text);
            }
        }
        _ => {}
    }
    app.should_quit()
}

fn handle_page_keys(app: &mut App, key: KeyEvent) {
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return;
    }
    match key.code {
        KeyCode::Char('q') => app.request_quit(),
        KeyCode::Up | KeyCode::Char('k') => app.shell_mut().scroll_by(-1),
        KeyCode::Down | KeyCode::Char('j') => app.shell_mut().scroll_by(1),
        KeyCode::PageUp => app.shell_mut().page_up(),
        KeyCode::PageDown | KeyCode::Char(' ') => app.shell_mut().page_down(),
        KeyCode::Home | KeyCode::Char('g') => app.shell_mut().scroll_to_top(),
        KeyCode::End | KeyCode::Char('G') => app.shell_mut().scroll_to_bottom(),
        KeyCode::Enter | KeyCode::Char('i') => {
            app.enter_form();
        }
        _ => {}
    }
}

fn handle_form_keys(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => app.leave_form(),
        KeyCode::Tab | KeyCode::Enter => app.cycle_field(true),
        KeyCode::BackTab => app.cycle_field(false),
        KeyCode::Char('s') if ctrl => app.submit_form(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
            app.type_char(c);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::apply_event;
    use crate::app::App;
    use crate::contact::Field;
    use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
    use orbit_types::{PageGeometry, SectionId, SectionRegistry, ShellSettings};
    use std::time::Duration;

    const FRAME: Duration = Duration::from_millis(16);

    fn app(skip_boot: bool) -> App {
        let settings = ShellSettings {
            skip_boot,
            ..ShellSettings::default()
        };
        let mut app = App::new(settings);
        app.shell_mut().set_geometry(
            PageGeometry::stacked(SectionRegistry::standard().ids().map(|id| (id, 20))),
            20,
        );
        app.advance(FRAME);
        app
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    #[test]
    fn quit_keys() {
        let mut first = app(true);
        assert!(apply_event(&mut first, press(KeyCode::Char('q'))));

        let mut second = app(true);
        assert!(apply_event(&mut second, ctrl('c')));
        assert!(second.should_quit());
    }

    #[test]
    fn splash_ignores_navigation() {
        let mut app = app(false);
        assert!(!apply_event(&mut app, ctrl('3')));
        assert_eq!(app.shell().pending_navigation(), None);
    }

    #[test]
    fn digit_shortcut_starts_navigation() {
        let mut app = app(true);
        apply_event(&mut app, ctrl('4'));
        assert_eq!(app.shell().pending_navigation(), Some(SectionId::PROJECTS));
    }

    #[test]
    fn alt_digits_reach_every_section() {
        let mut app = app(true);
        let sections: Vec<SectionId> = SectionRegistry::standard().ids().collect();
        // Reverse order so every jump actually moves the page.
        for (index, section) in sections.iter().enumerate().rev() {
            let digit = char::from_digit(u32::try_from(index + 1).unwrap(), 10).unwrap();
            let alt = Event::Key(KeyEvent::new(KeyCode::Char(digit), KeyModifiers::ALT));
            assert!(!apply_event(&mut app, alt));
            for _ in 0..60 {
                app.advance(FRAME);
            }
            assert_eq!(app.shell().active_section(), *section, "Alt+{digit}");
            assert_eq!(app.shell().pending_navigation(), None);
        }
    }

    #[test]
    fn alt_digit_does_not_type_or_scroll_as_a_page_key() {
        let mut app = app(true);
        apply_event(
            &mut app,
            Event::Key(KeyEvent::new(KeyCode::Char('1'), KeyModifiers::ALT)),
        );
        assert_eq!(app.shell().scroll_offset(), 0);
        assert_eq!(app.shell().active_section(), SectionId::HOME);
    }

    #[test]
    fn shortcut_digits_are_not_typed_into_fields() {
        let mut app = app(true);
        app.focus_field(Field::Name);
        apply_event(&mut app, ctrl('2'));
        assert_eq!(app.form().value(Field::Name), "");
        assert_eq!(app.shell().pending_navigation(), None);
        assert_eq!(app.shell().active_section(), SectionId::CONTACT);
    }

    #[test]
    fn typing_q_does_not_quit() {
        let mut app = app(true);
        app.focus_field(Field::Message);
        assert!(!apply_event(&mut app, press(KeyCode::Char('q'))));
        assert_eq!(app.form().value(Field::Message), "q");
    }

    #[test]
    fn tab_moves_between_fields_and_esc_leaves() {
        let mut app = app(true);
        app.focus_field(Field::Name);
        apply_event(&mut app, press(KeyCode::Tab));
        assert_eq!(app.focused_field(), Some(Field::Email));
        apply_event(&mut app, press(KeyCode::BackTab));
        assert_eq!(app.focused_field(), Some(Field::Name));
        apply_event(&mut app, press(KeyCode::Esc));
        assert!(!app.is_typing());
    }

    #[test]
    fn arrow_keys_scroll() {
        let mut app = app(true);
        apply_event(&mut app, press(KeyCode::Down));
        apply_event(&mut app, press(KeyCode::Char('j')));
        assert_eq!(app.shell().scroll_offset(), 2);
        apply_event(&mut app, press(KeyCode::End));
        assert_eq!(app.shell().scroll_offset(), 80);
        apply_event(&mut app, press(KeyCode::Home));
        assert_eq!(app.shell().scroll_offset(), 0);
    }

    #[test]
    fn paste_only_lands_in_a_focused_field() {
        let mut app = app(true);
        apply_event(&mut app, Event::Paste("ignored".to_string()));
        app.focus_field(Field::Email);
        apply_event(&mut app, Event::Paste("ada@example.com".to_string()));
        assert_eq!(app.form().value(Field::Email), "ada@example.com");
    }
}
