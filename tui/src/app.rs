//! Application state: the shell plus everything the presentation layer owns.

use std::time::{Duration, Instant};

use orbit_core::{CONTACT_FORM, FocusedInput, Shell};
use orbit_types::ui::{EffectTimer, UiOptions};
use orbit_types::{SectionId, SectionRegistry, ShellSettings};

use crate::contact::{ContactForm, Field, FieldError};
use crate::starfield::{StarDensity, Starfield};

/// Terminals narrower than this get the reduced feature set.
pub const REDUCED_WIDTH: u16 = 80;

const NOTICE_DURATION: Duration = Duration::from_secs(3);
/// Longest delta fed to the shell from the wall clock (suspend, debugger).
const MAX_FRAME_DELTA: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient status-line message.
#[derive(Debug, Clone)]
pub struct Notice {
    text: String,
    kind: NoticeKind,
    timer: EffectTimer,
}

impl Notice {
    fn new(text: impl Into<String>, kind: NoticeKind) -> Self {
        Self {
            text: text.into(),
            kind,
            timer: EffectTimer::new(NOTICE_DURATION),
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn kind(&self) -> NoticeKind {
        self.kind
    }
}

#[derive(Debug)]
pub struct App {
    shell: Shell,
    form: ContactForm,
    starfield: Starfield,
    notice: Option<Notice>,
    options: UiOptions,
    should_quit: bool,
    last_frame: Instant,
}

impl App {
    #[must_use]
    pub fn new(settings: ShellSettings) -> Self {
        let options = settings.ui;
        let density = if options.reduced_motion {
            StarDensity::Off
        } else {
            StarDensity::Full
        };
        Self {
            shell: Shell::mount(SectionRegistry::standard(), settings),
            form: ContactForm::new(),
            starfield: Starfield::new(density),
            notice: None,
            options,
            should_quit: false,
            last_frame: Instant::now(),
        }
    }

    /// Advance by the wall-clock time since the previous tick.
    pub fn tick(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame).min(MAX_FRAME_DELTA);
        self.last_frame = now;
        self.advance(delta);
    }

    pub fn advance(&mut self, delta: Duration) {
        self.shell.frame(delta);
        self.starfield.advance(delta);
        if let Some(notice) = &mut self.notice {
            notice.timer.advance(delta);
            if notice.timer.is_finished() {
                self.notice = None;
            }
        }
    }

    /// Device-capability check, re-run whenever the terminal width is known.
    pub fn set_viewport_width(&mut self, width: u16) {
        self.shell.set_reduced(width < REDUCED_WIDTH);
        self.starfield.set_density(self.star_density());
    }

    fn star_density(&self) -> StarDensity {
        if self.options.reduced_motion {
            StarDensity::Off
        } else if self.shell.is_reduced() {
            StarDensity::Reduced
        } else {
            StarDensity::Full
        }
    }

    #[must_use]
    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    pub fn shell_mut(&mut self) -> &mut Shell {
        &mut self.shell
    }

    #[must_use]
    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    #[must_use]
    pub fn starfield(&self) -> &Starfield {
        &self.starfield
    }

    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.options
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    /// Releases the shell's timers and observers.
    pub fn shutdown(&mut self) {
        self.shell.teardown();
    }

    // ------------------------------------------------------------------
    // Contact form
    // ------------------------------------------------------------------

    #[must_use]
    pub fn focused_field(&self) -> Option<Field> {
        self.shell
            .focused_input()
            .filter(|input| input.container == CONTACT_FORM)
            .and_then(|input| Field::from_index(input.field))
    }

    #[must_use]
    pub fn is_typing(&self) -> bool {
        self.shell.is_typing()
    }

    /// Enter the form when the contact section is active, otherwise head
    /// there first. Returns true if a field took focus.
    pub fn enter_form(&mut self) -> bool {
        if self.shell.active_section() == SectionId::CONTACT {
            self.focus_field(Field::Name);
            true
        } else {
            self.shell.scroll_to_section(SectionId::CONTACT);
            false
        }
    }

    pub fn focus_field(&mut self, field: Field) {
        self.shell.focus_input(FocusedInput {
            section: SectionId::CONTACT,
            container: CONTACT_FORM,
            field: field.index(),
        });
    }

    /// Move focus within the form: a blur immediately followed by a focus.
    pub fn cycle_field(&mut self, forward: bool) {
        let Some(current) = self.focused_field() else {
            return;
        };
        let next = if forward { current.next() } else { current.prev() };
        self.shell.blur_input();
        self.focus_field(next);
    }

    pub fn leave_form(&mut self) {
        self.shell.blur_input();
    }

    pub fn type_char(&mut self, c: char) {
        if let Some(field) = self.focused_field() {
            self.form.insert_char(field, c);
        }
    }

    pub fn paste(&mut self, text: &str) {
        if let Some(field) = self.focused_field() {
            self.form.insert_str(field, text);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.focused_field() {
            self.form.backspace(field);
        }
    }

    pub fn submit_form(&mut self) {
        match self.form.submit() {
            Ok(submission) => {
                tracing::info!(
                    message_chars = submission.message.chars().count(),
                    "Contact form submitted"
                );
                self.notice = Some(Notice::new(
                    "Message sent successfully!",
                    NoticeKind::Success,
                ));
            }
            Err(errors) => {
                tracing::debug!(errors = errors.len(), "Contact form rejected");
                self.notice = Some(Notice::new(
                    "Please fix the errors in the form",
                    NoticeKind::Error,
                ));
                if let Some(first) = errors.first().copied().map(FieldError::field)
                    && self.focused_field() != Some(first)
                {
                    self.shell.blur_input();
                    self.focus_field(first);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{App, NoticeKind};
    use crate::contact::Field;
    use orbit_types::{PageGeometry, SectionId, SectionRegistry, ShellSettings};
    use std::time::Duration;

    const FRAME: Duration = Duration::from_millis(16);

    fn app() -> App {
        let settings = ShellSettings {
            skip_boot: true,
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

    #[test]
    fn enter_form_away_from_contact_navigates_first() {
        let mut app = app();
        assert!(!app.enter_form());
        assert_eq!(app.shell().pending_navigation(), Some(SectionId::CONTACT));
        assert!(!app.is_typing());
    }

    #[test]
    fn typing_locks_navigation_on_contact() {
        let mut app = app();
        app.focus_field(Field::Name);
        assert_eq!(app.focused_field(), Some(Field::Name));
        assert_eq!(app.shell().active_section(), SectionId::CONTACT);
        app.type_char('A');
        assert_eq!(app.form().value(Field::Name), "A");
    }

    #[test]
    fn cycling_fields_keeps_the_lock() {
        let mut app = app();
        app.focus_field(Field::Message);
        app.cycle_field(true);
        assert_eq!(app.focused_field(), Some(Field::Name));
        for _ in 0..20 {
            app.advance(FRAME);
        }
        assert!(app.shell().navigation().focus_locked);
    }

    #[test]
    fn leaving_the_form_unlocks_after_grace() {
        let mut app = app();
        app.focus_field(Field::Email);
        app.leave_form();
        assert!(app.shell().navigation().focus_locked);
        for _ in 0..8 {
            app.advance(FRAME);
        }
        assert!(!app.shell().navigation().focus_locked);
        assert_eq!(app.shell().active_section(), SectionId::HOME);
    }

    #[test]
    fn rejected_submit_focuses_first_error() {
        let mut app = app();
        app.focus_field(Field::Message);
        app.submit_form();
        assert_eq!(app.focused_field(), Some(Field::Name));
        assert_eq!(app.notice().map(|n| n.kind()), Some(NoticeKind::Error));
    }

    #[test]
    fn accepted_submit_resets_and_notice_expires() {
        let mut app = app();
        app.focus_field(Field::Name);
        app.paste("Ada");
        app.focus_field(Field::Email);
        app.paste("ada@example.com");
        app.focus_field(Field::Message);
        app.paste("Hello from the terminal");
        app.submit_form();

        assert_eq!(app.form().value(Field::Message), "");
        assert_eq!(app.notice().map(|n| n.kind()), Some(NoticeKind::Success));
        app.advance(Duration::from_secs(3));
        assert!(app.notice().is_none());
    }

    #[test]
    fn narrow_width_reduces_decoration() {
        let mut app = app();
        app.set_viewport_width(60);
        assert!(app.shell().is_reduced());
        assert_eq!(app.starfield().counts().stars, 20);
        app.set_viewport_width(120);
        assert_eq!(app.starfield().counts().stars, 50);
    }
}
