//! Contact form state and validation.

use std::mem;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use unicode_segmentation::UnicodeSegmentation;

const MIN_MESSAGE_CHARS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Field::Name => 0,
            Field::Email => 1,
            Field::Message => 2,
        }
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Next field in tab order, wrapping.
    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    #[must_use]
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "YOUR IDENTITY",
            Field::Email => "RETURN ADDRESS",
            Field::Message => "TRANSMISSION",
        }
    }

    #[must_use]
    pub fn placeholder(self) -> &'static str {
        match self {
            Field::Name => "NAME",
            Field::Email => "EMAIL",
            Field::Message => "MESSAGE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Name is required")]
    NameRequired,
    #[error("Email is required")]
    EmailRequired,
    #[error("Invalid email format")]
    EmailInvalid,
    #[error("Message is required")]
    MessageRequired,
    #[error("Message must be at least {MIN_MESSAGE_CHARS} characters")]
    MessageTooShort,
}

impl FieldError {
    #[must_use]
    pub fn field(self) -> Field {
        match self {
            FieldError::NameRequired => Field::Name,
            FieldError::EmailRequired | FieldError::EmailInvalid => Field::Email,
            FieldError::MessageRequired | FieldError::MessageTooShort => Field::Message,
        }
    }
}

/// A validated, accepted form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    values: [String; 3],
    errors: Vec<FieldError>,
}

impl ContactForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn value(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    #[must_use]
    pub fn error(&self, field: Field) -> Option<FieldError> {
        self.errors.iter().copied().find(|e| e.field() == field)
    }

    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Editing a field clears its error.
    pub fn insert_str(&mut self, field: Field, text: &str) {
        let text: String = text
            .chars()
            .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
            .filter(|c| !c.is_control())
            .collect();
        if text.is_empty() {
            return;
        }
        self.values[field.index()].push_str(&text);
        self.clear_error(field);
    }

    pub fn insert_char(&mut self, field: Field, c: char) {
        let mut buf = [0u8; 4];
        self.insert_str(field, c.encode_utf8(&mut buf));
    }

    /// Remove the last grapheme cluster.
    pub fn backspace(&mut self, field: Field) {
        let value = &mut self.values[field.index()];
        if let Some((start, _)) = value.grapheme_indices(true).next_back() {
            value.truncate(start);
            self.clear_error(field);
        }
    }

    #[must_use]
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if self.value(Field::Name).trim().is_empty() {
            errors.push(FieldError::NameRequired);
        }

        let email = self.value(Field::Email);
        if email.trim().is_empty() {
            errors.push(FieldError::EmailRequired);
        } else if !is_email(email) {
            errors.push(FieldError::EmailInvalid);
        }

        let message = self.value(Field::Message).trim();
        if message.is_empty() {
            errors.push(FieldError::MessageRequired);
        } else if message.chars().count() < MIN_MESSAGE_CHARS {
            errors.push(FieldError::MessageTooShort);
        }

        errors
    }

    /// Validate and, on success, reset the form and hand back its contents.
    /// On failure the per-field errors are kept for display.
    pub fn submit(&mut self) -> Result<Submission, Vec<FieldError>> {
        let errors = self.validate();
        if !errors.is_empty() {
            self.errors.clone_from(&errors);
            return Err(errors);
        }

        let [name, email, message] = mem::take(&mut self.values);
        self.errors.clear();
        Ok(Submission {
            name,
            email,
            message,
        })
    }

    fn clear_error(&mut self, field: Field) {
        self.errors.retain(|e| e.field() != field);
    }
}

/// `local@domain.tld`: no whitespace, a single `@`, and a dot in the domain
/// with something on both sides of it.
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

fn is_email(value: &str) -> bool {
    EMAIL.is_match(value)
}
