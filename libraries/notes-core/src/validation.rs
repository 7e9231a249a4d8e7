//! Input schemas checked at the procedure boundary
//!
//! Every procedure input is a plain `Deserialize` struct. Inputs with
//! constraints implement [`Validate`], which reports all failing fields at
//! once rather than stopping at the first.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Minimum password length, in characters
pub const PASSWORD_MIN_CHARS: usize = 8;

/// bcrypt only reads the first 72 bytes of its input
pub const PASSWORD_MAX_BYTES: usize = 72;

/// Maximum length of an email address (RFC 5321 path limit)
pub const EMAIL_MAX_LEN: usize = 254;

/// Field-level validation failures
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure message for `field`
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Messages recorded for `field`
    pub fn field(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> &BTreeMap<String, Vec<String>> {
        &self.fields
    }

    /// `Ok(())` when nothing was recorded
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.fields {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Input that can be checked before any business logic runs
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// Input of `registration.registerUser`
#[derive(Clone, Deserialize)]
pub struct RegistrationForm {
    pub email: String,
    pub password: String,
}

impl RegistrationForm {
    /// Trim and lowercase the email so lookups and uniqueness are case-insensitive
    pub fn normalized(self) -> Self {
        Self {
            email: normalize_email(&self.email),
            password: self.password,
        }
    }
}

impl Validate for RegistrationForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if !is_valid_email(&self.email) {
            errors.add("email", "Invalid email");
        }

        if self.password.chars().count() < PASSWORD_MIN_CHARS {
            errors.add(
                "password",
                format!("Password must be at least {PASSWORD_MIN_CHARS} characters long"),
            );
        } else if self.password.len() > PASSWORD_MAX_BYTES {
            errors.add(
                "password",
                format!("Password must be at most {PASSWORD_MAX_BYTES} bytes long"),
            );
        }

        errors.into_result()
    }
}

/// Input of the credential login exchange
///
/// Not validated beyond its shape: a malformed credential is just an invalid
/// credential.
#[derive(Clone, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Input of `note.createNote`
#[derive(Debug, Clone, Deserialize)]
pub struct NoteForm {
    pub title: String,
    pub content: String,
}

impl Validate for NoteForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.title.is_empty() {
            errors.add("title", "Enter title");
        }
        if self.content.is_empty() {
            errors.add("content", "Enter content");
        }

        errors.into_result()
    }
}

/// Input of `note.getNoteById` and `note.deleteNote`
#[derive(Debug, Clone, Deserialize)]
pub struct NoteIdInput {
    pub id: String,
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Structural email check: `local@domain.tld`, no whitespace, no empty labels
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.len() > EMAIL_MAX_LEN {
        return false;
    }
    if email.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    labels.iter().all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_alphanumeric() || c == '-')
    })
}
