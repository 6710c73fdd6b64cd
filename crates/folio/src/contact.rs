//! Contact form validation and the local submission log
//!
//! Submissions never leave the browser: each valid form is appended to a
//! JSON array kept in local storage.

use std::sync::LazyLock;

use chrono::{DateTime, SecondsFormat};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{FolioError, Result};

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\s'-]+$").expect("valid name pattern"));
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+]?[0-9]{7,15}$").expect("valid phone pattern"));

/// Counted in UTF-16 code units, the way the browser reports `value.length`.
const MIN_MESSAGE_UNITS: usize = 4;

pub const SAVED_MESSAGE: &str = "Your message has been saved successfully!";
pub const SAVE_FAILED_MESSAGE: &str = "Message saved but there was an issue with storage.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    SecondName,
    Email,
    Number,
    Service,
    Message,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Name,
        Field::SecondName,
        Field::Email,
        Field::Number,
        Field::Service,
        Field::Message,
    ];

    /// The form control's `name` attribute.
    pub fn name(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::SecondName => "secondName",
            Field::Email => "email",
            Field::Number => "number",
            Field::Service => "service",
            Field::Message => "message",
        }
    }

    /// Id given to the field's error element.
    pub fn error_id(self) -> String {
        format!("{}-error", self.name())
    }
}

/// Raw values read from the form controls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub second_name: String,
    pub email: String,
    pub number: String,
    pub service: String,
    pub message: String,
}

impl ContactForm {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::SecondName => &self.second_name,
            Field::Email => &self.email,
            Field::Number => &self.number,
            Field::Service => &self.service,
            Field::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::SecondName => &mut self.second_name,
            Field::Email => &mut self.email,
            Field::Number => &mut self.number,
            Field::Service => &mut self.service,
            Field::Message => &mut self.message,
        };
        *slot = value.into();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

/// Check one field. Returns the message to show, if any.
pub fn validate_field(field: Field, raw: &str) -> Option<&'static str> {
    let value = raw.trim();
    match field {
        Field::Name | Field::SecondName => {
            let (required, letters) = if field == Field::Name {
                ("First name is required.", "First name should only contain letters.")
            } else {
                ("Last name is required.", "Last name should only contain letters.")
            };
            if value.is_empty() {
                Some(required)
            } else if !NAME_RE.is_match(value) {
                Some(letters)
            } else {
                None
            }
        }
        Field::Email => {
            if value.is_empty() {
                Some("Email is required.")
            } else if !EMAIL_RE.is_match(value) {
                Some("Please enter a valid email address.")
            } else {
                None
            }
        }
        Field::Number => {
            if value.is_empty() {
                Some("Phone number is required.")
            } else if !PHONE_RE.is_match(value) {
                Some("Please enter a valid phone number.")
            } else {
                None
            }
        }
        Field::Service => raw.is_empty().then_some("Please select a service."),
        Field::Message => {
            if value.is_empty() {
                Some("Message is required.")
            } else if value.encode_utf16().count() < MIN_MESSAGE_UNITS {
                Some("Message should be at least 4 characters.")
            } else {
                None
            }
        }
    }
}

/// Check every field, in form order.
pub fn validate(form: &ContactForm) -> Vec<FieldError> {
    Field::ALL
        .into_iter()
        .filter_map(|field| {
            validate_field(field, form.value(field)).map(|message| FieldError { field, message })
        })
        .collect()
}

/// One entry of the stored submission log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    /// Submission time in ms since the epoch
    pub id: i64,
    pub name: String,
    pub second_name: String,
    pub email: String,
    pub number: String,
    pub service: String,
    pub message: String,
    /// ISO-8601 UTC, millisecond precision
    pub timestamp: String,
}

impl ContactSubmission {
    /// Build the stored record from a validated form submitted at `submitted_at_ms`.
    pub fn from_form(form: &ContactForm, submitted_at_ms: f64) -> Result<Self> {
        let id = submitted_at_ms.floor() as i64;
        let timestamp = DateTime::from_timestamp_millis(id)
            .ok_or_else(|| FolioError::Host(format!("timestamp out of range: {submitted_at_ms}")))?
            .to_rfc3339_opts(SecondsFormat::Millis, true);

        Ok(Self {
            id,
            name: form.name.trim().to_string(),
            second_name: form.second_name.trim().to_string(),
            email: form.email.trim().to_string(),
            number: form.number.trim().to_string(),
            service: form.service.clone(),
            message: form.message.trim().to_string(),
            timestamp,
        })
    }
}

/// Append `submission` to the stored log text and return the new text.
///
/// A single stored object is wrapped into an array; unreadable content is
/// discarded and the log starts over.
pub fn append_submission(existing: Option<&str>, submission: &ContactSubmission) -> Result<String> {
    let mut entries = match existing.map(serde_json::from_str::<Value>) {
        None | Some(Ok(Value::Null)) => Vec::new(),
        Some(Ok(Value::Array(entries))) => entries,
        Some(Ok(single)) => vec![single],
        Some(Err(err)) => {
            tracing::warn!(error = %err, "stored contact log unreadable, starting over");
            Vec::new()
        }
    };
    entries.push(serde_json::to_value(submission)?);
    Ok(serde_json::to_string(&entries)?)
}

/// Key-value storage holding the submission log.
pub trait SubmissionStore {
    fn load(&self) -> Result<Option<String>>;
    fn save(&self, value: &str) -> Result<()>;
}

pub fn save_submission<S: SubmissionStore + ?Sized>(
    store: &S,
    submission: &ContactSubmission,
) -> Result<()> {
    let existing = store.load()?;
    let updated = append_submission(existing.as_deref(), submission)?;
    store.save(&updated)
}

/// Banner text shown after a valid submission.
pub fn success_message(stored: bool) -> &'static str {
    if stored { SAVED_MESSAGE } else { SAVE_FAILED_MESSAGE }
}
