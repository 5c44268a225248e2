use std::collections::BTreeMap;
use std::fmt;

/// Contact form input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    /// Sender name.
    Name,
    /// Sender email.
    Email,
    /// Subject line.
    Subject,
    /// Message body.
    Message,
}

impl Field {
    /// Every field in display order.
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Subject, Self::Message];

    fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Submitted form values, passed through verbatim.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ContactPayload {
    /// Sender name.
    pub name: String,
    /// Sender email.
    pub email: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub message: String,
}

/// Why a submit was refused.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// One or more fields failed validation; nothing was submitted.
    #[error("invalid fields: {}", list(.0))]
    Invalid(Vec<Field>),
}

fn list(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Receives valid submissions.
pub trait SubmitHandler {
    /// Called exactly once per valid submit.
    fn submit(&mut self, payload: ContactPayload);
}

/// Default handler: logs the submission and drops it.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggingSubmitHandler;

impl SubmitHandler for LoggingSubmitHandler {
    fn submit(&mut self, payload: ContactPayload) {
        tracing::info!(
            name = %payload.name,
            email = %payload.email,
            subject = %payload.subject,
            message_len = payload.message.len(),
            "contact form submitted"
        );
    }
}

/// Handler that keeps every submission in memory.
#[derive(Clone, Debug, Default)]
pub struct RecordingSubmitHandler {
    /// Submissions in arrival order.
    pub received: Vec<ContactPayload>,
}

impl SubmitHandler for RecordingSubmitHandler {
    fn submit(&mut self, payload: ContactPayload) {
        self.received.push(payload);
    }
}

impl<A: SubmitHandler, B: SubmitHandler> SubmitHandler for (A, B) {
    fn submit(&mut self, payload: ContactPayload) {
        self.0.submit(payload.clone());
        self.1.submit(payload);
    }
}

/// Contact form state: current values and fields marked invalid by the last submit.
#[derive(Clone, Debug, Default)]
pub struct ContactForm {
    values: BTreeMap<Field, String>,
    invalid: Vec<Field>,
}

impl ContactForm {
    /// Empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Type into a field; clears its invalid mark.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values.insert(field, value.into());
        self.invalid.retain(|&f| f != field);
    }

    /// Current value of a field.
    pub fn value(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Fields marked invalid by the last submit.
    pub fn invalid_fields(&self) -> &[Field] {
        &self.invalid
    }

    fn check(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|&f| {
                let v = self.value(f);
                v.trim().is_empty() || (f == Field::Email && !looks_like_email(v))
            })
            .collect()
    }

    /// Validate and hand the values to `handler`.
    ///
    /// On failure the offending fields are marked and `handler` is not called. On success
    /// the form is cleared.
    pub fn submit(&mut self, handler: &mut dyn SubmitHandler) -> Result<(), FormError> {
        let invalid = self.check();
        if !invalid.is_empty() {
            tracing::debug!(fields = %list(&invalid), "contact form rejected");
            self.invalid = invalid.clone();
            return Err(FormError::Invalid(invalid));
        }
        let mut take = |f: Field| self.values.remove(&f).unwrap_or_default();
        let payload = ContactPayload {
            name: take(Field::Name),
            email: take(Field::Email),
            subject: take(Field::Subject),
            message: take(Field::Message),
        };
        self.invalid.clear();
        handler.submit(payload);
        Ok(())
    }
}

fn looks_like_email(v: &str) -> bool {
    let v = v.trim();
    let Some((local, domain)) = v.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.split('.').count() >= 2
        && domain.split('.').all(|part| !part.is_empty())
        && !v.chars().any(char::is_whitespace)
}

#[cfg(test)]
#[path = "../../tests/unit/page/contact.rs"]
mod tests;
