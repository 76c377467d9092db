use serde::{Deserialize, Serialize};

use contact_form_transport::Submission;

// ============ Form State ============

/// Form lifecycle state.
///
/// Drives the visibility of the three mutually-exclusive feedback regions and
/// the submit control. Transitions are controller-driven only; triggers never
/// run in parallel, so there is no concurrent transition to guard against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormState {
    /// Waiting for input.
    Idle,
    /// A submission is in flight; the submit control is disabled.
    Loading,
    /// The last submission was delivered.
    Success,
    /// The last submission failed (validation, transport, or server refusal).
    Error,
}

// ============ Fields ============

/// Identifies one of the four visitor-facing form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldId {
    /// Visitor name.
    Name,
    /// Reply address.
    Email,
    /// Subject line.
    Subject,
    /// Message body.
    Message,
}

impl FieldId {
    /// User-friendly label, as used in validation messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Subject => "Subject",
            Self::Message => "Message",
        }
    }

    /// Machine name matching the form markup's `name` attribute.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }

    /// All fields, in page order.
    #[must_use]
    pub fn all() -> [FieldId; 4] {
        [Self::Name, Self::Email, Self::Subject, Self::Message]
    }
}

impl std::fmt::Display for FieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Declarative constraints for one field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    /// Which field the constraints apply to.
    pub id: FieldId,
    /// Whether an empty value is rejected.
    pub required: bool,
    /// Declared maximum length, if any (characters).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_len: Option<usize>,
    /// Minimum length threshold, if any (characters).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_len: Option<usize>,
}

/// Outcome of validating a single field.
///
/// Ephemeral: recomputed on every validation trigger (blur, input, submit),
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValidationResult {
    /// Field the result applies to.
    pub field: FieldId,
    /// Whether the field passed.
    pub is_valid: bool,
    /// Message for the first failing rule, if any.
    pub error_message: Option<String>,
}

impl FieldValidationResult {
    /// A passing result.
    #[must_use]
    pub fn valid(field: FieldId) -> Self {
        Self {
            field,
            is_valid: true,
            error_message: None,
        }
    }

    /// A failing result with its message.
    #[must_use]
    pub fn invalid(field: FieldId, message: impl Into<String>) -> Self {
        Self {
            field,
            is_valid: false,
            error_message: Some(message.into()),
        }
    }
}

// ============ Values ============

/// The controller's mirror of the visitor's current field values.
///
/// Updated on every input event; raw (untrimmed) values are kept and posted,
/// trimming happens inside validation only. The `extra` pairs mirror hidden
/// honeypot/meta fields present in the markup and survive a reset.
#[derive(Debug, Clone, Default)]
pub struct FormValues {
    name: String,
    email: String,
    subject: String,
    message: String,
    extra: Vec<(String, String)>,
}

impl FormValues {
    /// Create empty values carrying the page's hidden fields.
    #[must_use]
    pub fn new(extra: Vec<(String, String)>) -> Self {
        Self {
            extra,
            ..Self::default()
        }
    }

    /// Current raw value of a field.
    #[must_use]
    pub fn value_of(&self, field: FieldId) -> &str {
        match field {
            FieldId::Name => &self.name,
            FieldId::Email => &self.email,
            FieldId::Subject => &self.subject,
            FieldId::Message => &self.message,
        }
    }

    /// Overwrite a field's value from an input event.
    pub fn set(&mut self, field: FieldId, value: String) {
        match field {
            FieldId::Name => self.name = value,
            FieldId::Email => self.email = value,
            FieldId::Subject => self.subject = value,
            FieldId::Message => self.message = value,
        }
    }

    /// Clear the four visitor fields; hidden fields stay.
    pub fn reset(&mut self) {
        self.name.clear();
        self.email.clear();
        self.subject.clear();
        self.message.clear();
    }

    /// Build the outgoing submission.
    #[must_use]
    pub fn to_submission(&self) -> Submission {
        Submission {
            name: self.name.clone(),
            email: self.email.clone(),
            subject: self.subject.clone(),
            message: self.message.clone(),
            extra: self.extra.clone(),
        }
    }
}
