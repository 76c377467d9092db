use serde::{Deserialize, Serialize};

// ============ Submission ============

/// A contact form submission as entered by the visitor.
///
/// Field values are carried verbatim; validation and trimming are the
/// caller's concern. The `extra` list holds hidden honeypot/meta fields
/// copied from the form markup, appended to the outgoing body unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    /// Visitor name.
    pub name: String,
    /// Visitor reply address.
    pub email: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub message: String,
    /// Hidden honeypot/meta fields, `(field name, value)` pairs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<(String, String)>,
}

/// Server acknowledgment of a delivered submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryReceipt {
    /// Server-supplied confirmation message, if the backend returns one.
    ///
    /// The token backend returns one; the relay acknowledges by HTTP status only.
    pub message: Option<String>,
}

// ============ Transport Types ============

/// Identifies which mail transport implementation to use.
///
/// Each variant is gated behind its corresponding feature flag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TransportKind {
    /// Token-protected first-party backend. Requires feature `token-backend`.
    #[cfg(feature = "token-backend")]
    TokenBackend,
    /// Third-party form relay. Requires feature `relay`.
    #[cfg(feature = "relay")]
    Relay,
}

impl std::fmt::Display for TransportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(feature = "token-backend")]
            Self::TokenBackend => write!(f, "token-backend"),
            #[cfg(feature = "relay")]
            Self::Relay => write!(f, "relay"),
        }
    }
}

/// Deployment configuration selecting and parameterizing a transport.
///
/// The two variants are mutually exclusive per page: a form either posts to
/// the token-protected first-party endpoint or straight to a relay service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TransportConfig {
    /// Token-protected first-party endpoint (e.g. `forms/contact.php`).
    #[cfg(feature = "token-backend")]
    #[serde(rename_all = "camelCase")]
    TokenBackend {
        /// Endpoint URL; also serves the anti-forgery token via a query flag.
        endpoint: String,
    },
    /// Third-party form relay endpoint (taken from the form's action URL).
    #[cfg(feature = "relay")]
    #[serde(rename_all = "camelCase")]
    Relay {
        /// Relay URL the form posts to.
        endpoint: String,
        /// Prefix for the synthesized `_subject` field, prepended to the
        /// visitor's subject line.
        subject_prefix: String,
    },
}

// ============ Metadata ============

/// Input widget type for a transport config field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Free-form text.
    Text,
    /// A URL.
    Url,
}

/// Describes one configuration field a transport requires.
///
/// Used by dynamic UIs to render setup forms without hard-coding per-transport
/// knowledge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportConfigField {
    /// Machine name matching the [`TransportConfig`] field.
    pub name: String,
    /// Human-readable label.
    pub label: String,
    /// Widget type.
    pub field_type: FieldType,
    /// Whether the field must be filled in.
    pub required: bool,
}

/// Type-level metadata for a transport implementation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportMetadata {
    /// Transport kind.
    pub kind: TransportKind,
    /// Human-readable name.
    pub display_name: String,
    /// Short description of the delivery path.
    pub description: String,
    /// Configuration fields the transport requires.
    pub config_fields: Vec<TransportConfigField>,
}
