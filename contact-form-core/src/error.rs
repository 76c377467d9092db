//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use contact_form_transport::TransportError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Unknown form field referenced by a dispatch call
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// Storage layer error (client-local history store)
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Transport error (converted from library)
    #[error("{0}")]
    Transport(#[from] TransportError),
}

impl CoreError {
    /// Whether it is expected behavior (user input, token churn, etc.), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_expected(),
            _ => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
