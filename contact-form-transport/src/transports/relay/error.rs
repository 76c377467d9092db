//! Relay error mapping

use crate::error::TransportError;
use crate::traits::{RawApiError, TransportErrorMapper};

use super::RelayTransport;
use super::types::RelayFieldError;

impl RelayTransport {
    /// 将结构化错误条目映射为 `FieldsRejected`
    pub(crate) fn fields_rejected(&self, errors: &[RelayFieldError]) -> TransportError {
        TransportError::FieldsRejected {
            transport: self.transport_name().to_string(),
            errors: errors.iter().map(RelayFieldError::describe).collect(),
        }
    }
}

/// Relay error mapping
///
/// The relay has no business error codes of its own; HTTP 429 and gateway
/// errors are already mapped by `HttpUtils`, and the structured `{errors}`
/// body is handled before mapping. Everything else stays an unknown refusal
/// keyed by HTTP status.
impl TransportErrorMapper for RelayTransport {
    fn transport_name(&self) -> &'static str {
        "relay"
    }

    fn map_error(&self, raw: RawApiError) -> TransportError {
        self.unknown_error(raw)
    }
}
