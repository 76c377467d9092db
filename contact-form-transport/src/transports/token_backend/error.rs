//! Token backend error mapping

use crate::error::TransportError;
use crate::traits::{RawApiError, TransportErrorMapper};

use super::{RATE_LIMIT_CODE, TokenBackendTransport};

/// Token backend error mapping
///
/// The backend reports business failures as `{success: false, message, error_code?}`.
/// Only the rate-limit code is structured; token trouble is recognized from the
/// message text, matching how the endpoint phrases its refusals.
impl TransportErrorMapper for TokenBackendTransport {
    fn transport_name(&self) -> &'static str {
        "token-backend"
    }

    fn map_error(&self, raw: RawApiError) -> TransportError {
        // Structured rate-limit code; the backend enforces the real window
        if raw.code.as_deref() == Some(RATE_LIMIT_CODE) {
            return TransportError::RateLimited {
                transport: self.transport_name().to_string(),
                retry_after: None,
                raw_message: Some(raw.message),
            };
        }

        // Anti-forgery refusals carry no code; the message mentions the mechanism
        let lowered = raw.message.to_lowercase();
        if lowered.contains("token") || lowered.contains("csrf") {
            return TransportError::TokenRejected {
                transport: self.transport_name().to_string(),
                raw_message: Some(raw.message),
            };
        }

        self.unknown_error(raw)
    }
}
