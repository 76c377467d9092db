use serde::{Deserialize, Serialize};

/// Unified error type for all mail transport operations.
///
/// Each variant includes a `transport` field identifying which transport produced
/// the error, plus variant-specific context. All variants are serializable for
/// structured error reporting.
///
/// # Transient Errors
///
/// The following variants represent transient failures that may succeed if the
/// user simply submits again:
/// - [`NetworkError`](Self::NetworkError) — network connectivity issues
/// - [`Timeout`](Self::Timeout) — request timed out
/// - [`RateLimited`](Self::RateLimited) — submission rate limit exceeded
///
/// Transports never retry on their own; a submission maps to exactly one
/// network request, and recovery is the caller's decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum TransportError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    NetworkError {
        /// Transport that produced the error.
        transport: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Transport that produced the error.
        transport: String,
        /// Error details.
        detail: String,
    },

    /// The submission rate limit has been exceeded (HTTP 429 or a business-level
    /// rate-limit code from the backend).
    ///
    /// The request should succeed again after waiting.
    RateLimited {
        /// Transport that produced the error.
        transport: String,
        /// Suggested wait time in seconds before retrying, if provided by the server.
        retry_after: Option<u64>,
        /// Original error message from the server, if available.
        raw_message: Option<String>,
    },

    /// The anti-forgery token was missing, expired, or rejected by the backend.
    ///
    /// The transport invalidates its cached token when producing this error, so
    /// the next submission starts from a fresh token.
    TokenRejected {
        /// Transport that produced the error.
        transport: String,
        /// Original error message from the server, if available.
        raw_message: Option<String>,
    },

    /// The server rejected one or more submitted fields.
    FieldsRejected {
        /// Transport that produced the error.
        transport: String,
        /// Human-readable per-field error descriptions, best-effort.
        errors: Vec<String>,
    },

    /// Failed to parse the server's response body.
    ParseError {
        /// Transport that produced the error.
        transport: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body.
    SerializationError {
        /// Transport that produced the error.
        transport: String,
        /// Details about the serialization failure.
        detail: String,
    },

    /// An unrecognized refusal from the server.
    ///
    /// This is the catch-all for business failures without a mapped code; the
    /// server-supplied message (when present) is still worth showing to the user.
    Unknown {
        /// Transport that produced the error.
        transport: String,
        /// Raw error code or HTTP status from the server, if available.
        raw_code: Option<String>,
        /// Raw error message from the server.
        raw_message: String,
    },
}

impl TransportError {
    /// 是否为预期行为（用户输入、令牌过期等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::TokenRejected { .. } | Self::FieldsRejected { .. }
        )
    }

    /// Server-supplied message suitable for direct display, if the server sent one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::RateLimited { raw_message, .. } | Self::TokenRejected { raw_message, .. } => {
                raw_message.as_deref()
            }
            Self::Unknown { raw_message, .. } => Some(raw_message),
            _ => None,
        }
    }
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { transport, detail } => {
                write!(f, "[{transport}] Network error: {detail}")
            }
            Self::Timeout { transport, detail } => {
                write!(f, "[{transport}] Request timeout: {detail}")
            }
            Self::RateLimited {
                transport,
                retry_after,
                ..
            } => {
                if let Some(secs) = retry_after {
                    write!(f, "[{transport}] Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "[{transport}] Rate limited")
                }
            }
            Self::TokenRejected {
                transport,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{transport}] Anti-forgery token rejected: {msg}")
                } else {
                    write!(f, "[{transport}] Anti-forgery token rejected")
                }
            }
            Self::FieldsRejected { transport, errors } => {
                write!(f, "[{transport}] Fields rejected: {}", errors.join("; "))
            }
            Self::ParseError { transport, detail } => {
                write!(f, "[{transport}] Parse error: {detail}")
            }
            Self::SerializationError { transport, detail } => {
                write!(f, "[{transport}] Serialization error: {detail}")
            }
            Self::Unknown {
                transport,
                raw_message,
                ..
            } => {
                write!(f, "[{transport}] {raw_message}")
            }
        }
    }
}

impl std::error::Error for TransportError {}

/// Convenience type alias for `Result<T, TransportError>`.
pub type Result<T> = std::result::Result<T, TransportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_network_error() {
        let e = TransportError::NetworkError {
            transport: "test".to_string(),
            detail: "connection refused".to_string(),
        };
        assert_eq!(e.to_string(), "[test] Network error: connection refused");
    }

    #[test]
    fn display_timeout() {
        let e = TransportError::Timeout {
            transport: "test".to_string(),
            detail: "30s elapsed".to_string(),
        };
        assert_eq!(e.to_string(), "[test] Request timeout: 30s elapsed");
    }

    #[test]
    fn display_rate_limited_with_retry() {
        let e = TransportError::RateLimited {
            transport: "token-backend".to_string(),
            retry_after: Some(60),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "[token-backend] Rate limited (retry after 60s)");
    }

    #[test]
    fn display_rate_limited_without_retry() {
        let e = TransportError::RateLimited {
            transport: "relay".to_string(),
            retry_after: None,
            raw_message: None,
        };
        assert_eq!(e.to_string(), "[relay] Rate limited");
    }

    #[test]
    fn display_token_rejected_with_message() {
        let e = TransportError::TokenRejected {
            transport: "token-backend".to_string(),
            raw_message: Some("CSRF token expired".to_string()),
        };
        assert_eq!(
            e.to_string(),
            "[token-backend] Anti-forgery token rejected: CSRF token expired"
        );
    }

    #[test]
    fn display_token_rejected_without_message() {
        let e = TransportError::TokenRejected {
            transport: "token-backend".to_string(),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "[token-backend] Anti-forgery token rejected");
    }

    #[test]
    fn display_fields_rejected() {
        let e = TransportError::FieldsRejected {
            transport: "relay".to_string(),
            errors: vec!["email: invalid".to_string(), "message: empty".to_string()],
        };
        assert_eq!(
            e.to_string(),
            "[relay] Fields rejected: email: invalid; message: empty"
        );
    }

    #[test]
    fn display_parse_error() {
        let e = TransportError::ParseError {
            transport: "test".to_string(),
            detail: "bad json".to_string(),
        };
        assert_eq!(e.to_string(), "[test] Parse error: bad json");
    }

    #[test]
    fn display_serialization_error() {
        let e = TransportError::SerializationError {
            transport: "test".to_string(),
            detail: "failed".to_string(),
        };
        assert_eq!(e.to_string(), "[test] Serialization error: failed");
    }

    #[test]
    fn display_unknown() {
        let e = TransportError::Unknown {
            transport: "test".to_string(),
            raw_code: Some("E001".to_string()),
            raw_message: "something broke".to_string(),
        };
        assert_eq!(e.to_string(), "[test] something broke");
    }

    #[test]
    fn server_message_from_unknown() {
        let e = TransportError::Unknown {
            transport: "test".to_string(),
            raw_code: None,
            raw_message: "Spam detected".to_string(),
        };
        assert_eq!(e.server_message(), Some("Spam detected"));
    }

    #[test]
    fn server_message_from_rate_limited() {
        let e = TransportError::RateLimited {
            transport: "test".to_string(),
            retry_after: Some(30),
            raw_message: Some("Too many requests".to_string()),
        };
        assert_eq!(e.server_message(), Some("Too many requests"));
    }

    #[test]
    fn server_message_absent_for_network_error() {
        let e = TransportError::NetworkError {
            transport: "test".to_string(),
            detail: "refused".to_string(),
        };
        assert_eq!(e.server_message(), None);
    }

    #[test]
    fn expected_variants() {
        assert!(
            TransportError::TokenRejected {
                transport: "t".into(),
                raw_message: None,
            }
            .is_expected()
        );
        assert!(
            TransportError::FieldsRejected {
                transport: "t".into(),
                errors: vec![],
            }
            .is_expected()
        );
        assert!(
            !TransportError::NetworkError {
                transport: "t".into(),
                detail: "x".into(),
            }
            .is_expected()
        );
        assert!(
            !TransportError::RateLimited {
                transport: "t".into(),
                retry_after: None,
                raw_message: None,
            }
            .is_expected()
        );
    }

    #[test]
    fn serialize_json_round_trip() {
        let e = TransportError::RateLimited {
            transport: "token-backend".to_string(),
            retry_after: Some(60),
            raw_message: Some("too many requests".to_string()),
        };
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("\"code\":\"RateLimited\""));
        assert!(json.contains("\"retry_after\":60"));
    }

    #[test]
    fn deserialize_all_variants() {
        let variants: Vec<TransportError> = vec![
            TransportError::NetworkError {
                transport: "t".into(),
                detail: "d".into(),
            },
            TransportError::Timeout {
                transport: "t".into(),
                detail: "30s".into(),
            },
            TransportError::RateLimited {
                transport: "t".into(),
                retry_after: Some(30),
                raw_message: None,
            },
            TransportError::TokenRejected {
                transport: "t".into(),
                raw_message: None,
            },
            TransportError::FieldsRejected {
                transport: "t".into(),
                errors: vec!["email: invalid".into()],
            },
            TransportError::ParseError {
                transport: "t".into(),
                detail: "bad".into(),
            },
            TransportError::SerializationError {
                transport: "t".into(),
                detail: "fail".into(),
            },
            TransportError::Unknown {
                transport: "t".into(),
                raw_code: Some("500".into()),
                raw_message: "oops".into(),
            },
        ];

        for v in &variants {
            let json = serde_json::to_string(v).unwrap();
            let back: TransportError = serde_json::from_str(&json).unwrap();
            assert_eq!(back.to_string(), v.to_string());
        }
    }
}
