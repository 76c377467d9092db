//! Transport factory functions and metadata.

use std::sync::Arc;

use crate::traits::MailTransport;
use crate::types::{TransportConfig, TransportMetadata};

#[cfg(feature = "relay")]
use crate::transports::RelayTransport;
#[cfg(feature = "token-backend")]
use crate::transports::TokenBackendTransport;

/// Creates a [`MailTransport`] instance from the given configuration.
///
/// The concrete transport type is determined by the [`TransportConfig`] variant.
/// The returned transport is wrapped in `Arc<dyn MailTransport>` for easy sharing
/// with timer tasks and event handlers.
///
/// # Examples
///
/// ```rust,no_run
/// use contact_form_transport::{TransportConfig, create_transport};
///
/// let transport = create_transport(TransportConfig::TokenBackend {
///     endpoint: "forms/contact.php".to_string(),
/// });
/// ```
#[must_use]
pub fn create_transport(config: TransportConfig) -> Arc<dyn MailTransport> {
    match config {
        #[cfg(feature = "token-backend")]
        TransportConfig::TokenBackend { endpoint } => {
            Arc::new(TokenBackendTransport::new(endpoint))
        }
        #[cfg(feature = "relay")]
        TransportConfig::Relay {
            endpoint,
            subject_prefix,
        } => Arc::new(RelayTransport::new(endpoint, subject_prefix)),
    }
}

/// Returns metadata for all transports enabled via feature flags.
///
/// Useful for building dynamic UIs that enumerate available delivery paths
/// and their required configuration fields.
pub fn get_all_transport_metadata() -> Vec<TransportMetadata> {
    vec![
        #[cfg(feature = "token-backend")]
        TokenBackendTransport::metadata(),
        #[cfg(feature = "relay")]
        RelayTransport::metadata(),
    ]
}
