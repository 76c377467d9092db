//! # contact-form-transport
//!
//! A unified mail delivery abstraction for website contact forms, covering
//! both deployment variants a page may ship with.
//!
//! ## Supported Transports
//!
//! | Transport | Feature Flag | Delivery Path |
//! |-----------|-------------|---------------|
//! | First-party backend | `token-backend` | Anti-forgery-token-protected endpoint, JSON envelope |
//! | Form relay | `relay` | Third-party mail-forwarding service, HTTP-status semantics |
//!
//! ## Feature Flags
//!
//! ### Transport Selection
//!
//! - **`all-transports`** *(default)* — Enable both transports listed above.
//! - **`token-backend`** — Enable only the token-protected first-party transport.
//! - **`relay`** — Enable only the third-party relay transport.
//!
//! ### TLS Backend
//!
//! - **`native-tls`** *(default)* — Use the platform's native TLS implementation.
//! - **`rustls`** — Use rustls. Recommended for cross-compilation.
//!
//! ## Quick Start
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! contact-form-transport = { version = "0.1", features = ["all-transports"] }
//! ```
//!
//! Or enable only the transport your deployment uses:
//!
//! ```toml
//! [dependencies]
//! contact-form-transport = { version = "0.1", default-features = false, features = ["relay", "rustls"] }
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use contact_form_transport::{Submission, TransportConfig, create_transport};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Create a transport from the page's deployment config
//!     let transport = create_transport(TransportConfig::TokenBackend {
//!         endpoint: "https://example.com/forms/contact.php".to_string(),
//!     });
//!
//!     // 2. Prepare (prefetches the anti-forgery token; no-op for the relay)
//!     transport.prepare().await?;
//!
//!     // 3. Deliver a submission
//!     let receipt = transport
//!         .submit(&Submission {
//!             name: "Jane Doe".to_string(),
//!             email: "jane@example.com".to_string(),
//!             subject: "Print inquiry".to_string(),
//!             message: "Hello! I'd like to ask about...".to_string(),
//!             extra: Vec::new(),
//!         })
//!         .await?;
//!     println!("delivered: {:?}", receipt.message);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All transport operations return [`Result<T, TransportError>`](TransportError).
//! The error enum provides structured variants for the failure modes the form
//! workflow reacts to:
//!
//! - [`TransportError::RateLimited`] — submission limit hit; the caller enters a cooldown
//! - [`TransportError::TokenRejected`] — anti-forgery token refused; a fresh one is fetched
//! - [`TransportError::FieldsRejected`] — the relay rejected specific fields
//! - [`TransportError::NetworkError`] / [`TransportError::Timeout`] — connectivity trouble
//!
//! Transports never retry on their own: a submission maps to exactly one network
//! request, and the workflow decides how to recover.

mod error;
mod factory;
mod http_client;
mod traits;
mod transports;
mod types;
mod utils;

// Re-export error types
pub use error::{Result, TransportError};

// Re-export factory functions
pub use factory::{create_transport, get_all_transport_metadata};

// Re-export core trait only (internal traits are not exported)
pub use traits::MailTransport;

// Re-export types
pub use types::{
    DeliveryReceipt, FieldType, Submission, TransportConfig, TransportConfigField, TransportKind,
    TransportMetadata,
};

// Re-export concrete transports (behind feature flags)
#[cfg(feature = "relay")]
pub use transports::RelayTransport;

#[cfg(feature = "token-backend")]
pub use transports::TokenBackendTransport;
