//! Transport 实现

pub(crate) mod common;

#[cfg(feature = "relay")]
mod relay;
#[cfg(feature = "token-backend")]
mod token_backend;

#[cfg(feature = "relay")]
pub use relay::RelayTransport;
#[cfg(feature = "token-backend")]
pub use token_backend::TokenBackendTransport;
