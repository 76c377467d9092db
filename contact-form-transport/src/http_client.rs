//! Generic HTTP client tools
//!
//! Provide reusable HTTP request processing logic shared by both transports.
//! Each transport keeps full control over its request shape (headers, body)
//! and constructs the `RequestBuilder` by itself.
//!
//! # design principles
//! - **Does not enforce a unified body format** - the token backend and the
//!   relay speak different response dialects
//! - **Unified and universal HTTP processing flow** - sending requests,
//!   logging, and reading responses
//! - **No automatic retries** - one submission maps to exactly one request;
//!   recovery is the caller's decision

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::TransportError;
use crate::utils::log_sanitizer::truncate_for_log;

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns response text
    ///
    /// Unified processing: sending requests, logging, error handling
    ///
    /// # Arguments
    /// * `request_builder` - configured request constructor (including URL, headers, body, etc.)
    /// * `transport_name` - transport name (for logging)
    /// * `method_name` - request method name (such as "GET", "POST", used for logs)
    /// * `url_or_action` - URL or action name (for logging)
    ///
    /// # Returns
    /// * `Ok((status_code, response_text))` - returns status code and response text on success
    /// * `Err(TransportError::NetworkError)` - network error
    pub async fn execute_request(
        request_builder: RequestBuilder,
        transport_name: &str,
        method_name: &str,
        url_or_action: &str,
    ) -> Result<(u16, String), TransportError> {
        log::debug!("[{transport_name}] {method_name} {url_or_action}");

        // Send request
        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout {
                    transport: transport_name.to_string(),
                    detail: e.to_string(),
                }
            } else {
                TransportError::NetworkError {
                    transport: transport_name.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("[{transport_name}] Response Status: {status_code}");

        // Extract Retry-After header (before consuming response body)
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        // Returns RateLimited error for HTTP 429
        if status_code == 429 {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{transport_name}] Rate limited (HTTP 429), retry_after={retry_after:?}");
            return Err(TransportError::RateLimited {
                transport: transport_name.to_string(),
                retry_after,
                raw_message: Some(body),
            });
        }

        // Return NetworkError for 502/503/504 (gateway trouble, not a business refusal)
        if matches!(status_code, 502..=504) {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{transport_name}] Server error (HTTP {status_code})");
            return Err(TransportError::NetworkError {
                transport: transport_name.to_string(),
                detail: format!("HTTP {status_code}: {body}"),
            });
        }

        // Read response body
        let response_text = response
            .text()
            .await
            .map_err(|e| TransportError::NetworkError {
                transport: transport_name.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!(
            "[{transport_name}] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok((status_code, response_text))
    }

    /// Parse JSON response
    ///
    /// # Type Parameters
    /// * `T` - target type
    ///
    /// # Arguments
    /// * `response_text` - JSON text
    /// * `transport_name` - transport name (used for error messages)
    ///
    /// # Returns
    /// * `Ok(T)` - successfully parsed
    /// * `Err(TransportError::ParseError)` - parsing failed
    pub fn parse_json<T>(response_text: &str, transport_name: &str) -> Result<T, TransportError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{transport_name}] JSON parse failed: {e}");
            log::error!(
                "[{transport_name}] Raw response: {}",
                truncate_for_log(response_text)
            );
            TransportError::ParseError {
                transport: transport_name.to_string(),
                detail: e.to_string(),
            }
        })
    }
}
