//! HTTP client factory.
//!
//! Builds the one `reqwest::Client` every wrapper goes through: JSON content
//! type and bearer token as default headers, the configured timeout, and a
//! cookie jar when credentials mode is on so the backend's session cookie
//! survives between calls.

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};

use super::error::ApiError;
use crate::config::ClientConfig;

const CONNECT_TIMEOUT_SECS: u64 = 5;

/// Default headers attached to every request.
///
/// # Errors
///
/// Returns an error if the API key cannot be encoded as a header value.
pub fn default_headers(config: &ClientConfig) -> Result<HeaderMap, ApiError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    let mut bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))?;
    bearer.set_sensitive(true);
    headers.insert(AUTHORIZATION, bearer);
    Ok(headers)
}

/// Build the configured transport.
///
/// # Errors
///
/// Returns an error if the headers are invalid or the TLS backend fails to
/// initialize.
pub fn build_client(config: &ClientConfig) -> Result<reqwest::Client, ApiError> {
    let connect_timeout = config
        .timeout
        .min(std::time::Duration::from_secs(CONNECT_TIMEOUT_SECS));
    reqwest::Client::builder()
        .default_headers(default_headers(config)?)
        .timeout(config.timeout)
        .connect_timeout(connect_timeout)
        .cookie_store(config.with_credentials)
        .build()
        .map_err(ApiError::ClientBuild)
}
