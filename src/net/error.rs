//! Error type shared by the HTTP factory and every API wrapper.
//!
//! Wrappers never translate or retry: whatever the transport reports is handed
//! back to the caller as one of these variants.

use super::types::ErrorBody;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The underlying HTTP client could not be constructed.
    #[error("http client build failed: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// A default header could not be encoded (e.g. a newline in the API key).
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// Connect, timeout, or body-read failure.
    #[error("http request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status. Displays the backend's
    /// `error` message when the body carries one, the raw body otherwise.
    #[error("server returned {status}: {}", status_detail(body))]
    Status { status: u16, body: String },

    /// A 2xx body did not match the expected shape.
    #[error("response decode failed: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status for `Status` errors.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The backend's `{ "error": ... }` message, when the body carries one.
    #[must_use]
    pub fn server_message(&self) -> Option<String> {
        match self {
            Self::Status { body, .. } => serde_json::from_str::<ErrorBody>(body).ok().map(|b| b.error),
            _ => None,
        }
    }

    /// 401 or 403: the request needs a logged-in (or more privileged) user.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

fn status_detail(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error,
        Err(_) => body.to_owned(),
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
