//! Client configuration parsed from environment variables.
//!
//! Variables:
//! - `GAMEDECK_API_BASE`: API base URL (default `http://127.0.0.1:5000/api`)
//! - `GAMEDECK_API_KEY`: bearer token (default `dev-123`)
//! - `GAMEDECK_WITH_CREDENTIALS`: keep and forward session cookies (default `true`)
//! - `GAMEDECK_TIMEOUT_MS`: per-request timeout (default `10000`)

use std::time::Duration;

pub const ENV_API_BASE: &str = "GAMEDECK_API_BASE";
pub const ENV_API_KEY: &str = "GAMEDECK_API_KEY";
pub const ENV_WITH_CREDENTIALS: &str = "GAMEDECK_WITH_CREDENTIALS";
pub const ENV_TIMEOUT_MS: &str = "GAMEDECK_TIMEOUT_MS";

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:5000/api";
pub const DEFAULT_API_KEY: &str = "dev-123";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Errors produced while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set but its value could not be parsed.
    #[error("invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },
}

/// Transport settings shared by every API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL without a trailing slash; endpoint paths are appended to it.
    pub api_base: String,
    /// Sent as `Authorization: Bearer <api_key>` on every request.
    pub api_key: String,
    /// When set, the client keeps a cookie jar so the session cookie set by
    /// `/auth/login` is forwarded on later requests.
    pub with_credentials: bool,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_owned(),
            api_key: DEFAULT_API_KEY.to_owned(),
            with_credentials: true,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl ClientConfig {
    /// Build typed config from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build typed config from an arbitrary key lookup.
    ///
    /// Empty values count as unset, so an exported-but-blank `GAMEDECK_API_KEY`
    /// still falls back to the development key.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparseable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_base = normalize_base_url(get(ENV_API_BASE).as_deref().unwrap_or(DEFAULT_API_BASE));
        let api_key = get(ENV_API_KEY).unwrap_or_else(|| DEFAULT_API_KEY.to_owned());
        let with_credentials = match get(ENV_WITH_CREDENTIALS) {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::InvalidValue { var: ENV_WITH_CREDENTIALS, value: raw })?,
            None => true,
        };
        let timeout_ms = match get(ENV_TIMEOUT_MS) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue { var: ENV_TIMEOUT_MS, value: raw })?,
            None => DEFAULT_TIMEOUT_MS,
        };

        Ok(Self { api_base, api_key, with_credentials, timeout: Duration::from_millis(timeout_ms) })
    }

    /// Join an endpoint path (`/games`) onto the base URL.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }
}

#[must_use]
pub fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
