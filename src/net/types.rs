//! Wire DTOs for the auth and games endpoints.
//!
//! DESIGN
//! ======
//! Shapes follow the backend's JSON. Decoding is lenient: unknown fields are
//! ignored and nullable columns map to `Option`, so a backend that grows new
//! fields never breaks session bootstrap.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// USERS
// =============================================================================

/// An authenticated user as returned by `/me` and `/auth/login`.
///
/// The navigation guard only cares whether one is present.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Backend user identifier.
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub id: i64,
    /// Login name.
    pub username: String,
    /// Access role (`"user"` or `"admin"`), when the backend sends one.
    #[serde(default)]
    pub role: Option<String>,
    /// ISO 8601 creation timestamp, if known.
    #[serde(default)]
    pub created_at: Option<String>,
}

impl User {
    /// Whether the backend granted this user the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some("admin")
    }
}

/// Body of `GET /me`. `user` is `null` when no session cookie is attached.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MeResponse {
    #[serde(default)]
    pub user: Option<User>,
}

/// Username/password pair posted to `/auth/login` and `/auth/register`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Credentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Body of `POST /auth/login`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub user: Option<User>,
}

/// Generic `{ "ok": true }` acknowledgement used by logout and register.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub ok: bool,
}

/// Error body the backend attaches to non-2xx responses.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

// =============================================================================
// GAMES
// =============================================================================

/// A catalogue entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub genre: Option<String>,
    /// Link to play the game.
    #[serde(default)]
    pub url: Option<String>,
    /// Cover image.
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Score out of five.
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// One page of `GET /games`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GamePage {
    #[serde(default)]
    pub items: Vec<Game>,
    /// Number of games matching the filter, across all pages.
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub total: i64,
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub limit: i64,
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub offset: i64,
}

/// Create/update body. Absent fields are left out of the JSON so a PATCH
/// only touches what the caller set.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GamePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

impl GamePayload {
    /// True when no field is set; such a PATCH is a no-op on the backend.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Body of `DELETE /games/{id}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deleted {
    pub status: String,
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub id: i64,
}

fn deserialize_i64_from_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Ok(int);
            }
            #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
            if let Some(float) = number.as_f64()
                && float.is_finite()
                && float.fract() == 0.0
                && float >= i64::MIN as f64
                && float <= i64::MAX as f64
            {
                return Ok(float as i64);
            }
            Err(D::Error::custom("expected integer-compatible number"))
        }
        _ => Err(D::Error::custom("expected number")),
    }
}
