//! REST wrappers for the auth and games endpoints.
//!
//! Each operation is split in two: a pure `*_request` builder that decides
//! method, path, query and body, and [`ApiClient::execute`] which sends it and
//! decodes the JSON reply. The builders carry all per-operation behavior, so
//! they are what the unit tests pin down.
//!
//! ERROR HANDLING
//! ==============
//! No retries, no caching, no translation. Non-2xx replies come back as
//! [`ApiError::Status`] with the raw body attached.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;
use super::http::build_client;
use super::types::{Ack, Credentials, Deleted, Game, GamePage, GamePayload, LoginResponse, MeResponse};
use crate::config::ClientConfig;
use crate::state::session::CurrentUserSource;

pub const DEFAULT_LIST_QUERY: &str = "";
pub const DEFAULT_LIST_LIMIT: u32 = 50;
pub const DEFAULT_LIST_OFFSET: u32 = 0;

// =============================================================================
// REQUEST DESCRIPTIONS
// =============================================================================

/// One HTTP call, fully described but not yet sent.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the API base, always starting with `/`.
    pub path: String,
    pub query: Vec<(&'static str, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), query: Vec::new(), body: None }
    }

    fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Filter and paging options for [`list_games_request`]. Omitted fields take
/// the backend-facing defaults: empty search, 50 items, offset 0.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListGamesQuery {
    pub q: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl ListGamesQuery {
    fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("q", self.q.clone().unwrap_or_else(|| DEFAULT_LIST_QUERY.to_owned())),
            ("limit", self.limit.unwrap_or(DEFAULT_LIST_LIMIT).to_string()),
            ("offset", self.offset.unwrap_or(DEFAULT_LIST_OFFSET).to_string()),
        ]
    }
}

fn game_path(id: i64) -> String {
    format!("/games/{id}")
}

fn to_body<T: serde::Serialize>(value: &T) -> Value {
    // Serializing plain DTOs into a `Value` cannot fail.
    serde_json::to_value(value).unwrap_or(Value::Null)
}

#[must_use]
pub fn me_request() -> ApiRequest {
    ApiRequest::new(Method::GET, "/me")
}

#[must_use]
pub fn login_request(username: &str, password: &str) -> ApiRequest {
    ApiRequest::new(Method::POST, "/auth/login").with_body(to_body(&Credentials { username, password }))
}

#[must_use]
pub fn logout_request() -> ApiRequest {
    ApiRequest::new(Method::POST, "/auth/logout")
}

#[must_use]
pub fn register_request(username: &str, password: &str) -> ApiRequest {
    ApiRequest::new(Method::POST, "/auth/register").with_body(to_body(&Credentials { username, password }))
}

#[must_use]
pub fn list_games_request(query: &ListGamesQuery) -> ApiRequest {
    let mut request = ApiRequest::new(Method::GET, "/games");
    request.query = query.params();
    request
}

#[must_use]
pub fn get_game_request(id: i64) -> ApiRequest {
    ApiRequest::new(Method::GET, game_path(id))
}

#[must_use]
pub fn create_game_request(payload: &GamePayload) -> ApiRequest {
    ApiRequest::new(Method::POST, "/games").with_body(to_body(payload))
}

#[must_use]
pub fn update_game_request(id: i64, payload: &GamePayload) -> ApiRequest {
    ApiRequest::new(Method::PATCH, game_path(id)).with_body(to_body(payload))
}

#[must_use]
pub fn delete_game_request(id: i64) -> ApiRequest {
    ApiRequest::new(Method::DELETE, game_path(id))
}

// =============================================================================
// CLIENT
// =============================================================================

/// Thin async client over the configured transport.
///
/// Cloning is cheap and clones share the cookie jar.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl ApiClient {
    /// Build a client and its transport from config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let http = build_client(&config)?;
        Ok(Self { http, config })
    }

    /// Send a request and decode the JSON reply into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when the request cannot be completed,
    /// [`ApiError::Status`] on a non-2xx reply, and [`ApiError::Decode`] when
    /// the body does not match `T`.
    pub async fn execute<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let url = self.config.endpoint(&request.path);
        tracing::debug!(method = %request.method, path = %request.path, "api request");

        let mut builder = self.http.request(request.method.clone(), &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::debug!(method = %request.method, path = %request.path, status = status.as_u16(), "api error status");
            return Err(ApiError::Status { status: status.as_u16(), body: text });
        }

        Ok(serde_json::from_str(&text)?)
    }

    /// `GET /me`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn me(&self) -> Result<MeResponse, ApiError> {
        self.execute(me_request()).await
    }

    /// `POST /auth/login`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        self.execute(login_request(username, password)).await
    }

    /// `POST /auth/logout`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn logout(&self) -> Result<Ack, ApiError> {
        self.execute(logout_request()).await
    }

    /// `POST /auth/register`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn register(&self, username: &str, password: &str) -> Result<Ack, ApiError> {
        self.execute(register_request(username, password)).await
    }

    /// `GET /games?q=&limit=&offset=`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn list_games(&self, query: &ListGamesQuery) -> Result<GamePage, ApiError> {
        self.execute(list_games_request(query)).await
    }

    /// `GET /games/{id}`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn get_game(&self, id: i64) -> Result<Game, ApiError> {
        self.execute(get_game_request(id)).await
    }

    /// `POST /games`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn create_game(&self, payload: &GamePayload) -> Result<Game, ApiError> {
        self.execute(create_game_request(payload)).await
    }

    /// `PATCH /games/{id}`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn update_game(&self, id: i64, payload: &GamePayload) -> Result<Game, ApiError> {
        self.execute(update_game_request(id, payload)).await
    }

    /// `DELETE /games/{id}`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn delete_game(&self, id: i64) -> Result<Deleted, ApiError> {
        self.execute(delete_game_request(id)).await
    }
}

#[async_trait::async_trait]
impl CurrentUserSource for ApiClient {
    async fn fetch_current_user(&self) -> Result<MeResponse, ApiError> {
        self.me().await
    }
}
