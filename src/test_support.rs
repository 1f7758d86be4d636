//! Shared fakes for unit tests: a scripted `/me` source and an in-process
//! axum stand-in for the backend.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Json, Response};
use serde_json::Value;

use crate::config::ClientConfig;
use crate::net::api::ApiClient;
use crate::net::error::ApiError;
use crate::net::types::{MeResponse, User};
use crate::state::session::CurrentUserSource;

// =============================================================================
// SCRIPTED SOURCE
// =============================================================================

#[must_use]
pub fn user(name: &str) -> User {
    User { id: 1, username: name.to_owned(), role: Some("user".to_owned()), created_at: None }
}

#[must_use]
pub fn server_error() -> ApiError {
    ApiError::Status { status: 500, body: r#"{"error":"boom"}"#.to_owned() }
}

/// Replays queued `/me` outcomes in order; once the queue is empty every call
/// answers "nobody logged in". Each call can be held open for `delay`.
pub struct ScriptedSource {
    calls: AtomicUsize,
    replies: Mutex<VecDeque<Result<MeResponse, ApiError>>>,
    delay: Duration,
}

impl ScriptedSource {
    #[must_use]
    pub fn new(replies: Vec<Result<MeResponse, ApiError>>) -> Arc<Self> {
        Self::with_delay(replies, Duration::ZERO)
    }

    #[must_use]
    pub fn with_delay(replies: Vec<Result<MeResponse, ApiError>>, delay: Duration) -> Arc<Self> {
        Arc::new(Self { calls: AtomicUsize::new(0), replies: Mutex::new(replies.into()), delay })
    }

    #[must_use]
    pub fn logged_in(name: &str) -> Arc<Self> {
        Self::new(vec![Ok(MeResponse { user: Some(user(name)) })])
    }

    #[must_use]
    pub fn anonymous() -> Arc<Self> {
        Self::new(vec![Ok(MeResponse::default())])
    }

    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl CurrentUserSource for ScriptedSource {
    async fn fetch_current_user(&self) -> Result<MeResponse, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(MeResponse::default()))
    }
}

// =============================================================================
// STUB BACKEND
// =============================================================================

/// One request as the stub backend saw it.
#[derive(Clone, Debug)]
pub struct Seen {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub cookie: Option<String>,
    pub body: String,
}

pub type Log = Arc<Mutex<Vec<Seen>>>;

fn game_json(id: i64, title: &str) -> Value {
    serde_json::json!({ "id": id, "title": title, "genre": null, "rating": 4.0 })
}

fn user_json() -> Value {
    serde_json::json!({ "id": 1, "username": "ana", "role": "user" })
}

async fn backend(State(log): State<Log>, method: Method, uri: Uri, headers: HeaderMap, body: String) -> Response {
    let header_str =
        |name: header::HeaderName| headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_owned);
    let cookie = header_str(header::COOKIE);
    log.lock().unwrap().push(Seen {
        method: method.to_string(),
        path: uri.path().to_owned(),
        query: uri.query().map(str::to_owned),
        authorization: header_str(header::AUTHORIZATION),
        cookie: cookie.clone(),
        body,
    });

    let logged_in = cookie.is_some_and(|c| c.contains("session=abc"));
    match (method.as_str(), uri.path()) {
        ("GET", "/api/me") if logged_in => Json(serde_json::json!({ "user": user_json() })).into_response(),
        ("GET", "/api/me") => Json(serde_json::json!({ "user": null })).into_response(),
        ("POST", "/api/auth/login") => (
            [(header::SET_COOKIE, "session=abc; Path=/")],
            Json(serde_json::json!({ "ok": true, "user": user_json() })),
        )
            .into_response(),
        ("POST", "/api/auth/logout") => (
            [(header::SET_COOKIE, "session=; Path=/; Max-Age=0")],
            Json(serde_json::json!({ "ok": true })),
        )
            .into_response(),
        ("POST", "/api/auth/register") => Json(serde_json::json!({ "ok": true })).into_response(),
        ("GET", "/api/games") => Json(serde_json::json!({
            "items": [game_json(1, "Tetris")],
            "total": 1,
            "limit": 50,
            "offset": 0
        }))
        .into_response(),
        ("POST", "/api/games") => (StatusCode::CREATED, Json(game_json(2, "Doom"))).into_response(),
        ("PATCH", "/api/games/2") => Json(game_json(2, "Doom II")).into_response(),
        ("DELETE", "/api/games/2") => Json(serde_json::json!({ "status": "deleted", "id": 2 })).into_response(),
        ("GET", "/api/games/404") => {
            (StatusCode::NOT_FOUND, Json(serde_json::json!({ "error": "Game not found" }))).into_response()
        }
        ("GET", "/api/games/garbled") => "not json".into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Start the stub on an ephemeral port and return a client pointed at it.
pub async fn spawn_backend() -> (ApiClient, Log) {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let app = axum::Router::new().fallback(backend).with_state(log.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = ClientConfig { api_base: format!("http://{addr}/api"), ..ClientConfig::default() };
    (ApiClient::new(config).unwrap(), log)
}

#[must_use]
pub fn last(log: &Log) -> Seen {
    log.lock().unwrap().last().cloned().unwrap()
}
