//! Auth actions that keep the session store in step with the backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by the login/register screens and the CLI. The navigation guard only
//! ever reads the store, so these are the only writers besides the initial
//! session load.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use super::session::SessionStore;
use crate::net::api::ApiClient;
use crate::net::error::ApiError;
use crate::net::types::{Ack, LoginResponse};

/// Log in and, on success, make the returned user the session user.
///
/// # Errors
///
/// Returns the API error unchanged; the session is untouched on failure.
pub async fn login(api: &ApiClient, session: &SessionStore, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
    let response = api.login(username, password).await?;
    if response.ok {
        tracing::info!(username, "logged in");
        session.set_user(response.user.clone());
    }
    Ok(response)
}

/// Log out and drop the session user.
///
/// # Errors
///
/// Returns the API error unchanged; the session user is kept on failure.
pub async fn logout(api: &ApiClient, session: &SessionStore) -> Result<Ack, ApiError> {
    let ack = api.logout().await?;
    tracing::info!("logged out");
    session.clear_user();
    Ok(ack)
}

/// Create an account. The backend does not start a session on register, so
/// the store is left alone; callers log in afterwards.
///
/// # Errors
///
/// Returns the API error unchanged.
pub async fn register(api: &ApiClient, username: &str, password: &str) -> Result<Ack, ApiError> {
    let ack = api.register(username, password).await?;
    tracing::info!(username, "registered");
    Ok(ack)
}
