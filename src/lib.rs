//! # gamedeck
//!
//! Client for the game catalogue backend: typed wrappers for the auth and
//! games endpoints, a session store that loads the current user once, and a
//! router whose navigation guard redirects based on that session.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use gamedeck::config::ClientConfig;
//! use gamedeck::net::api::ApiClient;
//! use gamedeck::router::Router;
//! use gamedeck::state::session::SessionStore;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let api = ApiClient::new(ClientConfig::from_env()?)?;
//! let session = Arc::new(SessionStore::new(Arc::new(api.clone())));
//! let router = Router::app(session);
//! let nav = router.navigate("/games").await?;
//! println!("landed on {}", nav.path);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod net;
pub mod router;
pub mod state;

#[cfg(test)]
mod test_support;
