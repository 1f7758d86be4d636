//! Session store: who is logged in, and whether we have asked yet.
//!
//! SYSTEM CONTEXT
//! ==============
//! Created once at startup and shared (`Arc`) with the router. The navigation
//! guard calls [`SessionStore::ensure_loaded`] before every transition and then
//! reads [`SessionStore::user`]; the auth actions write through
//! [`SessionStore::set_user`].
//!
//! DESIGN
//! ======
//! Loading is single-flight: the latch is a `tokio::sync::OnceCell`, so every
//! caller that arrives while a load is running awaits that same load instead
//! of starting its own. A failed load leaves the latch open and the next
//! caller tries again.
//!
//! The session itself sits behind a std `RwLock` that is never held across an
//! `.await`, which lets the readiness finalizer run from `Drop` even if the
//! loading future is cancelled.
//!
//! Every explicit `set_user` bumps a generation counter kept under the same
//! lock. A load only applies its `/me` answer if the generation it saw before
//! the request is still current, so a login or logout that lands while the
//! request is in flight wins over the older reply.

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::OnceCell;

use crate::net::error::ApiError;
use crate::net::types::{MeResponse, User};

/// Anything that can answer "who am I?" — the real [`ApiClient`] or a test fake.
///
/// [`ApiClient`]: crate::net::api::ApiClient
#[async_trait::async_trait]
pub trait CurrentUserSource: Send + Sync {
    async fn fetch_current_user(&self) -> Result<MeResponse, ApiError>;
}

/// Point-in-time copy of the session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub user: Option<User>,
    /// Set once the first load attempt has settled, whatever its outcome.
    pub ready: bool,
}

impl Session {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Lock contents: the visible session plus the write generation.
#[derive(Debug, Default)]
struct Slot {
    session: Session,
    generation: u64,
}

pub struct SessionStore {
    slot: RwLock<Slot>,
    loaded: OnceCell<()>,
    source: Arc<dyn CurrentUserSource>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("session", &self.read().session)
            .field("loaded", &self.loaded.initialized())
            .finish_non_exhaustive()
    }
}

/// Marks the session ready when dropped, so every exit path of
/// `load_session` (success, error, cancellation) flips the flag.
struct ReadyOnDrop<'a>(&'a SessionStore);

impl Drop for ReadyOnDrop<'_> {
    fn drop(&mut self) {
        self.0.write().session.ready = true;
    }
}

impl SessionStore {
    #[must_use]
    pub fn new(source: Arc<dyn CurrentUserSource>) -> Self {
        Self { slot: RwLock::new(Slot::default()), loaded: OnceCell::new(), source }
    }

    fn read(&self) -> RwLockReadGuard<'_, Slot> {
        self.slot.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Slot> {
        self.slot.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetch the current user once and record it.
    ///
    /// On success `user` becomes whatever the backend returned (possibly
    /// nobody), unless `set_user` ran while the request was in flight; the
    /// newer user is kept then. On failure `user` keeps its previous value.
    /// Either way `ready` is true once this returns.
    ///
    /// # Errors
    ///
    /// Returns the fetch error unchanged.
    pub async fn load_session(&self) -> Result<(), ApiError> {
        let _ready = ReadyOnDrop(self);
        let started_at = self.read().generation;
        match self.source.fetch_current_user().await {
            Ok(me) => {
                let mut slot = self.write();
                if slot.generation == started_at {
                    tracing::info!(authenticated = me.user.is_some(), "session loaded");
                    slot.session.user = me.user;
                } else {
                    tracing::info!(
                        authenticated = slot.session.is_authenticated(),
                        "session changed during load; keeping newer user"
                    );
                }
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "session load failed");
                Err(e)
            }
        }
    }

    /// Run [`SessionStore::load_session`] unless a load already succeeded.
    ///
    /// Concurrent callers share one in-flight load.
    ///
    /// # Errors
    ///
    /// Returns the load error; the latch stays open so a later call retries.
    pub async fn ensure_loaded(&self) -> Result<(), ApiError> {
        self.loaded.get_or_try_init(|| self.load_session()).await?;
        Ok(())
    }

    /// Whether a load has completed successfully.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded.initialized()
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.read().session.ready
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.read().session.user.clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read().session.is_authenticated()
    }

    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.read().session.clone()
    }

    /// Replace the current user, e.g. after a successful login. Takes
    /// precedence over any load still in flight.
    pub fn set_user(&self, user: Option<User>) {
        let mut slot = self.write();
        slot.session.user = user;
        slot.generation = slot.generation.wrapping_add(1);
    }

    pub fn clear_user(&self) {
        self.set_user(None);
    }
}
