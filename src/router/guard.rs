//! Navigation guard: per-transition access check.
//!
//! The first check on a store triggers the session load; every later check
//! reuses it. Rules are evaluated in a fixed order and the first match wins:
//!
//! 1. protected route, no user  -> redirect to `login`
//! 2. guest-only route, a user  -> redirect to `home`
//! 3. otherwise                 -> allow

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;

use std::sync::Arc;

use super::routes::{Route, RouteMeta, RouteName};
use crate::net::error::ApiError;
use crate::state::session::SessionStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(RouteName),
}

/// Apply the access rules to one route given whether a user is present.
#[must_use]
pub fn decide(meta: RouteMeta, authenticated: bool) -> GuardDecision {
    if meta.requires_auth && !authenticated {
        return GuardDecision::Redirect(RouteName::Login);
    }
    if meta.guest_only && authenticated {
        return GuardDecision::Redirect(RouteName::Home);
    }
    GuardDecision::Allow
}

#[derive(Clone, Debug)]
pub struct NavigationGuard {
    session: Arc<SessionStore>,
}

impl NavigationGuard {
    #[must_use]
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self { session }
    }

    #[must_use]
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Ensure the session is loaded, then decide for `route`.
    ///
    /// # Errors
    ///
    /// Returns the session-load error; the transition must be aborted.
    pub async fn check(&self, route: &Route) -> Result<GuardDecision, ApiError> {
        self.session.ensure_loaded().await?;
        let decision = decide(route.meta, self.session.is_authenticated());
        tracing::debug!(route = %route.name, ?decision, "guard decision");
        Ok(decision)
    }
}
