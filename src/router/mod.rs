//! Session-aware router.
//!
//! ARCHITECTURE
//! ============
//! `routes` is the static table, `guard` the per-transition access check.
//! [`Router::navigate`] ties them together the way a history router does:
//! redirect records are applied before guards run, and a guard redirect
//! starts a fresh resolution of the new target, guarded again.

pub mod guard;
pub mod routes;

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

use std::sync::{Arc, PoisonError, RwLock};

use guard::{GuardDecision, NavigationGuard};
use routes::{Resolved, RouteName, RouteTable, View, normalize_path};

use crate::net::error::ApiError;
use crate::state::session::SessionStore;

/// Upper bound on redirects followed for a single navigation.
pub const MAX_REDIRECTS: usize = 8;

#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    /// Loading the session failed; the transition was aborted.
    #[error("session load failed: {0}")]
    SessionLoad(#[from] ApiError),

    /// Redirects did not settle within [`MAX_REDIRECTS`] hops.
    #[error("too many redirects navigating to {path}")]
    RedirectLoop { path: String },

    /// No route matched and the table has no catch-all.
    #[error("no route matches {path}")]
    NotFound { path: String },

    /// A guard redirected to a route name the table does not define.
    #[error("redirect target `{0}` is not in the route table")]
    UnknownRoute(RouteName),
}

/// A completed (allowed) transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigation {
    pub name: RouteName,
    pub path: &'static str,
    pub view: View,
    /// The originally requested location when one or more redirects applied.
    pub redirected_from: Option<String>,
}

impl Navigation {
    #[must_use]
    pub fn was_redirected(&self) -> bool {
        self.redirected_from.is_some()
    }
}

#[derive(Debug)]
pub struct Router {
    table: RouteTable,
    guard: NavigationGuard,
    current: RwLock<Option<Navigation>>,
}

impl Router {
    #[must_use]
    pub fn new(table: RouteTable, session: Arc<SessionStore>) -> Self {
        Self { table, guard: NavigationGuard::new(session), current: RwLock::new(None) }
    }

    /// Router over the application route table.
    #[must_use]
    pub fn app(session: Arc<SessionStore>) -> Self {
        Self::new(RouteTable::app(), session)
    }

    #[must_use]
    pub fn session(&self) -> &Arc<SessionStore> {
        self.guard.session()
    }

    /// The last allowed transition, if any.
    #[must_use]
    pub fn current(&self) -> Option<Navigation> {
        self.current.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Resolve `location`, run the guard, and follow redirects until a route
    /// is allowed.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::SessionLoad`] if the session cannot be
    /// loaded, and the other variants for routing-table problems. The current
    /// location is unchanged on error.
    pub async fn navigate(&self, location: &str) -> Result<Navigation, NavigationError> {
        let mut target = normalize_path(location);
        let mut redirected = false;

        for _ in 0..=MAX_REDIRECTS {
            let route = match self.table.resolve(&target) {
                Resolved::Route(route) => route,
                Resolved::Redirect(to) => {
                    tracing::debug!(from = %target, to, "redirect record");
                    target = to.to_owned();
                    redirected = true;
                    continue;
                }
                Resolved::NotFound => return Err(NavigationError::NotFound { path: target }),
            };

            match self.guard.check(route).await? {
                GuardDecision::Allow => {
                    let navigation = Navigation {
                        name: route.name,
                        path: route.path,
                        view: route.view,
                        redirected_from: redirected.then(|| location.to_owned()),
                    };
                    tracing::info!(route = %route.name, path = route.path, redirected_from = ?navigation.redirected_from, "navigated");
                    *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(navigation.clone());
                    return Ok(navigation);
                }
                GuardDecision::Redirect(name) => {
                    let next = self.table.by_name(name).ok_or(NavigationError::UnknownRoute(name))?;
                    tracing::debug!(from = route.path, to = next.path, "guard redirect");
                    target = next.path.to_owned();
                    redirected = true;
                }
            }
        }

        Err(NavigationError::RedirectLoop { path: location.to_owned() })
    }
}
