//! Static route table.
//!
//! DESIGN
//! ======
//! Routes are plain data: path, name, the view to show, and access metadata.
//! Paths match exactly after normalization (query and fragment dropped,
//! trailing slash ignored, ASCII case folded). Anything unmatched falls to the
//! table's catch-all redirect.

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;

/// Stable route identifiers used for named redirects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RouteName {
    Home,
    Login,
    Register,
    Games,
    TicTacToe,
}

impl RouteName {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Login => "login",
            Self::Register => "register",
            Self::Games => "games",
            Self::TicTacToe => "tictactoe",
        }
    }
}

impl std::fmt::Display for RouteName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Screen rendered for a route. Views are eager; there is no lazy loading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Home,
    Login,
    Register,
    GamesCatalog,
    TicTacToe,
}

/// Access policy attached to a route.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RouteMeta {
    /// Only reachable with a session user.
    pub requires_auth: bool,
    /// Only reachable without a session user.
    pub guest_only: bool,
}

impl RouteMeta {
    pub const PUBLIC: Self = Self { requires_auth: false, guest_only: false };
    pub const REQUIRES_AUTH: Self = Self { requires_auth: true, guest_only: false };
    pub const GUEST_ONLY: Self = Self { requires_auth: false, guest_only: true };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub name: RouteName,
    pub view: View,
    pub meta: RouteMeta,
}

/// The application's routes, in match order.
pub const APP_ROUTES: &[Route] = &[
    Route { path: "/", name: RouteName::Home, view: View::Home, meta: RouteMeta::PUBLIC },
    Route { path: "/login", name: RouteName::Login, view: View::Login, meta: RouteMeta::GUEST_ONLY },
    Route { path: "/register", name: RouteName::Register, view: View::Register, meta: RouteMeta::GUEST_ONLY },
    Route { path: "/games", name: RouteName::Games, view: View::GamesCatalog, meta: RouteMeta::REQUIRES_AUTH },
    Route { path: "/tictactoe", name: RouteName::TicTacToe, view: View::TicTacToe, meta: RouteMeta::REQUIRES_AUTH },
];

/// Where unmatched paths are sent.
pub const CATCH_ALL_REDIRECT: &str = "/";

/// Outcome of matching a path against the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolved<'a> {
    Route(&'a Route),
    Redirect(&'a str),
    NotFound,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteTable {
    routes: Vec<Route>,
    catch_all: Option<String>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::app()
    }
}

impl RouteTable {
    /// Build a table from explicit routes with an optional catch-all redirect.
    #[must_use]
    pub fn new(routes: Vec<Route>, catch_all: Option<&str>) -> Self {
        Self { routes, catch_all: catch_all.map(normalize_path) }
    }

    /// The application table: [`APP_ROUTES`] with unmatched paths sent to `/`.
    #[must_use]
    pub fn app() -> Self {
        Self::new(APP_ROUTES.to_vec(), Some(CATCH_ALL_REDIRECT))
    }

    #[must_use]
    pub fn by_name(&self, name: RouteName) -> Option<&Route> {
        self.routes.iter().find(|r| r.name == name)
    }

    /// Match a raw location (path, optionally with query/fragment).
    #[must_use]
    pub fn resolve(&self, location: &str) -> Resolved<'_> {
        let path = normalize_path(location);
        if let Some(route) = self.routes.iter().find(|r| r.path.eq_ignore_ascii_case(&path)) {
            return Resolved::Route(route);
        }
        match self.catch_all.as_deref() {
            Some(to) => Resolved::Redirect(to),
            None => Resolved::NotFound,
        }
    }
}

/// Strip query and fragment, force a leading slash, drop trailing slashes.
#[must_use]
pub fn normalize_path(location: &str) -> String {
    let end = location.find(['?', '#']).unwrap_or(location.len());
    let trimmed = location[..end].trim().trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_owned()
    } else if trimmed.starts_with('/') {
        trimmed.to_owned()
    } else {
        format!("/{trimmed}")
    }
}
