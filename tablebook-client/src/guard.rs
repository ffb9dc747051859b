//! Route guard
//!
//! Decides where a navigation lands given the session state. Every gated
//! route is open to any authenticated identity; role-specific content is
//! left to the views.

use std::fmt;

use crate::session::{SessionState, SessionStore};

/// Application routes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`, always forwards to the login screen
    Root,
    Login,
    Customer,
    Admin,
    Restaurant,
    Kitchen,
}

impl Route {
    /// Parse a path; unknown paths map to [`Route::Root`]
    pub fn from_path(path: &str) -> Route {
        match path.trim_end_matches('/') {
            "/login" => Route::Login,
            "/customer" => Route::Customer,
            "/admin" => Route::Admin,
            "/restaurant" => Route::Restaurant,
            "/kitchen" => Route::Kitchen,
            _ => Route::Root,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Root => "/",
            Route::Login => "/login",
            Route::Customer => "/customer",
            Route::Admin => "/admin",
            Route::Restaurant => "/restaurant",
            Route::Kitchen => "/kitchen",
        }
    }

    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Route::Customer | Route::Admin | Route::Restaurant | Route::Kitchen
        )
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Outcome of a guarded navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Allow(Route),
    Redirect(Route),
}

impl Navigation {
    /// Route that ends up displayed
    pub fn target(&self) -> Route {
        match self {
            Navigation::Allow(route) | Navigation::Redirect(route) => *route,
        }
    }
}

/// Check a navigation against a session state
pub fn check(route: Route, state: SessionState) -> Navigation {
    match route {
        Route::Root => Navigation::Redirect(Route::Login),
        route if route.requires_auth() && state == SessionState::Anonymous => {
            tracing::debug!(%route, "Anonymous navigation redirected to login");
            Navigation::Redirect(Route::Login)
        }
        route => Navigation::Allow(route),
    }
}

/// Route guard bound to the session store
#[derive(Debug, Clone, Copy)]
pub struct RouteGuard<'a> {
    session: &'a SessionStore,
}

impl<'a> RouteGuard<'a> {
    pub fn new(session: &'a SessionStore) -> Self {
        Self { session }
    }

    pub fn navigate(&self, route: Route) -> Navigation {
        check(route, self.session.state())
    }

    pub fn navigate_path(&self, path: &str) -> Navigation {
        self.navigate(Route::from_path(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_is_redirected_from_gated_views() {
        for route in [Route::Customer, Route::Admin, Route::Restaurant, Route::Kitchen] {
            assert_eq!(
                check(route, SessionState::Anonymous),
                Navigation::Redirect(Route::Login)
            );
            assert_eq!(
                check(route, SessionState::Authenticated),
                Navigation::Allow(route)
            );
        }
    }

    #[test]
    fn login_is_always_reachable() {
        assert_eq!(
            check(Route::Login, SessionState::Anonymous),
            Navigation::Allow(Route::Login)
        );
        assert_eq!(
            check(Route::Login, SessionState::Authenticated),
            Navigation::Allow(Route::Login)
        );
    }

    #[test]
    fn root_and_unknown_paths_forward_to_login() {
        assert_eq!(Route::from_path("/"), Route::Root);
        assert_eq!(Route::from_path("/nowhere"), Route::Root);
        assert_eq!(Route::from_path("/kitchen/"), Route::Kitchen);
        assert_eq!(
            check(Route::Root, SessionState::Authenticated).target(),
            Route::Login
        );
    }
}
