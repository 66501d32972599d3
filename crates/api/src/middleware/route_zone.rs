//! Path classification for the session middleware.

/// Prefix of every route reachable without a session (login, register).
pub const AUTH_ZONE_PREFIX: &str = "/auth";

/// Where unauthenticated visitors are sent.
pub const LOGIN_PATH: &str = "/auth/login";

/// Root of the protected area; signed-in visitors to the auth zone land here.
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Path prefixes the session middleware never inspects: static files, image
/// optimization and framework-internal endpoints.
const BYPASS_PREFIXES: &[&str] = &["/static/", "/assets/", "/_image", "/_internal/"];

/// Exact paths the session middleware never inspects.
const BYPASS_PATHS: &[&str] = &["/favicon.ico", "/health"];

/// Which part of the site a request path belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteZone {
    /// Assets and internals; no session handling at all.
    Bypass,
    /// Login and registration pages.
    Auth,
    /// Everything that needs a valid session.
    Protected,
}

impl RouteZone {
    /// Classify a request path.
    ///
    /// Any path starting with `/auth` is in the auth zone.
    pub fn classify(path: &str) -> Self {
        if BYPASS_PATHS.contains(&path) || BYPASS_PREFIXES.iter().any(|p| path.starts_with(p)) {
            RouteZone::Bypass
        } else if path.starts_with(AUTH_ZONE_PREFIX) {
            RouteZone::Auth
        } else {
            RouteZone::Protected
        }
    }

    pub fn is_auth(self) -> bool {
        self == RouteZone::Auth
    }
}
