//! The `session` cookie: lookup on requests, `Set-Cookie` values on responses.

use axum::http::header::COOKIE;
use axum::http::{HeaderMap, HeaderValue};

use crate::auth::session_token::SessionConfig;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "session";

/// Find a cookie by name across all `Cookie` headers.
///
/// A cookie with an empty value is treated as absent.
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"'))
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value that stores `token` as the session.
pub fn session_cookie(token: &str, config: &SessionConfig) -> HeaderValue {
    let mut cookie = format!(
        "{SESSION_COOKIE}={token}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
        config.max_age_secs()
    );
    if config.cookie_secure {
        cookie.push_str("; Secure");
    }
    // JWTs are base64url segments joined by dots, always a valid header value.
    HeaderValue::from_str(&cookie).unwrap_or_else(|_| clear_session_cookie())
}

/// `Set-Cookie` value that deletes the session cookie.
pub fn clear_session_cookie() -> HeaderValue {
    HeaderValue::from_static("session=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax")
}
