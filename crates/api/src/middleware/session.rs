//! Cookie-session redirect policy, run once per request before any handler.
//!
//! | Cookie   | Auth zone (`/auth*`)              | Protected path                      |
//! |----------|-----------------------------------|-------------------------------------|
//! | absent   | continue                          | redirect `/auth/login`              |
//! | valid    | redirect `/dashboard`             | continue (claims attached)          |
//! | invalid  | continue, clear cookie            | redirect `/auth/login`, clear cookie|
//!
//! Bypassed paths (assets, internals) skip the policy entirely.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::SET_COOKIE;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use serde::Serialize;
use stillwater_core::error::CoreError;
use stillwater_core::types::DbId;

use crate::auth::cookie::{clear_session_cookie, read_cookie, SESSION_COOKIE};
use crate::auth::session_token::{verify_session_token, SessionClaims};
use crate::error::AppError;
use crate::middleware::route_zone::{RouteZone, DASHBOARD_PATH, LOGIN_PATH};
use crate::state::AppState;

/// Outcome of looking for and verifying the session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CookieState {
    Missing,
    Valid(SessionClaims),
    Invalid,
}

/// What the middleware does with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionDecision {
    /// Hand the request to the router.
    Continue {
        claims: Option<SessionClaims>,
        clear_cookie: bool,
    },
    /// Answer with a redirect instead.
    Redirect {
        to: &'static str,
        clear_cookie: bool,
    },
}

/// The redirect policy as a pure function.
pub fn decide(in_auth_zone: bool, cookie: CookieState) -> SessionDecision {
    match (cookie, in_auth_zone) {
        (CookieState::Missing, true) => SessionDecision::Continue {
            claims: None,
            clear_cookie: false,
        },
        (CookieState::Missing, false) => SessionDecision::Redirect {
            to: LOGIN_PATH,
            clear_cookie: false,
        },
        (CookieState::Valid(_), true) => SessionDecision::Redirect {
            to: DASHBOARD_PATH,
            clear_cookie: false,
        },
        (CookieState::Valid(claims), false) => SessionDecision::Continue {
            claims: Some(claims),
            clear_cookie: false,
        },
        // Staying put on auth pages avoids a redirect loop.
        (CookieState::Invalid, true) => SessionDecision::Continue {
            claims: None,
            clear_cookie: true,
        },
        (CookieState::Invalid, false) => SessionDecision::Redirect {
            to: LOGIN_PATH,
            clear_cookie: true,
        },
    }
}

/// Axum middleware applying [`decide`] to every non-bypassed request.
///
/// Mount with `axum::middleware::from_fn_with_state(state, enforce_session)`.
pub async fn enforce_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let zone = RouteZone::classify(request.uri().path());
    if zone == RouteZone::Bypass {
        return next.run(request).await;
    }

    let cookie = match read_cookie(request.headers(), SESSION_COOKIE) {
        None => CookieState::Missing,
        Some(token) => match verify_session_token(token, &state.config.session) {
            Ok(claims) => CookieState::Valid(claims),
            Err(e) => {
                tracing::debug!(
                    path = %request.uri().path(),
                    error = %e,
                    "Rejected session cookie",
                );
                CookieState::Invalid
            }
        },
    };

    match decide(zone.is_auth(), cookie) {
        SessionDecision::Redirect { to, clear_cookie } => {
            let mut response = Redirect::temporary(to).into_response();
            if clear_cookie {
                response
                    .headers_mut()
                    .append(SET_COOKIE, clear_session_cookie());
            }
            response
        }
        SessionDecision::Continue {
            claims,
            clear_cookie,
        } => {
            if let Some(claims) = claims {
                request.extensions_mut().insert(SessionUser::from(claims));
            }
            let mut response = next.run(request).await;
            // A handler that just signed the user in wins over the clear.
            if clear_cookie && !sets_session_cookie(response.headers()) {
                response
                    .headers_mut()
                    .append(SET_COOKIE, clear_session_cookie());
            }
            response
        }
    }
}

/// Whether a response already carries a `Set-Cookie` for the session.
fn sets_session_cookie(headers: &HeaderMap) -> bool {
    let prefix = format!("{SESSION_COOKIE}=");
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.starts_with(&prefix))
}

// ---------------------------------------------------------------------------
// Extractor
// ---------------------------------------------------------------------------

/// The signed-in user, as verified by [`enforce_session`].
///
/// ```ignore
/// async fn my_handler(user: SessionUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionUser {
    pub user_id: DbId,
    pub email: String,
    pub picture: Option<String>,
}

impl From<SessionClaims> for SessionUser {
    fn from(claims: SessionClaims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            picture: claims.picture,
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionUser>()
            .cloned()
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized("No active session".into())))
    }
}
