//! Request middleware.
//!
//! - [`route_zone`] -- classifies a path as bypassed, auth zone or protected.
//! - [`session`] -- the cookie-session redirect policy and the
//!   [`session::SessionUser`] extractor it feeds.

pub mod route_zone;
pub mod session;
