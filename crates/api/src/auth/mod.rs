//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`session_token`] -- HS256 session token issuing and verification.
//! - [`cookie`] -- reading and writing the `session` cookie.

pub mod cookie;
pub mod password;
pub mod session_token;
