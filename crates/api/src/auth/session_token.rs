//! Session token issuing and verification.
//!
//! Session tokens are HS256-signed JWTs carried in the `session` cookie. Only
//! HS256 is accepted on verification, and `exp` is always enforced.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use stillwater_core::types::DbId;

/// Claims embedded in every session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    /// The user's email address.
    pub email: String,
    /// Profile photo URL, if the user has one.
    #[serde(default)]
    pub picture: Option<String>,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

/// Configuration for session token signing and the session cookie.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Session lifetime in days (default: 5).
    pub expiry_days: i64,
    /// Whether the cookie carries the `Secure` attribute.
    pub cookie_secure: bool,
}

/// Default session lifetime in days.
const DEFAULT_EXPIRY_DAYS: i64 = 5;

impl SessionConfig {
    /// Load session configuration from environment variables.
    ///
    /// | Env Var                 | Required | Default |
    /// |-------------------------|----------|---------|
    /// | `SESSION_SECRET`        | **yes**  | --      |
    /// | `SESSION_EXPIRY_DAYS`   | no       | `5`     |
    /// | `SESSION_COOKIE_SECURE` | no       | `false` |
    ///
    /// # Panics
    ///
    /// Panics if `SESSION_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("SESSION_SECRET").expect("SESSION_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "SESSION_SECRET must not be empty");

        let expiry_days: i64 = std::env::var("SESSION_EXPIRY_DAYS")
            .unwrap_or_else(|_| DEFAULT_EXPIRY_DAYS.to_string())
            .parse()
            .expect("SESSION_EXPIRY_DAYS must be a valid i64");

        let cookie_secure: bool = std::env::var("SESSION_COOKIE_SECURE")
            .unwrap_or_else(|_| "false".into())
            .parse()
            .expect("SESSION_COOKIE_SECURE must be true or false");

        Self {
            secret,
            expiry_days,
            cookie_secure,
        }
    }

    /// Session lifetime in seconds, used for the cookie `Max-Age`.
    pub fn max_age_secs(&self) -> i64 {
        self.expiry_days * 24 * 60 * 60
    }
}

/// Issue a session token for a user.
pub fn issue_session_token(
    user_id: DbId,
    email: &str,
    picture: Option<&str>,
    config: &SessionConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();

    let claims = SessionClaims {
        sub: user_id,
        email: email.to_string(),
        picture: picture.map(str::to_string),
        iat: now,
        exp: now + config.max_age_secs(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify a session token and return its claims.
///
/// Fails on a bad signature, an expired token, a malformed token, or any
/// algorithm other than HS256.
pub fn verify_session_token(
    token: &str,
    config: &SessionConfig,
) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_required_spec_claims(&["exp", "sub"]);

    let token_data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}
