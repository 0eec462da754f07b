//! Signed session tokens (HS256 JWT).
//!
//! The token is the whole session: there is no server-side session store,
//! so logging out only clears the client's cookie.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use mirage_core::config::{AuthConfig, MAX_SESSION_TTL_HOURS};
use mirage_core::error::AppError;
use mirage_core::types::id::UserId;

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: the account ID.
    pub sub: UserId,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// A freshly issued token and when it stops being accepted.
#[derive(Debug, Clone)]
pub struct SessionToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Issues and verifies session tokens with one HMAC secret.
#[derive(Clone)]
pub struct SessionSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl std::fmt::Debug for SessionSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSigner")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl SessionSigner {
    /// Creates a signer from auth configuration. Lifetimes beyond
    /// [`MAX_SESSION_TTL_HOURS`] are clamped to it.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(config.session_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.session_secret.as_bytes()),
            validation,
            ttl: session_ttl(config.session_ttl_hours),
        }
    }

    /// Session lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `user`.
    pub fn issue(&self, user: UserId) -> Result<SessionToken, AppError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AppError::internal("Session expiry is out of range"))?;
        let claims = SessionClaims {
            sub: user,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign session token: {e}")))?;
        Ok(SessionToken { token, expires_at })
    }

    /// Verify a token and return the account it names.
    pub fn verify(&self, token: &str) -> Result<UserId, AppError> {
        decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims.sub)
            .map_err(|e| {
                debug!(error = %e, "Session token rejected");
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::authentication("Session has expired")
                    }
                    _ => AppError::authentication("Invalid session"),
                }
            })
    }
}

fn session_ttl(hours: u64) -> Duration {
    let hours = i64::try_from(hours.min(MAX_SESSION_TTL_HOURS)).unwrap_or_default();
    Duration::try_hours(hours).unwrap_or_else(Duration::zero)
}
