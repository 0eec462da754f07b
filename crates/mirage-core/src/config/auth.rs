//! Session and credential configuration.

use serde::{Deserialize, Serialize};

/// Longest accepted session lifetime: ten years.
pub const MAX_SESSION_TTL_HOURS: u64 = 24 * 366 * 10;

/// Authentication configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for session token signing (HMAC-SHA256).
    #[serde(default = "default_session_secret")]
    pub session_secret: String,
    /// Session lifetime in hours, `1..=MAX_SESSION_TTL_HOURS`.
    #[serde(default = "default_session_ttl")]
    pub session_ttl_hours: u64,
    /// Name of the session cookie.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Mark the session cookie `Secure` (HTTPS only).
    #[serde(default)]
    pub cookie_secure: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_secret: default_session_secret(),
            session_ttl_hours: default_session_ttl(),
            cookie_name: default_cookie_name(),
            cookie_secure: false,
        }
    }
}

fn default_session_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_session_ttl() -> u64 {
    24 * 7
}

fn default_cookie_name() -> String {
    "mqk".to_string()
}
