//! Public profile read model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use mirage_core::types::id::UserId;

/// An account as seen by another (possibly anonymous) account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub id: UserId,
    pub username: String,
    pub display_name: String,
    pub image: String,
    pub bio: Option<String>,
    /// Number of accounts following this one.
    pub followers: i64,
    /// Number of accounts this one follows.
    pub followee: i64,
    /// Whether the viewer follows this account. Always false for anonymous
    /// viewers and for the viewer's own profile.
    pub following: bool,
    pub created_at: DateTime<Utc>,
}
