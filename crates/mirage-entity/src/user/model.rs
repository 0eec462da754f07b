//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use mirage_core::types::id::UserId;

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Unique handle, alphanumeric.
    pub username: String,
    /// Name shown next to posts.
    pub display_name: String,
    /// Unique, lower-cased email address.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Avatar URL. Never empty once registered.
    pub image: String,
    /// Short biography.
    pub bio: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Pre-minted identifier.
    pub id: UserId,
    pub username: String,
    pub display_name: String,
    /// Already normalised (trimmed, lower-cased).
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Initial avatar URL.
    pub image: String,
}

/// Data for updating an existing user's account in place.
#[derive(Debug, Clone)]
pub struct UpdateUser {
    pub id: UserId,
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub bio: Option<String>,
}

/// An account after an update.
#[derive(Debug, Clone)]
pub struct UpdatedUser {
    pub user: User,
    /// Avatar URL the update overwrote. `None` when the avatar was kept.
    pub replaced_image: Option<String>,
}
