//! User repository implementation.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use mirage_core::error::AppError;
use mirage_core::result::AppResult;
use mirage_core::types::id::UserId;
use mirage_entity::user::{CreateUser, Profile, UpdateUser, UpdatedUser, User};

use super::UserRepository;
use crate::error::{StoreError, db_error};

pub(crate) const USERNAME_KEY: &str = "users_username_key";
pub(crate) const EMAIL_KEY: &str = "users_email_key";

/// Turn a failed account write into the domain error the caller sees.
pub(crate) fn user_write_error(err: StoreError, username: &str, email: &str) -> AppError {
    if err.violates(USERNAME_KEY) {
        AppError::conflict(format!("Username '{username}' is already taken"))
    } else if err.violates(EMAIL_KEY) {
        AppError::conflict(format!("An account with email '{email}' already exists"))
    } else if matches!(err, StoreError::NotFound) {
        AppError::not_found("User not found")
    } else {
        err.into_app("Failed to save user")
    }
}

/// Escape `LIKE` metacharacters so a search term matches literally.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

const PROFILE_SELECT: &str = "SELECT u.id, u.username, u.display_name, u.image, u.bio, u.created_at, \
     (SELECT COUNT(*) FROM followee f WHERE f.followee_id = u.id) AS followers, \
     (SELECT COUNT(*) FROM followee f WHERE f.user_id = u.id) AS followee, \
     EXISTS (SELECT 1 FROM followee f WHERE f.user_id = $1 AND f.followee_id = u.id) AS following \
     FROM users u";

/// An updated row together with the avatar it had before the update.
#[derive(Debug, FromRow)]
struct UpdatedUserRow {
    #[sqlx(flatten)]
    user: User,
    previous_image: String,
}

/// PostgreSQL-backed [`UserRepository`].
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find user by id"))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find user by email"))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find user by username"))
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, username, display_name, email, password_hash, image) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING *",
        )
        .bind(data.id)
        .bind(&data.username)
        .bind(&data.display_name)
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(&data.image)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| user_write_error(e.into(), &data.username, &data.email))
    }

    async fn update(&self, data: &UpdateUser, image: Option<&str>) -> AppResult<UpdatedUser> {
        let row = sqlx::query_as::<_, UpdatedUserRow>(
            "WITH previous AS (SELECT id, image FROM users WHERE id = $1 FOR UPDATE) \
             UPDATE users u SET username = $2, display_name = $3, email = $4, bio = $5, \
             image = COALESCE($6, u.image), updated_at = NOW() \
             FROM previous WHERE u.id = previous.id \
             RETURNING u.*, previous.image AS previous_image",
        )
        .bind(data.id)
        .bind(&data.username)
        .bind(&data.display_name)
        .bind(&data.email)
        .bind(&data.bio)
        .bind(image)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| user_write_error(e.into(), &data.username, &data.email))?;

        Ok(UpdatedUser {
            replaced_image: image.map(|_| row.previous_image),
            user: row.user,
        })
    }

    async fn profile(&self, username: &str, viewer: Option<UserId>) -> AppResult<Option<Profile>> {
        sqlx::query_as::<_, Profile>(&format!("{PROFILE_SELECT} WHERE u.username = $2"))
            .bind(viewer)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to load profile"))
    }

    async fn search_profiles(
        &self,
        term: &str,
        viewer: Option<UserId>,
        limit: i64,
    ) -> AppResult<Vec<Profile>> {
        sqlx::query_as::<_, Profile>(&format!(
            "{PROFILE_SELECT} WHERE u.username ILIKE $2 OR u.display_name ILIKE $2 \
             ORDER BY u.username ASC LIMIT $3"
        ))
        .bind(viewer)
        .bind(like_pattern(term))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to search profiles"))
    }

    async fn toggle_follow(&self, follower: UserId, followee: UserId) -> AppResult<bool> {
        let removed = sqlx::query("DELETE FROM followee WHERE user_id = $1 AND followee_id = $2")
            .bind(follower)
            .bind(followee)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to unfollow user"))?
            .rows_affected();
        if removed > 0 {
            return Ok(false);
        }

        sqlx::query(
            "INSERT INTO followee (user_id, followee_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(follower)
        .bind(followee)
        .execute(&self.pool)
        .await
        .map_err(db_error("User not found"))?;
        Ok(true)
    }
}
