//! Repository traits and their PostgreSQL implementations.
//!
//! Post listings return up to `page.fetch_limit()` rows; the extra sentinel
//! row is left for the caller to turn into a `has_more` flag.

pub mod post;
pub mod user;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use mirage_core::config::DatabaseConfig;
use mirage_core::error::AppError;
use mirage_core::result::AppResult;
use mirage_core::types::id::{PostId, UserId};
use mirage_core::types::page::PageRequest;
use mirage_entity::post::{NewPost, Post, PostView};
use mirage_entity::user::{CreateUser, Profile, UpdateUser, UpdatedUser, User};

use crate::connection::DatabasePool;
use crate::memory;

pub use post::PgPostRepository;
pub use user::PgUserRepository;

/// Account persistence.
#[async_trait]
pub trait UserRepository: Send + Sync + std::fmt::Debug {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Exact match on the stored (lower-cased) email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Insert a new account. Duplicate username or email is a Conflict.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Overwrite the editable account fields, and the avatar when `image`
    /// is set. Duplicate username or email is a Conflict.
    ///
    /// The replaced avatar is read in the same step as the write, so two
    /// concurrent avatar changes each see the URL the other overwrote.
    async fn update(&self, data: &UpdateUser, image: Option<&str>) -> AppResult<UpdatedUser>;

    /// Profile of `username` as seen by `viewer`.
    async fn profile(&self, username: &str, viewer: Option<UserId>) -> AppResult<Option<Profile>>;

    /// Profiles whose username or display name contains `term`.
    async fn search_profiles(
        &self,
        term: &str,
        viewer: Option<UserId>,
        limit: i64,
    ) -> AppResult<Vec<Profile>>;

    /// Flip the follow edge `follower -> followee`. Returns whether the edge
    /// exists afterwards.
    async fn toggle_follow(&self, follower: UserId, followee: UserId) -> AppResult<bool>;
}

/// Post persistence and the newest-first listings.
#[async_trait]
pub trait PostRepository: Send + Sync + std::fmt::Debug {
    /// Insert the post and its attachment atomically.
    async fn create(&self, data: &NewPost) -> AppResult<Post>;

    async fn find_by_id(&self, id: PostId) -> AppResult<Option<Post>>;

    /// A single post as seen by `viewer`.
    async fn view(&self, id: PostId, viewer: Option<UserId>) -> AppResult<Option<PostView>>;

    /// Delete a post; its attachment row, likes, and retweets cascade.
    /// Returns whether a row was removed.
    async fn delete(&self, id: PostId) -> AppResult<bool>;

    /// Returns whether the like exists afterwards.
    async fn toggle_like(&self, user: UserId, post: PostId) -> AppResult<bool>;

    /// Returns whether the retweet exists afterwards.
    async fn toggle_retweet(&self, user: UserId, post: PostId) -> AppResult<bool>;

    /// Posts authored by, or retweeted by, accounts `viewer` follows.
    async fn feed(&self, viewer: UserId, page: &PageRequest) -> AppResult<Vec<PostView>>;

    /// Posts authored or retweeted by `author`.
    async fn profile_posts(
        &self,
        author: UserId,
        viewer: Option<UserId>,
        page: &PageRequest,
    ) -> AppResult<Vec<PostView>>;

    /// Posts liked by `user`.
    async fn liked_posts(
        &self,
        user: UserId,
        viewer: Option<UserId>,
        page: &PageRequest,
    ) -> AppResult<Vec<PostView>>;

    /// Posts carrying `tag` (with leading `#`), matched case-insensitively.
    async fn hashtag_posts(
        &self,
        tag: &str,
        viewer: Option<UserId>,
        page: &PageRequest,
    ) -> AppResult<Vec<PostView>>;
}

/// The repository set selected by `database.provider`.
#[derive(Debug, Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pool: Option<DatabasePool>,
}

impl Repositories {
    /// Build the configured backend, connecting and migrating PostgreSQL
    /// when selected.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider.as_str() {
            "postgres" => {
                let pool = DatabasePool::connect(config).await?;
                if config.run_migrations {
                    pool.migrate().await?;
                }
                Ok(Self::postgres(pool))
            }
            "memory" => {
                info!("Using in-memory repositories; data is lost on restart");
                Ok(Self::memory())
            }
            other => Err(AppError::internal(format!(
                "Unknown database provider: '{other}'. Supported: postgres, memory"
            ))),
        }
    }

    pub fn postgres(pool: DatabasePool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.pool().clone())),
            posts: Arc::new(PgPostRepository::new(pool.pool().clone())),
            pool: Some(pool),
        }
    }

    /// Fresh, empty in-memory repositories sharing one state.
    pub fn memory() -> Self {
        let (users, posts) = memory::repositories();
        Self {
            users: Arc::new(users),
            posts: Arc::new(posts),
            pool: None,
        }
    }

    /// Whether the backing store answers.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.pool {
            Some(pool) => pool.health_check().await,
            None => Ok(true),
        }
    }

    /// Close pooled connections, if any.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}
