//! Account registration, login, editing, and profile operations.

use std::sync::Arc;

use tracing::info;

use mirage_auth::avatar::gravatar_url;
use mirage_auth::password::PasswordHasher;
use mirage_core::error::AppError;
use mirage_core::result::AppResult;
use mirage_core::traits::storage::StorageProvider;
use mirage_core::types::id::UserId;
use mirage_database::UserRepository;
use mirage_entity::user::{CreateUser, Profile, UpdateUser, User};
use mirage_storage::media::AVATAR_TYPES;

use super::input::{EditAccountInput, LoginInput, RegisterInput};
use crate::context::RequestContext;
use crate::upload;
use crate::validation::check;

/// Maximum number of profiles a search returns.
const SEARCH_LIMIT: i64 = 20;

fn invalid_credentials() -> AppError {
    AppError::authorization("Invalid email and password combination")
}

/// Handles accounts and the follow graph.
#[derive(Debug, Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    storage: Arc<dyn StorageProvider>,
    hasher: Arc<PasswordHasher>,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        storage: Arc<dyn StorageProvider>,
        hasher: Arc<PasswordHasher>,
    ) -> Self {
        Self {
            users,
            storage,
            hasher,
        }
    }

    /// Create an account with a Gravatar default avatar.
    ///
    /// Duplicate usernames and emails are reported by the store as a
    /// Conflict; there is no pre-check.
    pub async fn register(&self, input: RegisterInput) -> AppResult<User> {
        let input = input.normalized();
        check(&input)?;

        let password_hash = self.hasher.hash_password(&input.password)?;
        let user = self
            .users
            .create(&CreateUser {
                id: UserId::new(),
                image: gravatar_url(&input.email),
                username: input.username,
                display_name: input.display_name,
                email: input.email,
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, "Account registered");
        Ok(user)
    }

    /// Check credentials. Unknown email and wrong password fail the same way.
    pub async fn login(&self, input: LoginInput) -> AppResult<User> {
        let input = input.normalized();
        check(&input)?;

        let Some(user) = self.users.find_by_email(&input.email).await? else {
            self.hasher.burn(&input.password);
            return Err(invalid_credentials());
        };

        if !self.hasher.verify_password(&input.password, &user.password_hash)? {
            return Err(invalid_credentials());
        }

        info!(user_id = %user.id, "User logged in");
        Ok(user)
    }

    /// The account behind the session.
    pub async fn current(&self, ctx: &RequestContext) -> AppResult<User> {
        self.users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::authentication("Account no longer exists"))
    }

    /// Replace the editable account fields and, optionally, the avatar.
    ///
    /// All input checks run before anything is stored. A new avatar is
    /// uploaded first; the one the update replaced is removed only after the
    /// account row points at the new one.
    pub async fn edit(&self, ctx: &RequestContext, input: EditAccountInput) -> AppResult<User> {
        let input = input.normalized();
        check(&input)?;
        if input.avatar.as_ref().is_some_and(|a| !a.is_one_of(AVATAR_TYPES)) {
            return Err(AppError::validation("Profile image must be a JPEG or PNG"));
        }

        self.current(ctx).await?;

        let new_image = match &input.avatar {
            Some(avatar) => {
                let prefix = format!("profile_images/{}", ctx.user_id);
                Some(upload::store(self.storage.as_ref(), &prefix, avatar).await?)
            }
            None => None,
        };

        let changes = UpdateUser {
            id: ctx.user_id,
            username: input.username,
            display_name: input.display_name,
            email: input.email,
            bio: input.bio,
        };
        let updated = match self.users.update(&changes, new_image.as_deref()).await {
            Ok(updated) => updated,
            Err(e) => {
                if let Some(url) = &new_image {
                    upload::discard(self.storage.as_ref(), url).await;
                }
                return Err(e);
            }
        };

        if let Some(replaced) = &updated.replaced_image {
            upload::discard(self.storage.as_ref(), replaced).await;
        }

        info!(
            user_id = %updated.user.id,
            avatar_changed = new_image.is_some(),
            "Account updated"
        );
        Ok(updated.user)
    }

    /// Profile of `username` as seen by `viewer`.
    pub async fn profile(&self, username: &str, viewer: Option<UserId>) -> AppResult<Profile> {
        self.users
            .profile(username, viewer)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User '{username}' not found")))
    }

    /// Profiles whose username or display name contains `term`.
    pub async fn search(&self, term: &str, viewer: Option<UserId>) -> AppResult<Vec<Profile>> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }
        self.users.search_profiles(term, viewer, SEARCH_LIMIT).await
    }

    /// Follow `username`, or unfollow if already following.
    pub async fn follow(&self, ctx: &RequestContext, username: &str) -> AppResult<Profile> {
        let target = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User '{username}' not found")))?;
        if target.id == ctx.user_id {
            return Err(AppError::validation("You cannot follow yourself"));
        }

        let following = self.users.toggle_follow(ctx.user_id, target.id).await?;
        info!(
            user_id = %ctx.user_id,
            followee_id = %target.id,
            following,
            "Follow toggled"
        );

        self.profile(username, Some(ctx.user_id)).await
    }
}
