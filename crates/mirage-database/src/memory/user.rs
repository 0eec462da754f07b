//! In-memory [`UserRepository`].

use async_trait::async_trait;
use chrono::Utc;

use mirage_core::result::AppResult;
use mirage_core::types::id::UserId;
use mirage_entity::user::{CreateUser, Profile, UpdateUser, UpdatedUser, User};

use super::SharedState;
use crate::error::StoreError;
use crate::repositories::UserRepository;
use crate::repositories::user::{EMAIL_KEY, USERNAME_KEY, user_write_error};

#[derive(Debug, Clone)]
pub struct MemoryUserRepository {
    state: SharedState,
}

impl MemoryUserRepository {
    pub(crate) fn new(state: SharedState) -> Self {
        Self { state }
    }
}

/// Mirror of the `users_username_key` / `users_email_key` constraints.
fn check_unique<'a>(
    mut others: impl Iterator<Item = &'a User>,
    username: &str,
    email: &str,
) -> Result<(), StoreError> {
    others.try_for_each(|u| {
        if u.username == username {
            Err(StoreError::unique(USERNAME_KEY))
        } else if u.email == email {
            Err(StoreError::unique(EMAIL_KEY))
        } else {
            Ok(())
        }
    })
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.username == username).cloned())
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let mut state = self.state.write().await;
        check_unique(state.users.values(), &data.username, &data.email)
            .map_err(|e| user_write_error(e, &data.username, &data.email))?;

        let now = Utc::now();
        let user = User {
            id: data.id,
            username: data.username.clone(),
            display_name: data.display_name.clone(),
            email: data.email.clone(),
            password_hash: data.password_hash.clone(),
            image: data.image.clone(),
            bio: None,
            created_at: now,
            updated_at: now,
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, data: &UpdateUser, image: Option<&str>) -> AppResult<UpdatedUser> {
        let mut state = self.state.write().await;
        check_unique(
            state.users.values().filter(|u| u.id != data.id),
            &data.username,
            &data.email,
        )
        .map_err(|e| user_write_error(e, &data.username, &data.email))?;

        let user = state
            .users
            .get_mut(&data.id)
            .ok_or_else(|| user_write_error(StoreError::NotFound, &data.username, &data.email))?;
        user.username = data.username.clone();
        user.display_name = data.display_name.clone();
        user.email = data.email.clone();
        user.bio = data.bio.clone();
        let replaced_image =
            image.map(|image| std::mem::replace(&mut user.image, image.to_string()));
        user.updated_at = Utc::now();
        Ok(UpdatedUser {
            user: user.clone(),
            replaced_image,
        })
    }

    async fn profile(&self, username: &str, viewer: Option<UserId>) -> AppResult<Option<Profile>> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|u| u.username == username)
            .map(|u| state.profile(u, viewer)))
    }

    async fn search_profiles(
        &self,
        term: &str,
        viewer: Option<UserId>,
        limit: i64,
    ) -> AppResult<Vec<Profile>> {
        let needle = term.to_lowercase();
        let state = self.state.read().await;
        let mut found: Vec<&User> = state
            .users
            .values()
            .filter(|u| {
                u.username.to_lowercase().contains(&needle)
                    || u.display_name.to_lowercase().contains(&needle)
            })
            .collect();
        found.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(found
            .into_iter()
            .take(usize::try_from(limit).unwrap_or(0))
            .map(|u| state.profile(u, viewer))
            .collect())
    }

    async fn toggle_follow(&self, follower: UserId, followee: UserId) -> AppResult<bool> {
        let mut state = self.state.write().await;
        if state.follows.remove(&(follower, followee)) {
            return Ok(false);
        }
        if !state.users.contains_key(&follower) || !state.users.contains_key(&followee) {
            return Err(StoreError::foreign_key("followee_followee_id_fkey").into_app("User not found"));
        }
        state.follows.insert((follower, followee));
        Ok(true)
    }
}
