//! In-memory [`PostRepository`].

use async_trait::async_trait;
use chrono::Utc;

use mirage_core::result::AppResult;
use mirage_core::types::id::{PostId, UserId};
use mirage_core::types::page::PageRequest;
use mirage_entity::post::{NewPost, Post, PostView};

use super::{MemoryState, SharedState};
use crate::error::StoreError;
use crate::repositories::PostRepository;

#[derive(Debug, Clone)]
pub struct MemoryPostRepository {
    state: SharedState,
}

impl MemoryPostRepository {
    pub(crate) fn new(state: SharedState) -> Self {
        Self { state }
    }
}

/// Which join table a toggle touches.
#[derive(Clone, Copy)]
enum Reaction {
    Like,
    Retweet,
}

impl MemoryState {
    fn toggle(&mut self, reaction: Reaction, user: UserId, post: PostId) -> AppResult<bool> {
        let key = (user, post);
        let set = match reaction {
            Reaction::Like => &self.likes,
            Reaction::Retweet => &self.retweets,
        };
        let exists = set.contains(&key);
        if !exists && (!self.posts.contains_key(&post) || !self.users.contains_key(&user)) {
            return Err(StoreError::foreign_key("post_id_fkey").into_app("Post not found"));
        }

        let set = match reaction {
            Reaction::Like => &mut self.likes,
            Reaction::Retweet => &mut self.retweets,
        };
        if exists {
            set.remove(&key);
        } else {
            set.insert(key);
        }
        Ok(!exists)
    }
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn create(&self, data: &NewPost) -> AppResult<Post> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(&data.user_id) {
            return Err(StoreError::foreign_key("posts_user_id_fkey").into_app("Failed to create post"));
        }
        if state.posts.contains_key(&data.id) {
            return Err(StoreError::unique("posts_pkey").into_app("Failed to create post"));
        }

        let now = Utc::now();
        let post = Post {
            id: data.id,
            text: data.text.clone(),
            user_id: data.user_id,
            hash_tags: data.hash_tags.clone(),
            created_at: now,
            updated_at: now,
        };
        // Both rows land under one write lock, so readers see both or neither.
        if let Some(file) = &data.file {
            state
                .files
                .insert(post.id, file.clone().into_attachment(post.id));
        }
        state.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: PostId) -> AppResult<Option<Post>> {
        Ok(self.state.read().await.posts.get(&id).cloned())
    }

    async fn view(&self, id: PostId, viewer: Option<UserId>) -> AppResult<Option<PostView>> {
        let state = self.state.read().await;
        Ok(state
            .posts
            .get(&id)
            .and_then(|post| state.view(post, viewer, false)))
    }

    async fn delete(&self, id: PostId) -> AppResult<bool> {
        let mut state = self.state.write().await;
        if state.posts.remove(&id).is_none() {
            return Ok(false);
        }
        state.files.remove(&id);
        state.likes.retain(|(_, post)| *post != id);
        state.retweets.retain(|(_, post)| *post != id);
        Ok(true)
    }

    async fn toggle_like(&self, user: UserId, post: PostId) -> AppResult<bool> {
        self.state.write().await.toggle(Reaction::Like, user, post)
    }

    async fn toggle_retweet(&self, user: UserId, post: PostId) -> AppResult<bool> {
        self.state.write().await.toggle(Reaction::Retweet, user, post)
    }

    async fn feed(&self, viewer: UserId, page: &PageRequest) -> AppResult<Vec<PostView>> {
        let state = self.state.read().await;
        Ok(state.listing(Some(viewer), page, |state, post| {
            if state.follows(viewer, post.user_id) {
                return Some(false);
            }
            state
                .retweets
                .iter()
                .any(|(by, p)| *p == post.id && state.follows(viewer, *by))
                .then_some(true)
        }))
    }

    async fn profile_posts(
        &self,
        author: UserId,
        viewer: Option<UserId>,
        page: &PageRequest,
    ) -> AppResult<Vec<PostView>> {
        let state = self.state.read().await;
        Ok(state.listing(viewer, page, |state, post| {
            if post.user_id == author {
                Some(false)
            } else {
                state.retweets.contains(&(author, post.id)).then_some(true)
            }
        }))
    }

    async fn liked_posts(
        &self,
        user: UserId,
        viewer: Option<UserId>,
        page: &PageRequest,
    ) -> AppResult<Vec<PostView>> {
        let state = self.state.read().await;
        Ok(state.listing(viewer, page, |state, post| {
            state.likes.contains(&(user, post.id)).then_some(false)
        }))
    }

    async fn hashtag_posts(
        &self,
        tag: &str,
        viewer: Option<UserId>,
        page: &PageRequest,
    ) -> AppResult<Vec<PostView>> {
        let needle = tag.to_lowercase();
        let state = self.state.read().await;
        Ok(state.listing(viewer, page, |_, post| {
            post.hash_tags
                .iter()
                .any(|t| t.to_lowercase() == needle)
                .then_some(false)
        }))
    }
}
