//! In-memory repositories.
//!
//! Both repositories share one [`MemoryState`] behind a tokio `RwLock`, so
//! post views can see accounts and follow edges the same way the SQL joins
//! do. Integrity rules that PostgreSQL enforces (unique keys, foreign keys,
//! cascades) are re-checked here and reported through [`StoreError`](crate::error::StoreError) so the
//! domain mapping is shared with the SQL implementation.

mod post;
mod user;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::RwLock;

use mirage_core::types::id::{PostId, UserId};
use mirage_core::types::page::PageRequest;
use mirage_entity::post::{Attachment, Post, PostView};
use mirage_entity::user::{Profile, User};

pub use post::MemoryPostRepository;
pub use user::MemoryUserRepository;

/// Tables, keyed the way the SQL schema keys them.
#[derive(Debug, Default)]
pub(crate) struct MemoryState {
    users: HashMap<UserId, User>,
    /// `(user_id, followee_id)` edges.
    follows: HashSet<(UserId, UserId)>,
    posts: HashMap<PostId, Post>,
    /// Attachments keyed by owning post.
    files: HashMap<PostId, Attachment>,
    likes: HashSet<(UserId, PostId)>,
    retweets: HashSet<(UserId, PostId)>,
}

pub(crate) type SharedState = Arc<RwLock<MemoryState>>;

/// A user and a post repository over the same fresh state.
pub fn repositories() -> (MemoryUserRepository, MemoryPostRepository) {
    let state = SharedState::default();
    (
        MemoryUserRepository::new(state.clone()),
        MemoryPostRepository::new(state),
    )
}

impl MemoryState {
    fn follows(&self, follower: UserId, followee: UserId) -> bool {
        self.follows.contains(&(follower, followee))
    }

    fn profile(&self, user: &User, viewer: Option<UserId>) -> Profile {
        let followers = self.follows.iter().filter(|(_, to)| *to == user.id).count();
        let followee = self.follows.iter().filter(|(from, _)| *from == user.id).count();
        Profile {
            id: user.id,
            username: user.username.clone(),
            display_name: user.display_name.clone(),
            image: user.image.clone(),
            bio: user.bio.clone(),
            followers: followers as i64,
            followee: followee as i64,
            following: viewer.is_some_and(|v| self.follows(v, user.id)),
            created_at: user.created_at,
        }
    }

    fn view(&self, post: &Post, viewer: Option<UserId>, is_retweet: bool) -> Option<PostView> {
        let author = self.users.get(&post.user_id)?;
        let likes = self.likes.iter().filter(|(_, p)| *p == post.id).count();
        let retweets = self.retweets.iter().filter(|(_, p)| *p == post.id).count();
        Some(PostView {
            id: post.id,
            text: post.text.clone(),
            hash_tags: post.hash_tags.clone(),
            author: self.profile(author, viewer),
            likes: likes as i64,
            liked: viewer.is_some_and(|v| self.likes.contains(&(v, post.id))),
            retweets: retweets as i64,
            retweeted: viewer.is_some_and(|v| self.retweets.contains(&(v, post.id))),
            is_retweet,
            file: self.files.get(&post.id).cloned(),
            created_at: post.created_at,
        })
    }

    /// Newest-first listing. `qualify` returns `None` to skip a post, or
    /// `Some(is_retweet)` to include it. Each post is visited once, so a
    /// post never appears twice.
    fn listing(
        &self,
        viewer: Option<UserId>,
        page: &PageRequest,
        qualify: impl Fn(&Self, &Post) -> Option<bool>,
    ) -> Vec<PostView> {
        let mut matches: Vec<(&Post, bool)> = self
            .posts
            .values()
            .filter(|post| {
                page.cursor
                    .is_none_or(|cursor| cursor.admits(post.created_at, post.id))
            })
            .filter_map(|post| qualify(self, post).map(|is_retweet| (post, is_retweet)))
            .collect();
        matches.sort_by(|(a, _), (b, _)| (b.created_at, b.id).cmp(&(a.created_at, a.id)));

        matches
            .into_iter()
            .take(page.fetch_limit() as usize)
            .filter_map(|(post, is_retweet)| self.view(post, viewer, is_retweet))
            .collect()
    }
}
