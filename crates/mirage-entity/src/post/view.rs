//! Post read model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use mirage_core::types::id::PostId;
use mirage_core::types::page::Positioned;

use super::file::Attachment;
use crate::user::Profile;

/// A post as seen by a viewer, with author, counters, and membership flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostView {
    pub id: PostId,
    pub text: Option<String>,
    pub hash_tags: Vec<String>,
    pub author: Profile,
    pub likes: i64,
    /// Whether the viewer liked the post.
    pub liked: bool,
    pub retweets: i64,
    /// Whether the viewer retweeted the post.
    pub retweeted: bool,
    /// The post is listed because of a retweet rather than authorship.
    pub is_retweet: bool,
    pub file: Option<Attachment>,
    pub created_at: DateTime<Utc>,
}

impl Positioned for PostView {
    fn position(&self) -> (DateTime<Utc>, PostId) {
        (self.created_at, self.id)
    }
}
