//! Post entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use mirage_core::types::id::{PostId, UserId};

use super::file::NewAttachment;

/// A post row. Posts are immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: PostId,
    /// Body text; absent for media-only posts.
    pub text: Option<String>,
    /// Author.
    pub user_id: UserId,
    /// Hashtags extracted from `text` when the post was written.
    pub hash_tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a post, together with its optional attachment.
///
/// Repositories persist both in one transaction.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub id: PostId,
    pub user_id: UserId,
    pub text: Option<String>,
    pub hash_tags: Vec<String>,
    pub file: Option<NewAttachment>,
}
