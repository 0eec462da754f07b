//! Files attached to posts.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use mirage_core::types::id::{FileId, PostId};

/// A stored upload referenced by a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Attachment {
    pub id: FileId,
    /// MIME type.
    pub file_type: String,
    /// Object name within the store.
    pub filename: String,
    /// Public URL.
    pub url: String,
    pub post_id: PostId,
}

/// An uploaded object waiting to be linked to a post.
#[derive(Debug, Clone)]
pub struct NewAttachment {
    pub id: FileId,
    pub file_type: String,
    pub filename: String,
    pub url: String,
}

impl NewAttachment {
    /// Bind the attachment to the post that references it.
    pub fn into_attachment(self, post_id: PostId) -> Attachment {
        Attachment {
            id: self.id,
            file_type: self.file_type,
            filename: self.filename,
            url: self.url,
            post_id,
        }
    }
}
