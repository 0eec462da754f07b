//! Validated post inputs.

use validator::Validate;

use crate::upload::Upload;
use crate::validation::non_blank;

/// A new post: text, an attachment, or both.
#[derive(Debug, Clone, Validate)]
pub struct CreatePostInput {
    #[validate(length(max = 280, message = "Post text must be at most 280 characters"))]
    pub text: Option<String>,
    pub media: Option<Upload>,
}

impl CreatePostInput {
    pub(crate) fn normalized(self) -> Self {
        Self {
            text: non_blank(self.text),
            media: self.media.filter(|m| !m.data.is_empty()),
        }
    }
}
